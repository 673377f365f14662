//! Comma-appended scalar logs
//!
//! Each stream is a single file that grows by `"{value},"` per record, e.g.
//! the average score of every block of training episodes.

use anyhow::{Context, Result};
use std::fmt::Display;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only writer for one scalar series
#[derive(Debug)]
pub struct LogStream {
    path: PathBuf,
    file: File,
}

impl LogStream {
    /// Open `path` for appending, creating it and its parent directories
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log stream: {}", path.display()))?;
        Ok(Self { path, file })
    }

    /// Like [`LogStream::open`] but discards any existing contents
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            fs::write(path, "")
                .with_context(|| format!("Failed to truncate log stream: {}", path.display()))?;
        }
        Self::open(path)
    }

    pub fn record<T: Display>(&mut self, value: T) -> Result<()> {
        write!(self.file, "{},", value)
            .with_context(|| format!("Failed to write to {}", self.path.display()))
    }
}
