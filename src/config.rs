//! Run configuration loaded from JSON
//!
//! Every section falls back to its defaults, so a file only needs the fields
//! it changes:
//!
//! ```json
//! { "evolve": { "ga": { "population_size": 100, "seed": 3 } } }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::modes::{EvaluateConfig, EvolveConfig, TrainConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub train: TrainConfig,
    pub evolve: EvolveConfig,
    pub evaluate: EvaluateConfig,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        serde_json::from_str(&json).with_context(|| format!("Failed to parse config {:?}", path))
    }
}
