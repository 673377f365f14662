//! Saving and loading trained agents
//!
//! Both artifacts are pretty-printed JSON carrying the learned parameters plus
//! the settings needed to use them again. Parent directories are created on
//! save.

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::evolution::{GaConfig, Genome};
use crate::rl::{QLearningConfig, QTable};

/// Metadata saved with every artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Board size the agent was trained on
    pub grid_size: usize,

    /// Seed of the run, if it was seeded
    pub seed: Option<u64>,

    /// Crate version that wrote the file
    pub version: String,
}

impl ModelMetadata {
    pub fn new(grid_size: usize, seed: Option<u64>) -> Self {
        Self {
            grid_size,
            seed,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// A learned Q-table and how it was trained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTableArtifact {
    #[serde(flatten)]
    pub q_table: QTable,
    pub episodes_trained: usize,
    pub config: QLearningConfig,
    pub metadata: ModelMetadata,
}

/// The best genome of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomeArtifact {
    pub genome: Genome,
    /// Generation in which the genome was evaluated
    pub generation: usize,
    pub fitness: f64,
    pub mean_score: f64,
    pub config: GaConfig,
    pub metadata: ModelMetadata,
}

pub fn save_q_table(artifact: &QTableArtifact, path: &Path) -> Result<()> {
    write_json(artifact, path)
}

/// Load a Q-table artifact and check that its values fill the table
pub fn load_q_table(path: &Path) -> Result<QTableArtifact> {
    let artifact: QTableArtifact = read_json(path)?;
    let table = &artifact.q_table;
    if QTable::from_values(table.state_space(), table.action_space(), table.values().to_vec())
        .is_none()
    {
        bail!(
            "Q-table in {:?} has {} values for a {}x{} table",
            path,
            table.values().len(),
            table.state_space(),
            table.action_space()
        );
    }
    Ok(artifact)
}

pub fn save_genome(artifact: &GenomeArtifact, path: &Path) -> Result<()> {
    write_json(artifact, path)
}

pub fn load_genome(path: &Path) -> Result<GenomeArtifact> {
    read_json(path)
}

fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let json = serde_json::to_string_pretty(value).context("Failed to serialize artifact")?;
    std::fs::write(path, json).with_context(|| format!("Failed to write artifact to {:?}", path))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read artifact from {:?}", path))?;
    serde_json::from_str(&json).with_context(|| format!("Failed to deserialize {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn q_artifact() -> QTableArtifact {
        let values = (0..32).map(|v| v as f64 * 0.5 - 3.0).collect();
        QTableArtifact {
            q_table: QTable::from_values(8, 4, values).unwrap(),
            episodes_trained: 1000,
            config: QLearningConfig::default(),
            metadata: ModelMetadata::new(5, Some(42)),
        }
    }

    #[test]
    fn test_metadata_creation() {
        let metadata = ModelMetadata::new(20, None);
        assert_eq!(metadata.grid_size, 20);
        assert_eq!(metadata.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_q_table_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("models").join("q_table.json");
        let artifact = q_artifact();

        save_q_table(&artifact, &path).unwrap();
        let loaded = load_q_table(&path).unwrap();

        assert_eq!(loaded, artifact);
    }

    #[test]
    fn test_q_table_fields_are_flat() {
        let json = serde_json::to_value(q_artifact()).unwrap();
        assert_eq!(json["state_space"], 8);
        assert_eq!(json["action_space"], 4);
        assert_eq!(json["values"].as_array().unwrap().len(), 32);
    }

    #[test]
    fn test_load_rejects_short_table() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");

        let mut json = serde_json::to_value(q_artifact()).unwrap();
        json["values"] = serde_json::json!([1.0, 2.0]);
        std::fs::write(&path, json.to_string()).unwrap();

        assert!(load_q_table(&path).is_err());
    }

    #[test]
    fn test_genome_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best_genome.json");
        let artifact = GenomeArtifact {
            genome: Genome::from_bits(vec![true, false, false, true, true]),
            generation: 12,
            fitness: 1234.5,
            mean_score: 7.25,
            config: GaConfig::default(),
            metadata: ModelMetadata::new(20, None),
        };

        save_genome(&artifact, &path).unwrap();
        assert_eq!(load_genome(&path).unwrap(), artifact);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = load_genome(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read artifact"));
    }
}
