//! Service configuration
//!
//! Read from the YAML file named by `DEPGRAPH_CONFIG` (defaults otherwise);
//! `DEPGRAPH_PORT` overrides the listen port.
//!
//! ```yaml
//! server:
//!   address: 0.0.0.0
//!   port: 8050
//! dataset:
//!   kind: synthetic
//!   entity_count: 1000
//!   seed: 7
//! lineage: data/lineage.yaml   # optional; sample rows otherwise
//! ```

use crate::graph::{sample, Dataset, DatasetGenerator, GraphError, SyntheticGenerator};
use crate::projection::lineage::{self, LineageRow};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const CONFIG_ENV: &str = "DEPGRAPH_CONFIG";
pub const PORT_ENV: &str = "DEPGRAPH_PORT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid port {0:?}")]
    InvalidPort(String),

    #[error("Dataset error: {0}")]
    Dataset(#[from] GraphError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub address: String,
    /// Port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

/// Where the dataset snapshot comes from
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DatasetSource {
    /// The fixed four-entity sample
    #[default]
    Sample,
    /// Randomly generated entities; a seed makes the run reproducible
    Synthetic {
        entity_count: usize,
        #[serde(default)]
        seed: Option<u64>,
    },
    /// JSON or YAML entity records
    File { path: PathBuf },
}

impl DatasetSource {
    /// Materialise the snapshot
    pub fn load(&self) -> ConfigResult<Dataset> {
        let dataset = match self {
            DatasetSource::Sample => sample::ait_dataset(),
            DatasetSource::Synthetic { entity_count, seed } => {
                let generator = SyntheticGenerator::with_count(*entity_count);
                match seed {
                    Some(seed) => generator.seeded(*seed).generate(),
                    None => generator.generate(),
                }
            }
            DatasetSource::File { path } => Dataset::load(path)?,
        };
        info!(source = ?self, entities = dataset.len(), "dataset loaded");
        Ok(dataset)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub dataset: DatasetSource,
    /// JSON or YAML lineage rows
    pub lineage: Option<PathBuf>,
}

impl AppConfig {
    /// Lineage rows from the configured file, or the sample rows
    pub fn load_lineage(&self) -> ConfigResult<Vec<LineageRow>> {
        let rows = match &self.lineage {
            Some(path) => lineage::load_rows(path)?,
            None => lineage::sample_rows(),
        };
        info!(rows = rows.len(), "lineage rows loaded");
        Ok(rows)
    }

    pub fn from_yaml_str(input: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Configuration from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_ENV) {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(port) = lookup(PORT_ENV) {
            config.server.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        Ok(config)
    }
}
