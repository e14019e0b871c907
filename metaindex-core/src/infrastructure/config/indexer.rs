// metaindex-core/src/infrastructure/config/indexer.rs

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::search::FieldWeights;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::Include;

const CONFIG_CANDIDATES: [&str; 2] = ["metaindex.yaml", "metaindex.yml"];

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct IndexerConfig {
    /// Catalog snapshot directory, relative to the project.
    #[serde(rename = "catalog-path", default = "default_catalog_path")]
    pub catalog_path: String,

    #[serde(rename = "target-path", default = "default_target_path")]
    pub target_path: String,

    /// Soft-delete policy of every lookup done while indexing.
    #[serde(default)]
    pub include: Include,

    /// Test cases indexed in parallel.
    #[validate(range(min = 1, max = 256))]
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Merged over the built-in search field weights.
    #[serde(rename = "field-weights", default)]
    pub field_weights: FieldWeights,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            target_path: default_target_path(),
            include: Include::default(),
            concurrency: default_concurrency(),
            field_weights: FieldWeights::new(),
        }
    }
}

fn default_catalog_path() -> String {
    "catalog".to_string()
}
fn default_target_path() -> String {
    "target".to_string()
}
fn default_concurrency() -> usize {
    8
}

/// Loads `metaindex.yaml` from `project_dir`, falling back to defaults when
/// there is none, then applies environment overrides and validates.
#[instrument(skip(project_dir))]
pub fn load_indexer_config(project_dir: &Path) -> Result<IndexerConfig, InfrastructureError> {
    let mut config: IndexerConfig = match find_config(project_dir) {
        Some(path) => {
            info!(path = ?path, "Loading indexer configuration");
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read indexer config at {:?}", path))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse indexer config YAML at {:?}", path))?
        }
        None => {
            info!("No metaindex.yaml found, using defaults");
            IndexerConfig::default()
        }
    };

    apply_env_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn find_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

fn apply_env_overrides(config: &mut IndexerConfig) {
    // METAINDEX_TARGET_PATH=/tmp/out metaindex index
    if let Ok(val) = std::env::var("METAINDEX_TARGET_PATH") {
        info!(old = ?config.target_path, new = ?val, "Overriding target path via ENV");
        config.target_path = val;
    }
    if let Ok(val) = std::env::var("METAINDEX_CATALOG_PATH") {
        info!(old = ?config.catalog_path, new = ?val, "Overriding catalog path via ENV");
        config.catalog_path = val;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file() -> Result<()> {
        let dir = tempdir()?;
        let config = load_indexer_config(dir.path())?;
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.include, Include::All);
        assert!(config.field_weights.is_empty());
        Ok(())
    }

    #[test]
    fn test_yaml_file_is_parsed() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("metaindex.yaml"),
            "catalog-path: snapshot\ninclude: non_deleted\nconcurrency: 2\nfield-weights:\n  entityLink: 6.0\n",
        )?;
        let config = load_indexer_config(dir.path())?;
        assert_eq!(config.catalog_path, "snapshot");
        assert_eq!(config.include, Include::NonDeleted);
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.field_weights["entityLink"], 6.0);
        Ok(())
    }

    #[test]
    fn test_zero_concurrency_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("metaindex.yml"), "concurrency: 0\n")?;
        let err = load_indexer_config(dir.path()).unwrap_err();
        assert!(matches!(err, InfrastructureError::Validation(_)));
        Ok(())
    }

    #[test]
    fn test_invalid_yaml_is_an_error() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("metaindex.yaml"), "concurrency: [oops\n")?;
        assert!(load_indexer_config(dir.path()).is_err());
        Ok(())
    }
}
