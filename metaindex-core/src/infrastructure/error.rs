// metaindex-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(metaindex::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(metaindex::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON Error: {0}")]
    #[diagnostic(code(metaindex::infra::json))]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    ConfigError(String),

    #[error("Configuration not found at '{0}'")]
    #[diagnostic(code(metaindex::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(
        code(metaindex::infra::config_invalid),
        help("concurrency must be between 1 and 256.")
    )]
    Validation(#[from] validator::ValidationErrors),

    // --- CATALOG SNAPSHOT ---
    #[error("Catalog snapshot error in '{path}': {reason}")]
    #[diagnostic(
        code(metaindex::infra::catalog),
        help("Each file holds one {{ entityType, entity }} record or a list of them.")
    )]
    CatalogLoad { path: String, reason: String },
}

// `.context(...)` on config loading produces anyhow errors
impl From<anyhow::Error> for InfrastructureError {
    fn from(err: anyhow::Error) -> Self {
        InfrastructureError::ConfigError(format!("{:#}", err))
    }
}
