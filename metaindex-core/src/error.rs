// metaindex-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetaindexError {
    // --- DOMAIN ERRORS (lookups, entity links, schemas) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, Parsing) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- GENERIC / APPLICATION ERRORS ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl From<std::io::Error> for MetaindexError {
    fn from(err: std::io::Error) -> Self {
        MetaindexError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<serde_json::Error> for MetaindexError {
    fn from(err: serde_json::Error) -> Self {
        MetaindexError::Infrastructure(InfrastructureError::JsonError(err))
    }
}
