// metaindex-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Entity '{entity_type}' not found: {key}")]
    #[diagnostic(
        code(metaindex::domain::entity_not_found),
        help("Check that the catalog snapshot contains this entity (soft-deleted records count).")
    )]
    EntityNotFound { entity_type: String, key: String },

    #[error("Malformed entity link: {0}")]
    #[diagnostic(
        code(metaindex::domain::entity_link),
        help("Expected '<#E::type::fqn[::field[::arrayField]]>' or 'type::fqn[::...]'.")
    )]
    MalformedEntityLink(String),

    #[error("Invalid fully qualified name: {0}")]
    #[diagnostic(code(metaindex::domain::fqn))]
    InvalidFqn(String),

    #[error("Could not decode '{entity_type}' entity: {reason}")]
    #[diagnostic(code(metaindex::domain::decode))]
    EntityDecode { entity_type: String, reason: String },

    #[error("Could not encode search field '{field}': {reason}")]
    #[diagnostic(code(metaindex::domain::document))]
    DocumentEncoding { field: String, reason: String },

    #[error("Test suite '{0}' referenced by the test case does not exist")]
    #[diagnostic(code(metaindex::domain::test_suite))]
    MissingTestSuite(String),

    #[error("Connection '{connection_type}' does not match its schema: {reason}")]
    #[diagnostic(
        code(metaindex::domain::connection),
        help("Required fields (username, hostPort...) must be present and well typed.")
    )]
    ConnectionSchema {
        connection_type: String,
        reason: String,
    },
}
