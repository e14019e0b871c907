// metaindex-core/src/domain/connection/mod.rs

pub mod auth;
pub mod converter;
pub mod mysql;
pub mod postgres;
pub mod variant;

pub use auth::{AzureConfig, AzureCredentials, BasicAuth, DatabaseAuth, IamAuthConfig, SslConfig, ValidateSslClientConfig};
pub use converter::{ClassConverter, ConnectionConverter, ConverterRegistry, MigratableConnection, migrate};
pub use mysql::MysqlConnection;
pub use postgres::PostgresConnection;
pub use variant::{Candidate, Variant};
