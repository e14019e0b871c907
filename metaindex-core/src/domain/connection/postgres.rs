// metaindex-core/src/domain/connection/postgres.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::auth::{DATABASE_AUTH_CANDIDATES, DatabaseAuth, SSL_CONFIG_CANDIDATES, SslConfig};
use super::converter::MigratableConnection;
use super::variant::{Candidate, Variant, keep_null};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SslMode {
    Disable,
    Allow,
    Prefer,
    Require,
    VerifyCa,
    VerifyFull,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgresConnection {
    #[serde(rename = "type", default = "default_type")]
    pub connection_type: String,
    #[serde(default = "default_scheme")]
    pub scheme: String,
    pub username: String,
    #[serde(
        default,
        deserialize_with = "keep_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub auth_type: Option<Variant<DatabaseAuth>>,
    pub host_port: String,
    pub database: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_mode: Option<SslMode>,
    #[serde(
        default,
        deserialize_with = "keep_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub ssl_config: Option<Variant<SslConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest_all_databases: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_options: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_arguments: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_metadata_extraction: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_profiler: Option<bool>,
}

fn default_type() -> String {
    PostgresConnection::CONNECTION_TYPE.to_string()
}

fn default_scheme() -> String {
    "postgresql+psycopg2".to_string()
}

impl MigratableConnection for PostgresConnection {
    const CONNECTION_TYPE: &'static str = "Postgres";

    fn auth_candidates() -> &'static [Candidate<DatabaseAuth>] {
        DATABASE_AUTH_CANDIDATES
    }

    fn ssl_candidates() -> &'static [Candidate<SslConfig>] {
        SSL_CONFIG_CANDIDATES
    }

    fn auth_type_mut(&mut self) -> &mut Option<Variant<DatabaseAuth>> {
        &mut self.auth_type
    }

    fn ssl_config_mut(&mut self) -> &mut Option<Variant<SslConfig>> {
        &mut self.ssl_config
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::connection::converter::migrate;
    use serde_json::json;

    #[test]
    fn test_postgres_requires_database() {
        let result = migrate::<PostgresConnection>(&json!({
            "username": "u",
            "hostPort": "pg:5432",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_postgres_auth_and_ssl_mode() -> anyhow::Result<()> {
        let conn: PostgresConnection = migrate(&json!({
            "type": "Postgres",
            "username": "u",
            "hostPort": "pg:5432",
            "database": "analytics",
            "sslMode": "verify-full",
            "authType": { "password": "p" },
            "sslConfig": { "sslCertificate": "cert", "sslKey": "key" }
        }))?;
        assert_eq!(conn.ssl_mode, Some(SslMode::VerifyFull));
        assert!(matches!(
            conn.auth_type.as_ref().and_then(Variant::typed),
            Some(DatabaseAuth::Basic(_))
        ));
        assert!(conn.ssl_config.as_ref().and_then(Variant::typed).is_some());
        Ok(())
    }
}
