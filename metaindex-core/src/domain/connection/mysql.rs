// metaindex-core/src/domain/connection/mysql.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::auth::{DATABASE_AUTH_CANDIDATES, DatabaseAuth, SSL_CONFIG_CANDIDATES, SslConfig};
use super::converter::MigratableConnection;
use super::variant::{Candidate, Variant, keep_null};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MysqlConnection {
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
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_schema: Option<String>,
    #[serde(
        default,
        deserialize_with = "keep_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub ssl_config: Option<Variant<SslConfig>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_options: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_arguments: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_metadata_extraction: Option<bool>,
    #[serde(
        rename = "supportsDBTExtraction",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub supports_dbt_extraction: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_profiler: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supports_query_comment: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_data_storage_config: Option<Value>,
}

fn default_type() -> String {
    MysqlConnection::CONNECTION_TYPE.to_string()
}

fn default_scheme() -> String {
    "mysql+pymysql".to_string()
}

impl MigratableConnection for MysqlConnection {
    const CONNECTION_TYPE: &'static str = "Mysql";

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
