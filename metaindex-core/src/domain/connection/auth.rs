// metaindex-core/src/domain/connection/auth.rs
//
// Variant shapes shared by database connections. Each one denies unknown
// fields so that a payload only matches a variant it fits entirely.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::variant::{Candidate, coerce};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BasicAuth {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IamAuthConfig {
    pub role_arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_session_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_access_key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_secret_access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_session_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AzureCredentials {
    pub client_id: String,
    pub tenant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AzureConfig {
    pub azure_config: AzureCredentials,
}

/// Authentication method of a database connection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DatabaseAuth {
    Basic(BasicAuth),
    Iam(IamAuthConfig),
    Azure(AzureConfig),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidateSslClientConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SslConfig {
    ValidateClient(ValidateSslClientConfig),
}

fn as_basic_auth(value: &Value) -> Option<DatabaseAuth> {
    coerce::<BasicAuth>(value).map(DatabaseAuth::Basic)
}

fn as_iam_auth(value: &Value) -> Option<DatabaseAuth> {
    coerce::<IamAuthConfig>(value).map(DatabaseAuth::Iam)
}

fn as_azure_auth(value: &Value) -> Option<DatabaseAuth> {
    coerce::<AzureConfig>(value).map(DatabaseAuth::Azure)
}

fn as_validate_ssl_client(value: &Value) -> Option<SslConfig> {
    coerce::<ValidateSslClientConfig>(value).map(SslConfig::ValidateClient)
}

/// Basic credentials first, then IAM, then cloud provider.
pub const DATABASE_AUTH_CANDIDATES: &[Candidate<DatabaseAuth>] = &[
    Candidate {
        name: "basicAuth",
        coerce: as_basic_auth,
    },
    Candidate {
        name: "iamAuthConfig",
        coerce: as_iam_auth,
    },
    Candidate {
        name: "azureConfig",
        coerce: as_azure_auth,
    },
];

pub const SSL_CONFIG_CANDIDATES: &[Candidate<SslConfig>] = &[Candidate {
    name: "validateSslClientConfig",
    coerce: as_validate_ssl_client,
}];
