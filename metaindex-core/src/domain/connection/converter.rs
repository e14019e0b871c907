// metaindex-core/src/domain/connection/converter.rs

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::marker::PhantomData;

use super::auth::{DatabaseAuth, SslConfig};
use super::mysql::MysqlConnection;
use super::postgres::PostgresConnection;
use super::variant::{Candidate, Variant, try_to_convert};
use crate::domain::error::DomainError;

/// A connection whose auth and SSL fields are resolved against fixed candidate lists.
pub trait MigratableConnection: Serialize + DeserializeOwned {
    const CONNECTION_TYPE: &'static str;

    fn auth_candidates() -> &'static [Candidate<DatabaseAuth>];
    fn ssl_candidates() -> &'static [Candidate<SslConfig>];

    fn auth_type_mut(&mut self) -> &mut Option<Variant<DatabaseAuth>>;
    fn ssl_config_mut(&mut self) -> &mut Option<Variant<SslConfig>>;
}

/// Typed deserialization, then candidate resolution of both polymorphic fields.
/// Idempotent: a resolved variant serializes back to a shape it matches again.
pub fn migrate<C: MigratableConnection>(raw: &Value) -> Result<C, DomainError> {
    let mut connection = C::deserialize(raw).map_err(|e| DomainError::ConnectionSchema {
        connection_type: C::CONNECTION_TYPE.to_string(),
        reason: e.to_string(),
    })?;

    let auth = connection.auth_type_mut().take();
    *connection.auth_type_mut() = try_to_convert(auth, C::auth_candidates());

    let ssl = connection.ssl_config_mut().take();
    *connection.ssl_config_mut() = try_to_convert(ssl, C::ssl_candidates());

    Ok(connection)
}

/// JSON in, JSON out: what the secrets pipeline sees.
pub trait ConnectionConverter: Send + Sync {
    fn connection_type(&self) -> &'static str;
    fn convert(&self, raw: &Value) -> Result<Value, DomainError>;
}

pub struct ClassConverter<C> {
    _connection: PhantomData<fn() -> C>,
}

impl<C> ClassConverter<C> {
    pub fn new() -> Self {
        Self {
            _connection: PhantomData,
        }
    }
}

impl<C> Default for ClassConverter<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MigratableConnection> ConnectionConverter for ClassConverter<C> {
    fn connection_type(&self) -> &'static str {
        C::CONNECTION_TYPE
    }

    fn convert(&self, raw: &Value) -> Result<Value, DomainError> {
        let connection: C = migrate(raw)?;
        serde_json::to_value(&connection).map_err(|e| DomainError::ConnectionSchema {
            connection_type: C::CONNECTION_TYPE.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Converters keyed by the connection `type` field.
pub struct ConverterRegistry {
    converters: HashMap<&'static str, Box<dyn ConnectionConverter>>,
}

impl ConverterRegistry {
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    pub fn register(&mut self, converter: Box<dyn ConnectionConverter>) {
        self.converters.insert(converter.connection_type(), converter);
    }

    pub fn get(&self, connection_type: &str) -> Option<&dyn ConnectionConverter> {
        self.converters.get(connection_type).map(|c| c.as_ref())
    }

    pub fn connection_types(&self) -> Vec<&'static str> {
        let mut types: Vec<_> = self.converters.keys().copied().collect();
        types.sort_unstable();
        types
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(ClassConverter::<MysqlConnection>::new()));
        registry.register(Box::new(ClassConverter::<PostgresConnection>::new()));
        registry
    }
}
