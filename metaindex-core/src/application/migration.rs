// metaindex-core/src/application/migration.rs

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::domain::connection::ConverterRegistry;
use crate::domain::error::DomainError;
use crate::error::MetaindexError;

/// Normalizes a raw connection config with the converter registered for its
/// `type`. Types without a converter come back unchanged.
#[instrument(skip_all, fields(connection_type = tracing::field::Empty))]
pub fn migrate_connection(registry: &ConverterRegistry, raw: &Value) -> Result<Value, MetaindexError> {
    let connection_type = raw
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| DomainError::ConnectionSchema {
            connection_type: "<unknown>".to_string(),
            reason: "missing string field 'type'".to_string(),
        })?;
    tracing::Span::current().record("connection_type", connection_type);

    match registry.get(connection_type) {
        Some(converter) => {
            let migrated = converter.convert(raw)?;
            debug!("Connection config normalized");
            Ok(migrated)
        }
        None => {
            warn!("No converter registered, config left unchanged");
            Ok(raw.clone())
        }
    }
}
