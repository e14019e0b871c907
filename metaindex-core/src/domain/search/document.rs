// metaindex-core/src/domain/search/document.rs
//
// Generic document plumbing shared by every entity index: the base step turns
// the stored entity into a JSON map, then each index adds its own fields.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::catalog::{EntityReference, Table};
use crate::domain::error::DomainError;

/// Flattened document sent to the search engine.
pub type SearchDocument = Map<String, Value>;

/// Never indexed, whatever the entity.
pub const DEFAULT_EXCLUDED_FIELDS: [&str; 2] = ["changeDescription", "incrementalChangeDescription"];

/// Inserts `value` under `field`, serializing it first.
pub fn put<T: Serialize>(doc: &mut SearchDocument, field: &str, value: T) -> Result<(), DomainError> {
    let value = serde_json::to_value(value).map_err(|e| DomainError::DocumentEncoding {
        field: field.to_string(),
        reason: e.to_string(),
    })?;
    doc.insert(field.to_string(), value);
    Ok(())
}

/// Base step: the stored entity as a map of its generic fields.
pub fn base_document(entity_type: &str, entity: &Value) -> Result<SearchDocument, DomainError> {
    match entity {
        Value::Object(map) => Ok(map.clone()),
        other => Err(DomainError::EntityDecode {
            entity_type: entity_type.to_string(),
            reason: format!("expected a JSON object, got {}", json_kind(other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub fn remove_fields(doc: &mut SearchDocument, excluded: &[&str]) {
    for field in excluded {
        doc.remove(*field);
    }
}

/// Owners as shown in search results: `displayName` is always filled.
pub fn owners_with_display_name(owners: &[EntityReference]) -> Vec<EntityReference> {
    owners
        .iter()
        .cloned()
        .map(EntityReference::with_display_name_fallback)
        .collect()
}

/// Followers are indexed as plain ids.
pub fn parse_followers(followers: &[EntityReference]) -> Vec<String> {
    followers.iter().map(|f| f.id.to_string()).collect()
}

/// Containment facets of a table: the table itself and its database, schema and service.
pub fn put_table_facets(doc: &mut SearchDocument, table: &Table) -> Result<(), DomainError> {
    put(doc, "table", table.entity_reference())?;
    put(doc, "database", &table.database)?;
    put(doc, "databaseSchema", &table.database_schema)?;
    put(doc, "service", &table.service)?;
    Ok(())
}
