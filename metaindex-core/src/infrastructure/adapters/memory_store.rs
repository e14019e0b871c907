// metaindex-core/src/infrastructure/adapters/memory_store.rs

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};
use uuid::Uuid;
use walkdir::WalkDir;

use crate::domain::catalog::{CatalogEntity, EntityReference};
use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::entity_store::{EntityStore, Include};

const SUPPORTED_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// One entry of a catalog snapshot file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRecord {
    entity_type: String,
    entity: Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Many(Vec<SnapshotRecord>),
    One(SnapshotRecord),
}

/// Entity store backed by a map, filled by hand or from a snapshot directory.
/// Entities are stored whole: requested `fields` are not used to trim them.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEntityStore {
    by_id: HashMap<String, HashMap<Uuid, Value>>,
    by_name: HashMap<(String, String), Uuid>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entity` under its `id` and its `fullyQualifiedName` (or `name`).
    pub fn insert(&mut self, entity_type: &str, entity: Value) -> Result<(), DomainError> {
        let decode_error = |reason: &str| DomainError::EntityDecode {
            entity_type: entity_type.to_string(),
            reason: reason.to_string(),
        };

        let id = entity
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| decode_error("missing 'id'"))?;
        let id = Uuid::parse_str(id).map_err(|e| decode_error(&e.to_string()))?;

        let name = entity
            .get("fullyQualifiedName")
            .or_else(|| entity.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(name) = name {
            self.by_name.insert((entity_type.to_string(), name), id);
        }

        self.by_id
            .entry(entity_type.to_string())
            .or_default()
            .insert(id, entity);
        Ok(())
    }

    pub fn insert_entity<T: CatalogEntity>(&mut self, entity: &T) -> Result<(), DomainError> {
        let value = serde_json::to_value(entity).map_err(|e| DomainError::EntityDecode {
            entity_type: T::ENTITY_TYPE.to_string(),
            reason: e.to_string(),
        })?;
        self.insert(T::ENTITY_TYPE, value)
    }

    /// All stored entities of a type, ordered by FQN for stable output.
    pub fn entities_of_type(&self, entity_type: &str) -> Vec<Value> {
        let mut entities: Vec<Value> = self
            .by_id
            .get(entity_type)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default();
        entities.sort_by_key(|e| {
            e.get("fullyQualifiedName")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        });
        entities
    }

    pub fn len(&self) -> usize {
        self.by_id.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Loads every `.json` / `.yaml` file under `dir`.
    #[instrument(skip(dir), fields(dir = %dir.display()))]
    pub fn load_dir(dir: &Path) -> Result<Self, InfrastructureError> {
        if !dir.is_dir() {
            return Err(InfrastructureError::CatalogLoad {
                path: dir.display().to_string(),
                reason: "not a directory".into(),
            });
        }

        let mut store = Self::new();
        let walker = WalkDir::new(dir).follow_links(true).sort_by_file_name();

        for entry in walker.into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.is_file()
                && let Some(ext) = path.extension().and_then(|s| s.to_str())
                && SUPPORTED_EXTENSIONS.contains(&ext)
            {
                store.load_file(path, ext)?;
            }
        }

        info!(entities = store.len(), "Catalog snapshot loaded");
        Ok(store)
    }

    fn load_file(&mut self, path: &Path, ext: &str) -> Result<(), InfrastructureError> {
        let load_error = |reason: String| InfrastructureError::CatalogLoad {
            path: path.display().to_string(),
            reason,
        };

        let content = fs::read_to_string(path)?;
        let file: SnapshotFile = if ext == "json" {
            serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| load_error(e.to_string()))?
        };

        let records = match file {
            SnapshotFile::Many(records) => records,
            SnapshotFile::One(record) => vec![record],
        };
        for record in records {
            self.insert(&record.entity_type, record.entity)
                .map_err(|e| load_error(e.to_string()))?;
        }
        debug!(path = %path.display(), "Snapshot file loaded");
        Ok(())
    }

    fn visible(&self, entity_type: &str, id: Uuid, include: Include) -> Option<&Value> {
        self.by_id
            .get(entity_type)
            .and_then(|m| m.get(&id))
            .filter(|e| {
                let deleted = e.get("deleted").and_then(Value::as_bool).unwrap_or(false);
                include.accepts(deleted)
            })
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn get_entity(
        &self,
        entity_type: &str,
        id: Uuid,
        _fields: &[&str],
        include: Include,
    ) -> Result<Value, DomainError> {
        self.visible(entity_type, id, include)
            .cloned()
            .ok_or_else(|| DomainError::EntityNotFound {
                entity_type: entity_type.to_string(),
                key: id.to_string(),
            })
    }

    async fn get_entity_by_name(
        &self,
        entity_type: &str,
        fqn: &str,
        _fields: &[&str],
        include: Include,
    ) -> Result<Value, DomainError> {
        self.by_name
            .get(&(entity_type.to_string(), fqn.to_string()))
            .and_then(|id| self.visible(entity_type, *id, include))
            .cloned()
            .ok_or_else(|| DomainError::EntityNotFound {
                entity_type: entity_type.to_string(),
                key: fqn.to_string(),
            })
    }

    async fn get_entity_or_null(
        &self,
        reference: &EntityReference,
        _fields: &[&str],
        include: Include,
    ) -> Result<Option<Value>, DomainError> {
        Ok(self
            .visible(&reference.entity_type, reference.id, include)
            .cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;
    use tempfile::tempdir;

    fn table(id: Uuid, fqn: &str, deleted: bool) -> Value {
        json!({ "id": id, "name": "orders", "fullyQualifiedName": fqn, "deleted": deleted })
    }

    #[tokio::test]
    async fn test_lookup_by_id_and_name() -> Result<()> {
        let id = Uuid::new_v4();
        let mut store = InMemoryEntityStore::new();
        store.insert("table", table(id, "svc.db.sch.orders", false))?;

        let by_id = store.get_entity("table", id, &[], Include::All).await?;
        let by_name = store
            .get_entity_by_name("table", "svc.db.sch.orders", &[], Include::All)
            .await?;
        assert_eq!(by_id, by_name);

        let missing = store.get_entity("table", Uuid::new_v4(), &[], Include::All).await;
        assert!(matches!(missing, Err(DomainError::EntityNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_include_policy_filters_soft_deleted() -> Result<()> {
        let id = Uuid::new_v4();
        let mut store = InMemoryEntityStore::new();
        store.insert("table", table(id, "svc.db.sch.old", true))?;

        assert!(store.get_entity("table", id, &[], Include::All).await.is_ok());
        assert!(store.get_entity("table", id, &[], Include::Deleted).await.is_ok());
        assert!(store.get_entity("table", id, &[], Include::NonDeleted).await.is_err());

        let reference = EntityReference::new(id, "table");
        assert!(
            store
                .get_entity_or_null(&reference, &[], Include::NonDeleted)
                .await?
                .is_none()
        );
        Ok(())
    }

    #[test]
    fn test_insert_requires_uuid_id() {
        let mut store = InMemoryEntityStore::new();
        assert!(store.insert("table", json!({ "name": "x" })).is_err());
        assert!(store.insert("table", json!({ "id": "nope" })).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_dir_reads_json_and_yaml() -> Result<()> {
        let dir = tempdir()?;
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        fs::write(
            dir.path().join("tables.json"),
            serde_json::to_string(&json!([
                { "entityType": "table", "entity": table(a, "svc.db.sch.a", false) }
            ]))?,
        )?;
        fs::create_dir(dir.path().join("nested"))?;
        fs::write(
            dir.path().join("nested/b.yaml"),
            format!(
                "entityType: table\nentity:\n  id: {}\n  name: b\n  fullyQualifiedName: svc.db.sch.b\n",
                b
            ),
        )?;
        fs::write(dir.path().join("README.md"), "ignored")?;

        let store = InMemoryEntityStore::load_dir(dir.path())?;
        assert_eq!(store.len(), 2);
        let fqns: Vec<Value> = store
            .entities_of_type("table")
            .into_iter()
            .map(|e| e["fullyQualifiedName"].clone())
            .collect();
        assert_eq!(fqns, vec![json!("svc.db.sch.a"), json!("svc.db.sch.b")]);
        Ok(())
    }

    #[test]
    fn test_load_dir_reports_bad_file() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("broken.json"), "{ not json")?;
        let err = InMemoryEntityStore::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, InfrastructureError::CatalogLoad { .. }));
        Ok(())
    }
}
