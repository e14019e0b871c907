// metaindex-core/src/ports/entity_store.rs

// What the indexers need from the catalog, without knowing where it lives
// (REST API, database, snapshot on disk...).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::catalog::{CatalogEntity, EntityReference};
use crate::domain::error::DomainError;

/// Soft-delete policy of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Include {
    NonDeleted,
    Deleted,
    #[default]
    All,
}

impl Include {
    pub fn accepts(&self, deleted: bool) -> bool {
        match self {
            Self::NonDeleted => !deleted,
            Self::Deleted => deleted,
            Self::All => true,
        }
    }
}

#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Fails with `EntityNotFound` when nothing matches.
    async fn get_entity(
        &self,
        entity_type: &str,
        id: Uuid,
        fields: &[&str],
        include: Include,
    ) -> Result<Value, DomainError>;

    /// Fails with `EntityNotFound` when nothing matches.
    async fn get_entity_by_name(
        &self,
        entity_type: &str,
        fqn: &str,
        fields: &[&str],
        include: Include,
    ) -> Result<Value, DomainError>;

    /// `None` when the referenced entity does not exist.
    async fn get_entity_or_null(
        &self,
        reference: &EntityReference,
        fields: &[&str],
        include: Include,
    ) -> Result<Option<Value>, DomainError>;
}

// --- TYPED HELPERS ---

pub fn decode<T: CatalogEntity>(value: Value) -> Result<T, DomainError> {
    serde_json::from_value(value).map_err(|e| DomainError::EntityDecode {
        entity_type: T::ENTITY_TYPE.to_string(),
        reason: e.to_string(),
    })
}

pub async fn fetch<T: CatalogEntity>(
    store: &dyn EntityStore,
    id: Uuid,
    include: Include,
) -> Result<T, DomainError> {
    decode(store.get_entity(T::ENTITY_TYPE, id, &[], include).await?)
}

pub async fn fetch_by_name<T: CatalogEntity>(
    store: &dyn EntityStore,
    fqn: &str,
    include: Include,
) -> Result<T, DomainError> {
    decode(store.get_entity_by_name(T::ENTITY_TYPE, fqn, &[], include).await?)
}

pub async fn fetch_or_null<T: CatalogEntity>(
    store: &dyn EntityStore,
    reference: &EntityReference,
    include: Include,
) -> Result<Option<T>, DomainError> {
    store
        .get_entity_or_null(reference, &[], include)
        .await?
        .map(decode)
        .transpose()
}
