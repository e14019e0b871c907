// metaindex-core/src/domain/catalog/table.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CatalogEntity, EntityReference};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: Uuid,
    pub name: String,
    pub fully_qualified_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    // Containment chain: service > database > schema > table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<EntityReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_schema: Option<EntityReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<EntityReference>,

    #[serde(default)]
    pub deleted: bool,
}

impl CatalogEntity for Table {
    const ENTITY_TYPE: &'static str = super::TABLE;
}

impl Table {
    pub fn entity_reference(&self) -> EntityReference {
        EntityReference {
            id: self.id,
            entity_type: super::TABLE.to_string(),
            name: Some(self.name.clone()),
            fully_qualified_name: Some(self.fully_qualified_name.clone()),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            deleted: Some(self.deleted),
            href: None,
        }
    }
}
