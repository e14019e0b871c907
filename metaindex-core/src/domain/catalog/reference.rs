// metaindex-core/src/domain/catalog/reference.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lightweight pointer to another catalog entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReference {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl EntityReference {
    pub fn new(id: Uuid, entity_type: &str) -> Self {
        Self {
            id,
            entity_type: entity_type.to_string(),
            name: None,
            fully_qualified_name: None,
            display_name: None,
            description: None,
            deleted: None,
            href: None,
        }
    }

    pub fn with_name(mut self, name: &str, fqn: &str) -> Self {
        self.name = Some(name.to_string());
        self.fully_qualified_name = Some(fqn.to_string());
        self
    }

    /// Search results render `displayName`; fall back to `name` when it is blank.
    pub fn with_display_name_fallback(mut self) -> Self {
        let blank = self
            .display_name
            .as_deref()
            .is_none_or(|d| d.trim().is_empty());
        if blank {
            self.display_name = self.name.clone();
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TagSource {
    #[default]
    Classification,
    Glossary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LabelType {
    #[default]
    Manual,
    Propagated,
    Automated,
    Derived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TagState {
    Suggested,
    #[default]
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagLabel {
    #[serde(rename = "tagFQN")]
    pub tag_fqn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub source: TagSource,
    #[serde(default)]
    pub label_type: LabelType,
    #[serde(default)]
    pub state: TagState,
}
