// metaindex-core/src/domain/catalog/test_case.rs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{CatalogEntity, EntityReference, TagLabel};

/// A data-quality check bound to a table or a column through its entity link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: Uuid,
    pub name: String,
    pub fully_qualified_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub entity_link: String,
    pub test_definition: EntityReference,

    // Entries can be null in legacy payloads, or whole suites without `type`.
    #[serde(default, deserialize_with = "suite_references")]
    pub test_suites: Vec<Option<EntityReference>>,

    #[serde(default)]
    pub tags: Vec<TagLabel>,
    #[serde(default)]
    pub owners: Vec<EntityReference>,
    #[serde(default)]
    pub followers: Vec<EntityReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_description: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_rows_sample: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

/// Suite entry as found in `testSuites`: a reference or an embedded suite.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SuiteEntry {
    id: Uuid,
    #[serde(rename = "type", default = "test_suite_type")]
    entity_type: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    fully_qualified_name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    deleted: Option<bool>,
    #[serde(default)]
    href: Option<String>,
}

fn test_suite_type() -> String {
    super::TEST_SUITE.to_string()
}

impl From<SuiteEntry> for EntityReference {
    fn from(entry: SuiteEntry) -> Self {
        EntityReference {
            id: entry.id,
            entity_type: entry.entity_type,
            name: entry.name,
            fully_qualified_name: entry.fully_qualified_name,
            display_name: entry.display_name,
            description: entry.description,
            deleted: entry.deleted,
            href: entry.href,
        }
    }
}

fn suite_references<'de, D>(deserializer: D) -> Result<Vec<Option<EntityReference>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Option<SuiteEntry>>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(|entry| entry.map(EntityReference::from))
        .collect())
}

impl CatalogEntity for TestCase {
    const ENTITY_TYPE: &'static str = super::TEST_CASE;
}

impl TestCase {
    /// Only the first suite is denormalized into search documents.
    pub fn first_test_suite(&self) -> Option<&EntityReference> {
        self.test_suites.first().and_then(Option::as_ref)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestPlatform {
    OpenMetadata,
    GreatExpectations,
    #[serde(rename = "DBT")]
    Dbt,
    Deequ,
    Soda,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataQualityDimension {
    Completeness,
    Accuracy,
    Consistency,
    Validity,
    Uniqueness,
    Integrity,
    #[serde(rename = "SQL")]
    Sql,
    NoDimension,
}

/// What a test definition applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TestDefinitionEntityType {
    Table,
    Column,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDefinition {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub test_platforms: Vec<TestPlatform>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_quality_dimension: Option<DataQualityDimension>,
    pub entity_type: TestDefinitionEntityType,
    #[serde(default)]
    pub deleted: bool,
}

impl CatalogEntity for TestDefinition {
    const ENTITY_TYPE: &'static str = super::TEST_DEFINITION;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Table (or pipeline) the suite runs against. Logical suites have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable_entity_reference: Option<EntityReference>,
    #[serde(default)]
    pub basic: bool,
    #[serde(default)]
    pub deleted: bool,
}

impl CatalogEntity for TestSuite {
    const ENTITY_TYPE: &'static str = super::TEST_SUITE;
}
