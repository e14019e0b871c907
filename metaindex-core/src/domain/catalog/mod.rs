// metaindex-core/src/domain/catalog/mod.rs

pub mod entity_link;
pub mod fqn;
pub mod reference;
pub mod table;
pub mod test_case;

pub use entity_link::EntityLink;
pub use reference::{EntityReference, TagLabel};
pub use table::Table;
pub use test_case::{
    DataQualityDimension, TestCase, TestDefinition, TestDefinitionEntityType, TestPlatform,
    TestSuite,
};

use serde::{Serialize, de::DeserializeOwned};

// Entity type names, as they appear in references and entity links.
pub const TABLE: &str = "table";
pub const COLUMN: &str = "column";
pub const TEST_CASE: &str = "testCase";
pub const TEST_DEFINITION: &str = "testDefinition";
pub const TEST_SUITE: &str = "testSuite";

/// A catalog entity that can be fetched from the entity store and decoded.
pub trait CatalogEntity: Serialize + DeserializeOwned + Send {
    const ENTITY_TYPE: &'static str;
}
