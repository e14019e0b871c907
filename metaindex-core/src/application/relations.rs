// metaindex-core/src/application/relations.rs

use async_trait::async_trait;
use tracing::debug;

use crate::domain::catalog::{EntityReference, TABLE, Table};
use crate::domain::error::DomainError;
use crate::domain::search::SearchDocument;
use crate::domain::search::document::put_table_facets;
use crate::ports::entity_store::{EntityStore, Include, fetch};

/// Writes the facets a test suite contributes to the documents of its test cases.
#[async_trait]
pub trait ParentRelationWriter: Send + Sync {
    async fn add_parent_relations(
        &self,
        store: &dyn EntityStore,
        executable: &EntityReference,
        doc: &mut SearchDocument,
    ) -> Result<(), DomainError>;
}

/// Table backed suites expose the table containment chain. Other executable
/// entities (pipelines...) contribute nothing yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestSuiteParentRelations {
    pub include: Include,
}

#[async_trait]
impl ParentRelationWriter for TestSuiteParentRelations {
    async fn add_parent_relations(
        &self,
        store: &dyn EntityStore,
        executable: &EntityReference,
        doc: &mut SearchDocument,
    ) -> Result<(), DomainError> {
        if executable.entity_type != TABLE {
            debug!(entity_type = %executable.entity_type, "No parent facets for this executable type");
            return Ok(());
        }
        let table: Table = fetch(store, executable.id, self.include).await?;
        put_table_facets(doc, &table)
    }
}
