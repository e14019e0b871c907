// metaindex-core/src/application/indexing.rs

use chrono::Utc;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::application::relations::ParentRelationWriter;
use crate::domain::catalog::{EntityLink, TEST_CASE, Table, TestCase, TestDefinition, TestSuite};
use crate::domain::error::DomainError;
use crate::domain::search::SearchDocument;
use crate::domain::search::document::{base_document, put_table_facets};
use crate::domain::search::test_case::{put_test_case_fields, remove_non_indexable_fields};
use crate::error::MetaindexError;
use crate::ports::entity_store::{EntityStore, Include, decode, fetch, fetch_by_name, fetch_or_null};

/// Builds search documents for test cases. Every lookup goes through the
/// injected store; a failed lookup fails the whole document.
pub struct TestCaseIndexer<'a> {
    store: &'a dyn EntityStore,
    relations: &'a dyn ParentRelationWriter,
    include: Include,
}

impl<'a> TestCaseIndexer<'a> {
    pub fn new(store: &'a dyn EntityStore, relations: &'a dyn ParentRelationWriter) -> Self {
        Self {
            store,
            relations,
            include: Include::All,
        }
    }

    pub fn with_include(mut self, include: Include) -> Self {
        self.include = include;
        self
    }

    /// Base step + test case fields, starting from the entity as stored.
    pub async fn build_search_document(&self, raw: &Value) -> Result<SearchDocument, MetaindexError> {
        let test_case: TestCase = decode(raw.clone())?;
        let mut doc = base_document(TEST_CASE, raw)?;
        remove_non_indexable_fields(&mut doc);
        self.build(&test_case, doc).await
    }

    /// Adds the test case specific fields to a document that already carries
    /// the generic entity fields.
    #[instrument(skip_all, fields(test_case = %test_case.fully_qualified_name))]
    pub async fn build(
        &self,
        test_case: &TestCase,
        mut doc: SearchDocument,
    ) -> Result<SearchDocument, MetaindexError> {
        let definition: TestDefinition =
            fetch(self.store, test_case.test_definition.id, self.include).await?;

        let link = put_test_case_fields(&mut doc, test_case, &definition)?;

        self.set_parent_relationships(test_case, &mut doc).await?;
        self.add_executable_entity_reference(&link, &mut doc).await?;

        Ok(doc)
    }

    async fn set_parent_relationships(
        &self,
        test_case: &TestCase,
        doc: &mut SearchDocument,
    ) -> Result<(), DomainError> {
        // TODO: denormalize every suite, not only the first one
        let Some(suite_ref) = test_case.first_test_suite() else {
            debug!("No test suite to denormalize");
            return Ok(());
        };

        let suite: TestSuite = fetch_or_null(self.store, suite_ref, self.include)
            .await?
            .ok_or_else(|| {
                DomainError::MissingTestSuite(
                    suite_ref
                        .fully_qualified_name
                        .clone()
                        .unwrap_or_else(|| suite_ref.id.to_string()),
                )
            })?;

        match &suite.executable_entity_reference {
            Some(executable) => {
                self.relations
                    .add_parent_relations(self.store, executable, doc)
                    .await
            }
            None => {
                debug!(suite = %suite.name, "Logical suite, no executable entity");
                Ok(())
            }
        }
    }

    async fn add_executable_entity_reference(
        &self,
        link: &EntityLink,
        doc: &mut SearchDocument,
    ) -> Result<(), DomainError> {
        let table_fqn = link.table_fqn()?;
        let table: Table = fetch_by_name(self.store, &table_fqn, self.include).await?;
        put_table_facets(doc, &table)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexFailure {
    pub test_case: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct IndexReport {
    /// Ordered by fully qualified name.
    pub documents: Vec<SearchDocument>,
    pub failures: Vec<IndexFailure>,
}

impl IndexReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn summary(&self) -> IndexRun {
        IndexRun {
            generated_at: Utc::now().to_rfc3339(),
            indexed: self.documents.len(),
            failed: self.failures.len(),
            failures: self.failures.clone(),
        }
    }
}

/// Run artifact written next to the documents.
#[derive(Debug, Serialize)]
pub struct IndexRun {
    pub generated_at: String,
    pub indexed: usize,
    pub failed: usize,
    pub failures: Vec<IndexFailure>,
}

/// Indexes a batch of raw test cases, at most `concurrency` at a time.
/// A failed record is reported and skipped; retrying is the caller's call.
#[instrument(skip_all, fields(batch.size = raw_test_cases.len(), concurrency = concurrency))]
pub async fn index_test_cases(
    indexer: &TestCaseIndexer<'_>,
    raw_test_cases: &[Value],
    concurrency: usize,
) -> IndexReport {
    let start = Instant::now();

    let results: Vec<(String, Result<SearchDocument, MetaindexError>)> =
        stream::iter(raw_test_cases)
            .map(|raw| async move {
                let label = raw
                    .get("fullyQualifiedName")
                    .or_else(|| raw.get("id"))
                    .and_then(Value::as_str)
                    .unwrap_or("<unnamed>")
                    .to_string();
                (label, indexer.build_search_document(raw).await)
            })
            .buffer_unordered(concurrency.max(1))
            .collect()
            .await;

    let mut report = IndexReport::default();
    for (label, result) in results {
        match result {
            Ok(doc) => report.documents.push(doc),
            Err(e) => {
                warn!(test_case = %label, error = %e, "Test case skipped");
                report.failures.push(IndexFailure {
                    test_case: label,
                    error: e.to_string(),
                });
            }
        }
    }

    report.documents.sort_by(|a, b| fqn_of(a).cmp(fqn_of(b)));
    report.failures.sort_by(|a, b| a.test_case.cmp(&b.test_case));

    info!(
        indexed = report.documents.len(),
        failed = report.failures.len(),
        "Batch indexed in {:.2?}",
        start.elapsed()
    );
    report
}

fn fqn_of(doc: &SearchDocument) -> &str {
    doc.get("fullyQualifiedName")
        .and_then(Value::as_str)
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::relations::TestSuiteParentRelations;
    use crate::infrastructure::adapters::InMemoryEntityStore;
    use serde_json::json;
    use uuid::Uuid;

    struct Fixture {
        store: InMemoryEntityStore,
        definition_id: Uuid,
        suite_id: Uuid,
        logical_suite_id: Uuid,
    }

    fn fixture() -> anyhow::Result<Fixture> {
        let mut store = InMemoryEntityStore::new();
        let definition_id = Uuid::new_v4();
        let table_id = Uuid::new_v4();
        let suite_id = Uuid::new_v4();
        let logical_suite_id = Uuid::new_v4();

        store.insert(
            "testDefinition",
            json!({
                "id": definition_id,
                "name": "columnValuesToBeNotNull",
                "testPlatforms": ["OpenMetadata"],
                "dataQualityDimension": "Completeness",
                "entityType": "COLUMN",
                "deleted": true
            }),
        )?;
        store.insert(
            "table",
            json!({
                "id": table_id,
                "name": "table",
                "fullyQualifiedName": "db.schema.table",
                "database": { "id": Uuid::new_v4(), "type": "database", "name": "db" },
                "databaseSchema": { "id": Uuid::new_v4(), "type": "databaseSchema", "name": "schema" },
                "service": { "id": Uuid::new_v4(), "type": "databaseService", "name": "mysql_prod" }
            }),
        )?;
        store.insert(
            "testSuite",
            json!({
                "id": suite_id,
                "name": "db.schema.table.testSuite",
                "basic": true,
                "executableEntityReference": { "id": table_id, "type": "table" }
            }),
        )?;
        store.insert(
            "testSuite",
            json!({ "id": logical_suite_id, "name": "critical_checks" }),
        )?;

        Ok(Fixture {
            store,
            definition_id,
            suite_id,
            logical_suite_id,
        })
    }

    fn raw_test_case(f: &Fixture, entity_link: &str, suites: Value) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "name": "col_not_null",
            "fullyQualifiedName": "db.schema.table.col.col_not_null",
            "entityLink": entity_link,
            "testDefinition": { "id": f.definition_id, "type": "testDefinition" },
            "testSuites": suites,
            "owners": [{ "id": Uuid::new_v4(), "type": "user", "name": "alice" }],
            "followers": [],
            "tags": [{ "tagFQN": "Tier.Tier1" }],
            "changeDescription": { "previousVersion": 0.1 },
            "failedRowsSample": { "columns": ["col"], "rows": [[null]] }
        })
    }

    #[tokio::test]
    async fn test_build_full_document() -> anyhow::Result<()> {
        let f = fixture()?;
        let relations = TestSuiteParentRelations::default();
        let indexer = TestCaseIndexer::new(&f.store, &relations);

        let raw = raw_test_case(
            &f,
            "column::db.schema.table.col::description",
            json!([{ "id": f.suite_id, "type": "testSuite" }]),
        );
        let doc = indexer.build_search_document(&raw).await?;

        for field in [
            "testPlatforms",
            "dataQualityDimension",
            "testCaseType",
            "table",
            "database",
            "databaseSchema",
            "service",
        ] {
            assert!(!doc[field].is_null(), "{} is null", field);
        }
        assert_eq!(doc["table"]["fullyQualifiedName"], json!("db.schema.table"));
        assert_eq!(doc["originEntityFQN"], json!("db.schema.table.col"));
        assert_eq!(doc["testCaseType"], json!("COLUMN"));

        let weights: Vec<u64> = doc["suggest"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["weight"].as_u64().unwrap())
            .collect();
        assert_eq!(weights, vec![5, 10]);

        assert!(!doc.contains_key("changeDescription"));
        assert!(!doc.contains_key("failedRowsSample"));
        // generic fields from the base step survive
        assert_eq!(doc["entityLink"], json!("column::db.schema.table.col::description"));
        Ok(())
    }

    #[tokio::test]
    async fn test_embedded_suite_object_is_resolved_and_cleaned() -> anyhow::Result<()> {
        let f = fixture()?;
        let relations = TestSuiteParentRelations::default();
        let indexer = TestCaseIndexer::new(&f.store, &relations);

        let raw = raw_test_case(
            &f,
            "<#E::table::db.schema.table>",
            json!([{
                "id": f.suite_id,
                "name": "db.schema.table.testSuite",
                "fullyQualifiedName": "db.schema.table.testSuite",
                "basic": true,
                "changeDescription": { "previousVersion": 0.2 }
            }]),
        );
        let doc = indexer.build_search_document(&raw).await?;

        let suite = &doc["testSuites"][0];
        assert_eq!(suite["fullyQualifiedName"], json!("db.schema.table.testSuite"));
        assert!(suite.get("changeDescription").is_none());
        assert_eq!(doc["service"]["name"], json!("mysql_prod"));
        Ok(())
    }

    #[tokio::test]
    async fn test_null_or_empty_suites_are_skipped() -> anyhow::Result<()> {
        let f = fixture()?;
        let relations = TestSuiteParentRelations::default();
        let indexer = TestCaseIndexer::new(&f.store, &relations);

        for suites in [json!([]), json!([null]), json!([null, { "id": Uuid::new_v4(), "type": "testSuite" }])] {
            let raw = raw_test_case(&f, "<#E::table::db.schema.table>", suites);
            let doc = indexer.build_search_document(&raw).await?;
            assert_eq!(doc["table"]["name"], json!("table"));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_logical_suite_writes_no_parent_facets() -> anyhow::Result<()> {
        let f = fixture()?;
        let relations = TestSuiteParentRelations::default();
        let indexer = TestCaseIndexer::new(&f.store, &relations);

        let raw = raw_test_case(
            &f,
            "<#E::table::db.schema.table>",
            json!([{ "id": f.logical_suite_id, "type": "testSuite" }]),
        );
        assert!(indexer.build_search_document(&raw).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_definition_fails_the_build() -> anyhow::Result<()> {
        let f = fixture()?;
        let relations = TestSuiteParentRelations::default();
        let indexer = TestCaseIndexer::new(&f.store, &relations);

        let mut raw = raw_test_case(&f, "<#E::table::db.schema.table>", json!([]));
        raw["testDefinition"]["id"] = json!(Uuid::new_v4());
        let result = indexer.build_search_document(&raw).await;
        assert!(matches!(
            result,
            Err(MetaindexError::Domain(DomainError::EntityNotFound { .. }))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_soft_deleted_definition_depends_on_include() -> anyhow::Result<()> {
        let f = fixture()?;
        let relations = TestSuiteParentRelations::default();
        let raw = raw_test_case(&f, "<#E::table::db.schema.table>", json!([]));

        let all = TestCaseIndexer::new(&f.store, &relations);
        assert!(all.build_search_document(&raw).await.is_ok());

        let live_only = TestCaseIndexer::new(&f.store, &relations).with_include(Include::NonDeleted);
        assert!(live_only.build_search_document(&raw).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_suite_or_table_fails_the_build() -> anyhow::Result<()> {
        let f = fixture()?;
        let relations = TestSuiteParentRelations::default();
        let indexer = TestCaseIndexer::new(&f.store, &relations);

        let raw = raw_test_case(
            &f,
            "<#E::table::db.schema.table>",
            json!([{ "id": Uuid::new_v4(), "type": "testSuite" }]),
        );
        assert!(matches!(
            indexer.build_search_document(&raw).await,
            Err(MetaindexError::Domain(DomainError::MissingTestSuite(_)))
        ));

        let raw = raw_test_case(&f, "<#E::table::db.schema.other>", json!([]));
        assert!(matches!(
            indexer.build_search_document(&raw).await,
            Err(MetaindexError::Domain(DomainError::EntityNotFound { .. }))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_batch_reports_failures_and_keeps_going() -> anyhow::Result<()> {
        let f = fixture()?;
        let relations = TestSuiteParentRelations::default();
        let indexer = TestCaseIndexer::new(&f.store, &relations);

        let good = raw_test_case(&f, "<#E::table::db.schema.table>", json!([]));
        let mut bad = raw_test_case(&f, "broken link", json!([]));
        bad["fullyQualifiedName"] = json!("db.schema.table.broken");

        let report = index_test_cases(&indexer, &[good, bad], 4).await;
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].test_case, "db.schema.table.broken");
        assert!(!report.is_success());

        let run = report.summary();
        assert_eq!((run.indexed, run.failed), (1, 1));
        Ok(())
    }
}
