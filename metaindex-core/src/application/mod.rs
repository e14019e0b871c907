// metaindex-core/src/application/mod.rs

pub mod indexing;
pub mod migration;
pub mod relations;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use metaindex_core::application::{TestCaseIndexer, migrate_connection};`

pub use indexing::{IndexFailure, IndexReport, IndexRun, TestCaseIndexer, index_test_cases};
pub use migration::migrate_connection;
pub use relations::{ParentRelationWriter, TestSuiteParentRelations};
