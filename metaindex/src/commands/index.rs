// metaindex/src/commands/index.rs
//
// USE CASE: Build the test case search documents of a catalog snapshot.

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use serde_json::Value;
use std::path::PathBuf;

use metaindex_core::application::{TestCaseIndexer, TestSuiteParentRelations, index_test_cases};
use metaindex_core::domain::catalog::TEST_CASE;
use metaindex_core::infrastructure::adapters::InMemoryEntityStore;
use metaindex_core::infrastructure::config::load_indexer_config;
use metaindex_core::infrastructure::fs::{write_json_atomic, write_ndjson_atomic};

pub const DOCUMENTS_FILE: &str = "test_case_search_index.ndjson";
pub const RUN_FILE: &str = "index_run.json";

pub async fn execute(project_dir: PathBuf, test_case: Option<String>) -> anyhow::Result<()> {
    // A. Load the Config (Infra)
    println!("⚙️  Loading configuration...");
    let config = load_indexer_config(&project_dir).with_context(|| {
        format!("Failed to load indexer configuration from {:?}", project_dir)
    })?;

    // B. Load the catalog snapshot (Adapter behind the EntityStore port)
    let catalog_dir = project_dir.join(&config.catalog_path);
    let store = InMemoryEntityStore::load_dir(&catalog_dir)
        .with_context(|| format!("Failed to load catalog snapshot from {:?}", catalog_dir))?;
    println!("   Catalog: {} entities", store.len());

    let mut test_cases = store.entities_of_type(TEST_CASE);
    if let Some(fqn) = &test_case {
        test_cases.retain(|tc| tc.get("fullyQualifiedName").and_then(Value::as_str) == Some(fqn));
        if test_cases.is_empty() {
            anyhow::bail!("❌ Test case '{}' not found in the catalog snapshot", fqn);
        }
    }

    // C. Build the documents (Application Layer)
    let relations = TestSuiteParentRelations {
        include: config.include,
    };
    let indexer = TestCaseIndexer::new(&store, &relations).with_include(config.include);
    let report = index_test_cases(&indexer, &test_cases, config.concurrency).await;

    // D. Write the bulk file + run artifact
    let target_dir = project_dir.join(&config.target_path);
    let documents_path = target_dir.join(DOCUMENTS_FILE);
    write_ndjson_atomic(&documents_path, &report.documents)
        .with_context(|| format!("Failed to write {:?}", documents_path))?;
    write_json_atomic(target_dir.join(RUN_FILE), &report.summary())?;

    print_summary(&report.documents);
    println!("📄 Documents written to {}", documents_path.display());

    if !report.is_success() {
        eprintln!("\n❌ {} test case(s) could not be indexed:", report.failures.len());
        for failure in &report.failures {
            eprintln!("   ➜ {}: {}", failure.test_case, failure.error);
        }
        std::process::exit(1);
    }

    println!("\n✨ SUCCESS! {} test case(s) indexed", report.documents.len());
    Ok(())
}

fn print_summary(documents: &[serde_json::Map<String, Value>]) {
    let text = |doc: &serde_json::Map<String, Value>, path: &[&str]| -> String {
        let mut value = doc.get(path[0]);
        for key in &path[1..] {
            value = value.and_then(|v| v.get(*key));
        }
        match value {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "-".to_string(),
            Some(other) => other.to_string(),
        }
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Test case",
        "Table",
        "Type",
        "Dimension",
        "Platforms",
    ]);
    for doc in documents {
        table.add_row(vec![
            text(doc, &["fullyQualifiedName"]),
            text(doc, &["table", "fullyQualifiedName"]),
            text(doc, &["testCaseType"]),
            text(doc, &["dataQualityDimension"]),
            text(doc, &["testPlatforms"]),
        ]);
    }
    println!("{table}");
}
