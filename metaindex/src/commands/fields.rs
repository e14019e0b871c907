// metaindex/src/commands/fields.rs
//
// USE CASE: Show the query-time field boosts of the test case index.

use comfy_table::{Table, presets::UTF8_FULL};
use std::path::PathBuf;

use metaindex_core::domain::search::fields::merge;
use metaindex_core::domain::search::test_case::search_fields;
use metaindex_core::infrastructure::config::load_indexer_config;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let config = load_indexer_config(&project_dir)?;
    let weights = merge(search_fields(), &config.field_weights);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Field", "Weight"]);
    for (field, weight) in &weights {
        table.add_row(vec![field.clone(), format!("{:.1}", weight)]);
    }
    println!("{table}");
    Ok(())
}
