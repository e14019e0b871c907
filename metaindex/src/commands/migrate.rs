// metaindex/src/commands/migrate.rs
//
// USE CASE: Normalize a raw connection config before it reaches the secrets store.

use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

use metaindex_core::application::migrate_connection;
use metaindex_core::domain::connection::ConverterRegistry;
use metaindex_core::infrastructure::fs::write_json_atomic;

pub fn execute(input: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let content =
        fs::read_to_string(&input).with_context(|| format!("Failed to read {:?}", input))?;
    let raw: Value = serde_json::from_str(&content)
        .with_context(|| format!("{:?} is not valid JSON", input))?;

    let registry = ConverterRegistry::default();
    let migrated = migrate_connection(&registry, &raw)?;

    match output {
        Some(path) => {
            write_json_atomic(&path, &migrated)?;
            eprintln!("✨ Migrated config written to {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&migrated)?),
    }
    Ok(())
}
