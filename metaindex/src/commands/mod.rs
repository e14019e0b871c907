// metaindex/src/commands/mod.rs

pub mod fields;
pub mod index;
pub mod migrate;
