// metaindex-core/src/ports/mod.rs

pub mod entity_store;

pub use entity_store::{EntityStore, Include};
