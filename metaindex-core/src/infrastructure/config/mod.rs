pub mod indexer;

pub use indexer::{IndexerConfig, load_indexer_config};
