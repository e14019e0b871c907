// metaindex-core/src/domain/search/mod.rs

pub mod document;
pub mod fields;
pub mod suggest;
pub mod test_case;

pub use document::SearchDocument;
pub use fields::FieldWeights;
pub use suggest::SearchSuggest;
