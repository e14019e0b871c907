// metaindex-core/src/domain/search/suggest.rs

use serde::{Deserialize, Serialize};

/// Autocomplete entry. Higher weight ranks first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSuggest {
    pub input: String,
    pub weight: u32,
}

impl SearchSuggest {
    pub fn new(input: impl Into<String>, weight: u32) -> Self {
        Self {
            input: input.into(),
            weight,
        }
    }
}
