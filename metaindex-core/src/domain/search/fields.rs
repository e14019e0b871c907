// metaindex-core/src/domain/search/fields.rs

use std::collections::BTreeMap;

/// Query-time boost per indexed field. Changing a weight changes ranking, not matching.
pub type FieldWeights = BTreeMap<String, f32>;

/// Baseline shared by every entity index.
pub fn default_fields() -> FieldWeights {
    [
        ("name", 10.0),
        ("name.keyword", 10.0),
        ("name.ngram", 1.0),
        ("displayName", 10.0),
        ("displayName.ngram", 1.0),
        ("description", 2.0),
        ("fullyQualifiedName", 5.0),
        ("fqnParts", 5.0),
    ]
    .into_iter()
    .map(|(field, weight)| (field.to_string(), weight))
    .collect()
}

/// Merges `overrides` over `base`; an override wins on the same field.
pub fn merge(mut base: FieldWeights, overrides: &FieldWeights) -> FieldWeights {
    base.extend(overrides.iter().map(|(k, v)| (k.clone(), *v)));
    base
}
