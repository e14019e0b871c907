// metaindex-core/src/domain/connection/variant.rs
//
// Polymorphic configuration fields. Deserialization never guesses a variant:
// the payload is kept raw until `try_to_convert` walks an explicit, ordered
// list of candidates.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Variant<T> {
    /// Recognized shape.
    Typed(T),
    /// Payload as received; no candidate matched (yet).
    Raw(Value),
}

impl<T> Variant<T> {
    pub fn typed(&self) -> Option<&T> {
        match self {
            Self::Typed(t) => Some(t),
            Self::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&Value> {
        match self {
            Self::Typed(_) => None,
            Self::Raw(v) => Some(v),
        }
    }
}

impl<T: Serialize> Serialize for Variant<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Typed(t) => t.serialize(serializer),
            Self::Raw(v) => v.serialize(serializer),
        }
    }
}

impl<'de, T> Deserialize<'de> for Variant<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::Raw)
    }
}

/// `deserialize_with` helper for optional polymorphic fields: an explicit
/// `null` is kept as `Raw(Null)` so it is written back, a missing field stays `None`.
pub fn keep_null<'de, D, T>(deserializer: D) -> Result<Option<Variant<T>>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|v| Some(Variant::Raw(v)))
}

/// One entry of an ordered candidate list.
pub struct Candidate<T> {
    pub name: &'static str,
    pub coerce: fn(&Value) -> Option<T>,
}

/// Structural coercion: succeeds only when every required field is present and
/// well typed, and nothing is left over (targets deny unknown fields).
pub fn coerce<V: DeserializeOwned>(value: &Value) -> Option<V> {
    V::deserialize(value).ok()
}

/// First candidate that accepts the raw payload wins. Already typed or
/// unmatched fields are returned as is.
pub fn try_to_convert<T>(field: Option<Variant<T>>, candidates: &[Candidate<T>]) -> Option<Variant<T>> {
    match field {
        Some(Variant::Raw(raw)) => {
            for candidate in candidates {
                if let Some(typed) = (candidate.coerce)(&raw) {
                    debug!(variant = candidate.name, "Polymorphic field resolved");
                    return Some(Variant::Typed(typed));
                }
            }
            debug!("No candidate matched, field kept as is");
            Some(Variant::Raw(raw))
        }
        other => other,
    }
}
