//! Deep merge of config documents
//!
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars: override (last wins)

use crate::value::{Mapping, Value};

/// Deep merge two values.
///
/// Merge semantics:
/// - Objects: every key of `existing`, then each key of `incoming` on top,
///   recursing where both sides have the key
/// - Arrays: REPLACE (incoming wins entirely)
/// - Scalars and type mismatches: incoming wins
/// - Null: override (null can override any value)
pub fn deep_merge(existing: Value, incoming: Value) -> Value {
    match (existing, incoming) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            merge_into(&mut base, overlay);
            Value::Object(base)
        }
        (_, incoming) => incoming,
    }
}

/// Merge `incoming` into `base` in place, key by key.
pub fn merge_into(base: &mut Mapping, incoming: Mapping) {
    for (key, incoming_value) in incoming {
        let merged = match base.remove(&key) {
            Some(existing) => deep_merge(existing, incoming_value),
            None => incoming_value,
        };
        base.insert(key, merged);
    }
}

/// Fold documents in order; the last document has the highest precedence.
pub fn merge_documents<I>(documents: I) -> Mapping
where
    I: IntoIterator<Item = Mapping>,
{
    documents.into_iter().fold(Mapping::new(), |mut acc, doc| {
        merge_into(&mut acc, doc);
        acc
    })
}
