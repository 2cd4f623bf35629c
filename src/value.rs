//! Value model for the config store.
//!
//! Every decoded document is normalized into `serde_json::Value`, which is
//! already the tagged union the store needs:
//! `Null | Bool | Number | String | Array | Object`.

pub use serde_json::{Map, Number, Value};

/// A string-keyed mapping of values; the shape of every decoded document.
pub type Mapping = Map<String, Value>;

/// Convert a float into a value, mapping NaN and infinities to `Null` since
/// JSON numbers cannot carry them.
pub(crate) fn float_value(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}
