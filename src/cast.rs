//! Best-effort coercion of config values.
//!
//! Every function returns the target type's zero value when the input is
//! absent or cannot be converted. Callers that need to tell the two apart
//! check existence first.

use crate::value::{Mapping, Value};

/// Strings as-is, numbers and booleans formatted, anything else empty.
pub fn to_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Integers as-is, floats truncated toward zero, booleans as 1/0, and
/// strings parsed as decimal or `0x` hexadecimal.
pub fn to_int(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                i
            } else if let Some(u) = n.as_u64() {
                i64::try_from(u).unwrap_or(0)
            } else {
                n.as_f64().map(|f| f.trunc() as i64).unwrap_or(0)
            }
        }
        Some(Value::Bool(b)) => i64::from(*b),
        Some(Value::String(s)) => parse_int(s.trim()).unwrap_or(0),
        _ => 0,
    }
}

/// Booleans as-is, non-zero numbers true, and the usual spellings of
/// true/false for strings.
pub fn to_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => parse_bool(s.trim()).unwrap_or(false),
        _ => false,
    }
}

/// Numbers as floats, booleans as 1/0, and strings parsed as floats.
pub fn to_float(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Sequences element-wise through [`to_string`]; a string splits on
/// whitespace.
pub fn to_string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(|v| to_string(Some(v))).collect(),
        Some(Value::String(s)) => s.split_whitespace().map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

/// Mappings cloned; a string holding a JSON object is parsed.
pub fn to_string_map(value: Option<&Value>) -> Mapping {
    match value {
        Some(Value::Object(map)) => map.clone(),
        Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => map,
            _ => Mapping::new(),
        },
        _ => Mapping::new(),
    }
}

/// Signed decimal, or hexadecimal behind `0x` after an optional sign. A
/// single sign only: `--5` and `0x-5` are invalid.
fn parse_int(s: &str) -> Option<i64> {
    let (negative, unsigned) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let Some(hex) = unsigned.strip_prefix("0x").or_else(|| unsigned.strip_prefix("0X")) else {
        return s.parse::<i64>().ok();
    };
    if hex.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = i128::from_str_radix(hex, 16).ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
