//! Config file formats
//!
//! Detects the format from a file extension and decodes text into a
//! [`Mapping`]. Every decoder normalizes its own value tree into the store's
//! value model, so the merge never sees format-specific types.

mod xml;

use crate::error::{ConfigError, Result};
use crate::value::{float_value, Mapping, Number, Value};
use std::fmt;
use std::path::Path;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// XML format (.xml)
    Xml,
}

impl Format {
    /// Detect the format from a file extension (case-insensitive).
    ///
    /// Returns `None` when the extension is missing or not recognized.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension().and_then(|e| e.to_str())?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "xml" => Some(Self::Xml),
            _ => None,
        }
    }

    /// Decode already-substituted text into a mapping.
    ///
    /// `path` is only used to label errors.
    pub fn decode(self, content: &str, path: &Path) -> Result<Mapping> {
        match self {
            Self::Json => parse_json(content, path),
            Self::Yaml => parse_yaml(content, path),
            Self::Toml => parse_toml(content, path),
            Self::Xml => xml::parse_xml(content, path),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
            Self::Toml => "TOML",
            Self::Xml => "XML",
        };
        f.write_str(name)
    }
}

fn parse_json(content: &str, path: &Path) -> Result<Mapping> {
    let raw: Value =
        serde_json::from_str(content).map_err(|e| ConfigError::decode(Format::Json, path, e))?;
    match raw {
        Value::Object(map) => Ok(map),
        other => Err(ConfigError::decode(
            Format::Json,
            path,
            format!("top-level value must be an object, found {}", kind(&other)),
        )),
    }
}

fn parse_yaml(content: &str, path: &Path) -> Result<Mapping> {
    let raw: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::decode(Format::Yaml, path, e))?;
    match yaml_to_value(raw) {
        Value::Object(map) => Ok(map),
        // An empty or comment-only document
        Value::Null => Ok(Mapping::new()),
        other => Err(ConfigError::decode(
            Format::Yaml,
            path,
            format!("top-level value must be a mapping, found {}", kind(&other)),
        )),
    }
}

fn parse_toml(content: &str, path: &Path) -> Result<Mapping> {
    let raw: toml::Table =
        toml::from_str(content).map_err(|e| ConfigError::decode(Format::Toml, path, e))?;
    Ok(raw.into_iter().map(|(k, v)| (k, toml_to_value(v))).collect())
}

fn yaml_to_value(raw: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match raw {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64().map(float_value).unwrap_or(Value::Null)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_value).collect()),
        Yaml::Mapping(map) => Value::Object(
            map.into_iter().map(|(k, v)| (yaml_key(k), yaml_to_value(v))).collect(),
        ),
        // Custom tags (`!secret foo`) keep only their value
        Yaml::Tagged(tagged) => yaml_to_value(tagged.value),
    }
}

/// Mapping keys are strings in the store; scalar YAML keys use their plain
/// text and complex keys their JSON rendering.
fn yaml_key(key: serde_yaml::Value) -> String {
    match yaml_to_value(key) {
        Value::String(s) => s,
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn toml_to_value(raw: toml::Value) -> Value {
    match raw {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(Number::from(i)),
        toml::Value::Float(f) => float_value(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => {
            Value::Object(table.into_iter().map(|(k, v)| (k, toml_to_value(v))).collect())
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
