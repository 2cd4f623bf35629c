//! The merged configuration store.

use crate::cast;
use crate::envfile;
use crate::error::{ConfigError, Result};
use crate::format::Format;
use crate::merge;
use crate::placeholder;
use crate::value::{Mapping, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Nested key-value store built from one or more config files.
///
/// Load everything first, then read: the store has no interior locking, so
/// mutation after it is shared is up to the caller to serialize.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    data: Mapping,
    env: BTreeMap<String, String>,
    print_enable: bool,
    sort_entries: bool,
    export_env: bool,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Create an empty store with default settings.
    pub fn new() -> Self {
        Self {
            data: Mapping::new(),
            env: BTreeMap::new(),
            print_enable: false,
            sort_entries: true,
            export_env: true,
        }
    }

    /// Log the full store as JSON once [`initialize`](Self::initialize) finishes
    pub fn with_print_enable(mut self, enable: bool) -> Self {
        self.print_enable = enable;
        self
    }

    /// Visit directory entries in file-name order, so sibling files override
    /// each other deterministically (later names win)
    pub fn with_sort_entries(mut self, sort: bool) -> Self {
        self.sort_entries = sort;
        self
    }

    /// Write env-file pairs to the process environment in addition to the
    /// store's own overlay
    pub fn with_export_env(mut self, export: bool) -> Self {
        self.export_env = export;
        self
    }

    pub fn print_enable(&self) -> bool {
        self.print_enable
    }

    /// Load an optional env file, then the config path.
    ///
    /// An unreadable env file is logged and ignored. Errors from the config
    /// path follow [`load_path`](Self::load_path).
    pub fn initialize(&mut self, config_path: &Path, env_path: Option<&Path>) -> Result<()> {
        if let Some(env_path) = env_path {
            if let Err(e) = self.load_env_file(env_path) {
                tracing::warn!("Error loading env file: {}", e);
            }
        }

        tracing::info!("Loading configuration from {}", config_path.display());
        self.load_path(config_path)?;

        if self.print_enable {
            tracing::info!("Configuration: {}", self.to_json_string());
        }
        Ok(())
    }

    /// Read `KEY=VALUE` pairs into the environment overlay, exporting them to
    /// the process when enabled. Returns the number of pairs loaded.
    pub fn load_env_file(&mut self, path: &Path) -> Result<usize> {
        let pairs = envfile::read(path)?;
        if self.export_env {
            envfile::export(&pairs);
        }
        let count = pairs.len();
        self.env.extend(pairs);
        tracing::debug!("Loaded {} variables from {}", count, path.display());
        Ok(count)
    }

    /// Set a variable in the overlay used for placeholder substitution.
    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env.insert(key.into(), value.into());
    }

    /// Resolve a variable: the overlay first, then the process environment.
    ///
    /// A process variable that is set but not valid UTF-8 still counts as
    /// set; its value is converted lossily.
    pub fn env_var(&self, name: &str) -> Option<String> {
        self.env
            .get(name)
            .cloned()
            .or_else(|| std::env::var_os(name).map(|v| v.to_string_lossy().into_owned()))
    }

    /// Load a single file or every file under a directory.
    ///
    /// A single file's failure is returned. Inside a directory, unreadable,
    /// malformed, and unsupported files are logged and skipped, so a
    /// directory load only fails when the directory itself is inaccessible.
    pub fn load_path(&mut self, path: &Path) -> Result<()> {
        let meta = fs::metadata(path)
            .map_err(|source| ConfigError::PathInaccessible { path: path.to_path_buf(), source })?;

        if !meta.is_dir() {
            return self.load_file(path);
        }

        let mut walker = WalkDir::new(path);
        if self.sort_entries {
            walker = walker.sort_by_file_name();
        }
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Error accessing config entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            if let Err(e) = self.load_file(entry.path()) {
                tracing::warn!("Skipping config file {}: {}", entry.path().display(), e);
            }
        }

        tracing::info!("Configuration loaded successfully");
        Ok(())
    }

    /// Read, substitute, decode, and merge one file.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let format = Format::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat { path: path.to_path_buf() })?;
        let content = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;

        let document = self.decode(format, &content, path)?;
        tracing::debug!("Merging {} keys from {}", document.len(), path.display());
        self.merge_map(document);
        Ok(())
    }

    /// Substitute, decode, and merge text that did not come from a file.
    pub fn load_str(&mut self, format: Format, content: &str) -> Result<()> {
        let document = self.decode(format, content, Path::new("<inline>"))?;
        self.merge_map(document);
        Ok(())
    }

    fn decode(&self, format: Format, content: &str, path: &Path) -> Result<Mapping> {
        let content = placeholder::substitute(content, |name| self.env_var(name));
        format.decode(&content, path)
    }

    /// Deep-merge a document into the store; its values win on conflict.
    pub fn merge_map(&mut self, document: Mapping) {
        merge::merge_into(&mut self.data, document);
    }

    /// Look up a dotted path such as `http.port`.
    ///
    /// Returns `None` when any segment is missing or an intermediate segment
    /// is not a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split('.');
        let last = segments.next_back()?;
        let mut current = &self.data;
        for segment in segments {
            match current.get(segment)? {
                Value::Object(map) => current = map,
                _ => return None,
            }
        }
        current.get(last)
    }

    /// Whether a value (including an explicit null) exists at `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get_string(&self, key: &str) -> String {
        cast::to_string(self.get(key))
    }

    pub fn get_int(&self, key: &str) -> i64 {
        cast::to_int(self.get(key))
    }

    pub fn get_bool(&self, key: &str) -> bool {
        cast::to_bool(self.get(key))
    }

    pub fn get_float(&self, key: &str) -> f64 {
        cast::to_float(self.get(key))
    }

    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        cast::to_string_list(self.get(key))
    }

    pub fn get_string_map(&self, key: &str) -> Mapping {
        cast::to_string_map(self.get(key))
    }

    /// The whole store.
    pub fn as_map(&self) -> &Mapping {
        &self.data
    }

    /// Compact JSON rendering of the whole store.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(&self.data)
            .unwrap_or_else(|e| format!("Error marshaling config to JSON: {e}"))
    }

    /// Pretty-printed JSON rendering of the whole store.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.data)
            .unwrap_or_else(|e| format!("Error marshaling config to JSON: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn store_from(value: Value) -> ConfigStore {
        let mut store = ConfigStore::new();
        if let Value::Object(map) = value {
            store.merge_map(map);
        }
        store
    }

    #[test]
    fn test_get_dotted_path() {
        let store = store_from(json!({"http": {"port": 8080, "tls": {"enabled": true}}}));
        assert_eq!(store.get("http.port"), Some(&json!(8080)));
        assert_eq!(store.get("http.tls.enabled"), Some(&json!(true)));
        assert_eq!(store.get("http"), Some(&json!({"port": 8080, "tls": {"enabled": true}})));
    }

    #[test]
    fn test_get_absent_path() {
        let store = store_from(json!({"a": {}}));
        assert_eq!(store.get("a.b.c"), None);
        assert_eq!(store.get_string("a.b.c"), "");
        assert_eq!(store.get_int("a.b.c"), 0);
        assert!(!store.get_bool("a.b.c"));
        assert!(store.get_string_list("a.b.c").is_empty());
        assert!(!store.contains("a.b.c"));
        assert!(store.contains("a"));
    }

    #[test]
    fn test_get_through_scalar_is_absent() {
        let store = store_from(json!({"a": {"b": 5}}));
        assert_eq!(store.get("a.b.c"), None);
        assert_eq!(store.get("a.b"), Some(&json!(5)));
    }

    #[test]
    fn test_get_empty_and_odd_keys() {
        let store = store_from(json!({"": {"x": 1}, "a": 1}));
        assert_eq!(store.get(""), Some(&json!({"x": 1})));
        assert_eq!(store.get(".x"), Some(&json!(1)));
        assert_eq!(store.get("a."), None);
    }

    #[test]
    fn test_typed_getters_coerce() {
        let store = store_from(json!({
            "http": {"port": "8080", "debug": "true", "ratio": 0.25, "hosts": ["a", "b"]},
        }));
        assert_eq!(store.get_int("http.port"), 8080);
        assert_eq!(store.get_string("http.port"), "8080");
        assert!(store.get_bool("http.debug"));
        assert_eq!(store.get_float("http.ratio"), 0.25);
        assert_eq!(store.get_string_list("http.hosts"), vec!["a", "b"]);
        assert_eq!(store.get_string_map("http").len(), 4);
    }

    #[test]
    fn test_load_str_with_overlay_placeholder() {
        let mut store = ConfigStore::new();
        store.set_env("CONFSTORE_STORE_TEST_HOST", "example.com");
        store
            .load_str(
                Format::Yaml,
                "host: ${CONFSTORE_STORE_TEST_HOST:localhost}\nport: ${CONFSTORE_STORE_TEST_PORT:8080}\n",
            )
            .expect("load");
        assert_eq!(store.get_string("host"), "example.com");
        assert_eq!(store.get_int("port"), 8080);
    }

    #[test]
    fn test_load_file_unsupported() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("config.ini");
        fs::write(&path, "port=80\n").expect("write");

        let mut store = ConfigStore::new();
        let err = store.load_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_path_missing() {
        let tmp = TempDir::new().expect("tmp");
        let mut store = ConfigStore::new();
        let err = store.load_path(&tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::PathInaccessible { .. }));
    }

    #[test]
    fn test_directory_skips_bad_files() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("app.json"), r#"{"app": {"name": "demo"}}"#).expect("write");
        fs::write(tmp.path().join("broken.yaml"), "a: [1, 2\n").expect("write");
        fs::write(tmp.path().join("notes.ini"), "x=1\n").expect("write");

        let mut store = ConfigStore::new();
        store.load_path(tmp.path()).expect("directory load");
        assert_eq!(store.get_string("app.name"), "demo");
        assert_eq!(store.as_map().len(), 1);
    }

    #[test]
    fn test_directory_sorted_order_later_wins() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("10-override.toml"), "[http]\nport = 9090\n").expect("write");
        fs::write(tmp.path().join("00-base.json"), r#"{"http": {"port": 80, "host": "h"}}"#)
            .expect("write");

        let mut store = ConfigStore::new();
        store.load_path(tmp.path()).expect("directory load");
        assert_eq!(store.get_int("http.port"), 9090);
        assert_eq!(store.get_string("http.host"), "h");
    }

    #[test]
    fn test_env_file_without_export_stays_in_overlay() {
        let tmp = TempDir::new().expect("tmp");
        let env_path = tmp.path().join(".env");
        fs::write(&env_path, "CONFSTORE_STORE_TEST_LOCAL=overlay\n").expect("write");

        let mut store = ConfigStore::new().with_export_env(false);
        assert_eq!(store.load_env_file(&env_path).expect("env"), 1);
        assert_eq!(store.env_var("CONFSTORE_STORE_TEST_LOCAL").as_deref(), Some("overlay"));
        assert!(std::env::var("CONFSTORE_STORE_TEST_LOCAL").is_err());
    }

    #[test]
    fn test_to_json_string_round_trip() {
        let store = store_from(json!({"a": {"b": [1, 2.5, "x"], "c": null}, "d": true}));
        let parsed: Value = serde_json::from_str(&store.to_json_string()).expect("json");
        assert_eq!(parsed, Value::Object(store.as_map().clone()));
    }

    #[test]
    fn test_builder_flags() {
        let store = ConfigStore::new().with_print_enable(true);
        assert!(store.print_enable());
        assert!(!ConfigStore::default().print_enable());
    }
}
