//! Flat `KEY=VALUE` env files.
//!
//! Each match of `(\w+)=(.+)` yields one pair: the key runs up to the first
//! `=`, the value is the rest of the line. Quotes and escapes are not
//! interpreted, and lines that do not match (comments, blanks, `KEY=`) are
//! ignored. Values containing a NUL byte cannot live in the process
//! environment and are skipped with a warning.

use crate::error::{ConfigError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static ENV_PAIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)=(.+)").expect("valid regex"));

/// Extract the pairs from env-file text, in file order.
pub fn parse(content: &str) -> Vec<(String, String)> {
    ENV_PAIR
        .captures_iter(content)
        .filter_map(|caps| {
            let value = caps[2].strip_suffix('\r').unwrap_or(&caps[2]);
            if value.contains('\0') {
                tracing::warn!("Skipping env variable {}: value contains a NUL byte", &caps[1]);
                return None;
            }
            Some((caps[1].to_string(), value.to_string()))
        })
        .collect()
}

/// Read and parse an env file.
pub fn read(path: &Path) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(path)
        .map_err(|source| ConfigError::EnvFile { path: path.to_path_buf(), source })?;
    Ok(parse(&content))
}

/// Write pairs into the process environment.
pub fn export(pairs: &[(String, String)]) {
    for (key, value) in pairs {
        std::env::set_var(key, value);
    }
}
