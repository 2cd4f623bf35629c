//! Error types for config loading.

use std::path::PathBuf;
use thiserror::Error;

use crate::format::Format;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Failures surfaced while loading configuration.
///
/// Lookups never produce these: a missing key is reported as absence, and the
/// typed getters fall back to zero values.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The root config path could not be stat'ed.
    #[error("failed to access config path {}: {source}", path.display())]
    PathInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file was read but its content is not a valid document.
    #[error("failed to parse {format} config file {}: {message}", path.display())]
    Decode { format: Format, path: PathBuf, message: String },

    /// The file extension is not one of the recognized formats.
    #[error("unsupported config file format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// The env file could not be read.
    #[error("failed to read env file {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn decode(
        format: Format,
        path: impl Into<PathBuf>,
        err: impl std::fmt::Display,
    ) -> Self {
        Self::Decode { format, path: path.into(), message: err.to_string() }
    }
}
