//! confstore: layered application configuration
//!
//! Loads JSON, YAML, TOML, and XML files (a single file or a whole directory
//! tree), substitutes `${NAME:default}` placeholders from the environment,
//! deep-merges the documents, and serves values by dotted path.
//!
//! ```no_run
//! use confstore::ConfigStore;
//! use std::path::Path;
//!
//! let mut cfg = ConfigStore::new().with_print_enable(true);
//! cfg.initialize(Path::new("config/"), Some(Path::new(".env.local")))?;
//! let port = cfg.get_int("http.port");
//! # let _ = port;
//! # Ok::<(), confstore::ConfigError>(())
//! ```

pub mod cast;
pub mod envfile;
pub mod error;
pub mod format;
pub mod merge;
pub mod placeholder;
pub mod store;
pub mod value;

pub use error::{ConfigError, Result};
pub use format::Format;
pub use store::ConfigStore;
pub use value::{Mapping, Value};
