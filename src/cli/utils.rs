//! Shared CLI utilities.

use anyhow::{Context, Result};
use clap::Args;
use confstore::ConfigStore;
use std::path::PathBuf;

/// Options for loading the store, shared by every subcommand.
#[derive(Args)]
pub struct LoadArgs {
    /// Config file or directory to load
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// KEY=VALUE file loaded into the environment before the config
    #[arg(short = 'e', long, value_name = "FILE", env = "CONFSTORE_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Log the merged configuration at INFO level after loading
    #[arg(long)]
    pub print: bool,

    /// Keep env-file variables out of the process environment
    #[arg(long)]
    pub no_export_env: bool,

    /// Merge directory entries in walk order instead of sorted by name
    #[arg(long)]
    pub no_sort: bool,
}

pub fn load_store(args: &LoadArgs) -> Result<ConfigStore> {
    let mut store = ConfigStore::new()
        .with_print_enable(args.print)
        .with_export_env(!args.no_export_env)
        .with_sort_entries(!args.no_sort);
    store
        .initialize(&args.path, args.env_file.as_deref())
        .with_context(|| format!("Failed to load configuration from {}", args.path.display()))?;
    Ok(store)
}
