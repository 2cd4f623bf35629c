//! confstore: load layered configuration and print it
//!
//! Merges a config file or directory the same way the library does and
//! prints the whole store or a single value.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
