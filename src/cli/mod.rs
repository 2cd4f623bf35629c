//! Command-line interface for confstore
//!
//! Provides `show` and `get` subcommands over a loaded config path.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod get;
mod show;
mod utils;

/// Load layered configuration files and inspect the merged result
#[derive(Parser)]
#[command(name = "confstore")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged configuration as JSON
    Show(show::ShowArgs),

    /// Print a single value by dotted key
    Get(get::GetArgs),
}

impl Commands {
    fn load_args(&self) -> &utils::LoadArgs {
        match self {
            Commands::Show(args) => &args.load,
            Commands::Get(args) => &args.load,
        }
    }
}

/// `RUST_LOG` when it is set and valid. Otherwise DEBUG for `--verbose`,
/// INFO when `--print` asked for the configuration dump, WARN by default.
fn log_filter(verbose: bool, print: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose {
            Level::DEBUG
        } else if print {
            Level::INFO
        } else {
            Level::WARN
        };
        EnvFilter::default().add_directive(level.into())
    })
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let filter = log_filter(cli.verbose, cli.command.load_args().print);
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Show(args) => show::run(args),
        Commands::Get(args) => get::run(args),
    }
}
