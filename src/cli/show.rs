//! Show command implementation

use anyhow::Result;
use clap::Args;

use super::utils::{load_store, LoadArgs};

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub load: LoadArgs,

    /// Print single-line JSON instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let store = load_store(&args.load)?;
    if args.compact {
        println!("{}", store.to_json_string());
    } else {
        println!("{}", store.to_json_pretty());
    }
    Ok(())
}
