pub mod client;
pub mod format;
pub mod queries;
pub mod template;
#[cfg(test)]
mod test_utils;
pub mod types;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::state::State;

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[clap(name = "template")]
    Template(template::Options),
}

#[derive(Debug, Parser)]
#[clap(about = "Work with projects")]
#[group(skip)]
pub struct Options {
    #[clap(subcommand)]
    pub commands: Commands,
}

pub async fn handle(options: Options, state: State) -> Result<()> {
    match options.commands {
        Commands::Template(options) => template::handle(options, state).await,
    }
}
