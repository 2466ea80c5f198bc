pub mod completions;
pub mod project;

use anyhow::Result;
use clap::Subcommand;

use crate::state::State;

#[derive(Debug, Subcommand)]
pub enum Commands {
    #[clap(name = "project", alias = "projects")]
    Project(project::Options),
    Completions(completions::Options),
}

pub async fn handle_command(command: Commands, state: State) -> Result<()> {
    match command {
        Commands::Completions(options) => completions::handle(options),
        Commands::Project(options) => project::handle(options, state).await,
    }
}
