#![warn(clippy::pedantic)]

use anyhow::Result;
use clap::Parser;
use ghp_cli::commands::handle_command;
use ghp_cli::config::EXEC_NAME;
use ghp_cli::errors::FlagError;
use ghp_cli::state::{State, StateOptions};
use ghp_cli::{utils, CLI};

#[tokio::main]
async fn main() -> Result<()> {
    // setup panic hook
    utils::set_hook();

    // create a new CLI instance
    let cli = CLI::parse();

    utils::logs(cli.verbose);

    let state = match State::new(StateOptions::from_env()).await {
        Ok(state) => state,
        Err(error) => {
            log::error!("{error:#}");
            std::process::exit(1);
        }
    };

    if let Err(error) = handle_command(cli.commands, state).await {
        log::error!("{error}");

        if error.downcast_ref::<FlagError>().is_some() {
            log::warn!("Run `{EXEC_NAME} --help` for usage");
        }

        std::process::exit(1);
    }

    Ok(())
}
