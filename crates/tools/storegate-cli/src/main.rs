mod cli;
mod commands;
mod error;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{handle_check, handle_token, handle_validate, load_config};
use error::Result;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Token { token } => handle_token(token),
        Commands::Check { check } => {
            load_config(cli.config.as_deref()).and_then(|config| handle_check(&config, check))
        }
        Commands::Validate => {
            load_config(cli.config.as_deref()).and_then(|config| handle_validate(&config))
        }
    };

    match result {
        Ok(output) => {
            println!("{}", output.trim_end());
            Ok(())
        }
        Err(e) => {
            log::error!("Error: {}", e);
            Err(e)
        }
    }
}
