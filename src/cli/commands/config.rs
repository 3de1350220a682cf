//! Config command - view and manage configuration.

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use crate::config::Config;

/// Arguments for the config command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    sqlcoach config show                        Show current configuration\n    \
    sqlcoach config path                        Print the config file path\n    \
    sqlcoach config set browser_package brave   Change a value")]
pub struct Args {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the current configuration as JSON
    Show,
    /// Print the path of the config file
    Path,
    /// Set a configuration value and save the file
    Set {
        /// Config key (e.g. database_url, browser_package)
        key: String,
        /// New value
        value: String,
    },
}

/// Executes the config command.
pub fn run(args: Args) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommand::Path => {
            println!("{}", Config::config_path()?.display());
        }
        ConfigCommand::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            println!("{} {key} = {value}", "Set".green());
        }
    }
    Ok(())
}
