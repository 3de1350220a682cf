//! Docs command - open the SQL reference in the browser.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::Config;

/// Arguments for the docs command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    sqlcoach docs                  Open the SQL reference\n    \
    sqlcoach docs --print          Print the URL instead of opening it")]
pub struct Args {
    /// Print the URL instead of opening the browser
    #[arg(long)]
    pub print: bool,
}

/// Executes the docs command.
pub fn run(args: Args) -> Result<()> {
    let config = Config::load()?;

    if args.print {
        println!("{}", config.docs_url);
        return Ok(());
    }

    webbrowser::open(&config.docs_url)
        .with_context(|| format!("Failed to open {}", config.docs_url))?;
    println!("{} {}", "Opened".green(), config.docs_url.cyan());
    Ok(())
}
