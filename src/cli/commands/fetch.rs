//! Fetch command - download or seed the sample database.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;

use crate::config::Config;
use crate::fetch;
use crate::storage::seed;

/// Arguments for the fetch command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    sqlcoach fetch                 Download the sample database if absent\n    \
    sqlcoach fetch --force         Re-download even if present\n    \
    sqlcoach fetch --seed          Build the database offline from the bundled seed")]
pub struct Args {
    /// Re-fetch even when the database file already exists
    #[arg(long)]
    pub force: bool,

    /// Build the sample database locally instead of downloading it
    #[arg(long)]
    pub seed: bool,
}

/// Executes the fetch command.
///
/// Idempotent: when the file exists and no flag is given, reports that
/// and exits successfully.
pub fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    let path = config.database_path()?;

    if path.exists() && !args.force {
        println!(
            "Sample database already present at {}",
            path.display().to_string().cyan()
        );
        println!("{}", "Use --force to fetch it again.".dimmed());
        return Ok(());
    }

    if args.seed {
        // write_sample refuses to overwrite, so a forced re-seed clears
        // the old file first.
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        seed::write_sample(&path).context("Failed to seed sample database")?;
        println!(
            "{} {}",
            "Seeded sample database at".green(),
            path.display()
        );
        return Ok(());
    }

    // The download lands in a temp file and is renamed over any existing
    // database only once complete, so a failed transfer leaves the old
    // file untouched.
    println!("Fetching {} ...", config.database_url.cyan());
    fetch::download(&config.database_url, &path)
        .with_context(|| format!("Failed to download {}", config.database_url))?;

    let size = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    println!(
        "{} {} ({} bytes)",
        "Saved sample database to".green(),
        path.display(),
        size
    );
    Ok(())
}
