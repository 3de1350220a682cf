//! Tables command - list tables in the sample database.

use anyhow::Result;
use colored::Colorize;

use crate::cli::OutputFormat;
use crate::storage::Database;

/// Arguments for the tables command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    sqlcoach tables                List tables with row counts\n    \
    sqlcoach tables --format json  Output as JSON")]
pub struct Args {
    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the tables command.
pub fn run(args: Args) -> Result<()> {
    let db = Database::open_default()?;
    let tables = db.list_tables()?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tables)?);
        }
        OutputFormat::Csv => {
            anyhow::bail!("CSV output is not supported for the tables command")
        }
        OutputFormat::Text => {
            if tables.is_empty() {
                println!("{}", "No tables found.".dimmed());
                return Ok(());
            }

            const NAME_WIDTH: usize = 20;
            println!("{}", format!("{:<NAME_WIDTH$}  {:>6}", "TABLE", "ROWS").bold());
            for table in &tables {
                println!(
                    "{:<NAME_WIDTH$}  {:>6}",
                    table.name.cyan(),
                    table.row_count
                );
            }
        }
    }

    Ok(())
}
