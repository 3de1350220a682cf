//! Query command - execute SQL and print the result.
//!
//! The core of the tutorial: takes one query string, runs it against the
//! sample database, and renders the full result set. The structured
//! result drives all three output formats.

use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::cli::{table, OutputFormat};
use crate::storage::Database;

/// Arguments for the query command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    sqlcoach query \"SELECT * FROM products LIMIT 5\"\n    \
    sqlcoach query \"SELECT name, city FROM customers\" --format csv\n    \
    sqlcoach query \"SELECT COUNT(*) FROM orders\" --format json")]
pub struct Args {
    /// SQL query to execute against the sample database
    #[arg(value_name = "SQL")]
    pub sql: String,

    /// Output format: text (default), json, csv
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the query command.
///
/// Engine errors (bad syntax, unknown tables) pass through unmodified;
/// the tutorial context is exploratory and the raw message is the most
/// useful thing to show.
pub fn run(args: Args) -> Result<()> {
    let db = Database::open_default()?;

    let start = Instant::now();
    let result = db.run_query(&args.sql)?;
    let elapsed = start.elapsed();

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result.to_json())?);
        }
        OutputFormat::Csv => {
            print!("{}", table::render_csv(&result));
        }
        OutputFormat::Text => {
            print!("{}", table::render(&result));
            println!();
            let rows = if result.row_count() == 1 { "row" } else { "rows" };
            println!(
                "{}",
                format!(
                    "{} {rows} ({:.1} ms)",
                    result.row_count(),
                    elapsed.as_secs_f64() * 1000.0
                )
                .dimmed()
            );
        }
    }

    Ok(())
}
