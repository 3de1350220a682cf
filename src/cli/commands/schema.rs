//! Schema command - show a table's declared columns.

use anyhow::Result;
use colored::Colorize;

use crate::cli::OutputFormat;
use crate::storage::Database;

/// Arguments for the schema command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    sqlcoach schema products       Show the products table schema\n    \
    sqlcoach schema orders --format json")]
pub struct Args {
    /// Table to describe
    #[arg(value_name = "TABLE")]
    pub table: String,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the schema command.
pub fn run(args: Args) -> Result<()> {
    let db = Database::open_default()?;
    let columns = db.table_schema(&args.table)?;

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&columns)?);
        }
        OutputFormat::Csv => {
            anyhow::bail!("CSV output is not supported for the schema command")
        }
        OutputFormat::Text => {
            println!("{}", args.table.bold().cyan());

            const NAME_WIDTH: usize = 16;
            const TYPE_WIDTH: usize = 10;
            println!(
                "{}",
                format!(
                    "{:<NAME_WIDTH$}  {:<TYPE_WIDTH$}  {}",
                    "COLUMN", "TYPE", "CONSTRAINTS"
                )
                .bold()
            );

            for column in &columns {
                let mut constraints = Vec::new();
                if column.primary_key {
                    constraints.push("PRIMARY KEY");
                }
                if column.not_null {
                    constraints.push("NOT NULL");
                }

                println!(
                    "{:<NAME_WIDTH$}  {:<TYPE_WIDTH$}  {}",
                    column.name,
                    column.decl_type.yellow(),
                    constraints.join(", ").dimmed()
                );
            }
        }
    }

    Ok(())
}
