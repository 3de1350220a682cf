//! Status command - show current sqlcoach state.
//!
//! Displays an overview of the sample database (presence, tables, row
//! counts) and lesson progress.

use anyhow::Result;
use colored::Colorize;

use crate::config::Config;
use crate::lessons;
use crate::progress::Progress;
use crate::storage::Database;

/// Executes the status command.
pub fn run() -> Result<()> {
    println!("{}", "sqlcoach".bold().cyan());
    println!("{}", "Learn SQL in your terminal".dimmed());
    println!();

    let config = Config::load()?;
    let db_path = config.database_path()?;

    println!("{}", "Sample database:".bold());
    if db_path.exists() {
        println!("  Path: {}", db_path.display());
        match Database::open(&db_path) {
            Ok(db) => {
                let tables = db.list_tables()?;
                let total_rows: i64 = tables.iter().map(|t| t.row_count).sum();
                println!("  Tables: {}   Rows: {}", tables.len(), total_rows);
            }
            Err(e) => {
                println!("  {}", format!("Unreadable: {e}").red());
            }
        }
    } else {
        println!("  {}", "Not fetched yet".yellow());
        println!();
        println!(
            "{}",
            "Hint: Run 'sqlcoach fetch' to download the sample database".yellow()
        );
        return Ok(());
    }

    let progress = Progress::load()?;
    let all = lessons::all();
    println!();
    println!("{}", "Lessons:".bold());
    for lesson in all {
        let mark = if progress.is_completed(lesson.slug) {
            "x".green()
        } else {
            " ".normal()
        };
        println!("  [{}] {}. {}", mark, lesson.number, lesson.title);
    }

    if progress.completed_count() == 0 {
        println!();
        println!("{}", "Hint: Start with 'sqlcoach lesson 1'".yellow());
    } else if progress.completed_count() == all.len() {
        println!();
        println!(
            "{}",
            "All lessons completed. Keep exploring with 'sqlcoach query'.".green()
        );
    }

    Ok(())
}
