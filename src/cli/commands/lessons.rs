//! Lessons command - list bundled lessons and completion state.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::lessons;
use crate::progress::Progress;

/// Arguments for the lessons command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    sqlcoach lessons               List lessons and completion marks\n    \
    sqlcoach lessons --format json Output as JSON")]
pub struct Args {
    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// JSON output row for a lesson.
#[derive(Serialize)]
struct LessonRow {
    number: usize,
    slug: String,
    title: String,
    steps: usize,
    queries: usize,
    completed: bool,
}

/// Executes the lessons command.
pub fn run(args: Args) -> Result<()> {
    let progress = Progress::load()?;
    let all = lessons::all();

    match args.format {
        OutputFormat::Json => {
            let rows: Vec<LessonRow> = all
                .iter()
                .map(|lesson| LessonRow {
                    number: lesson.number,
                    slug: lesson.slug.to_string(),
                    title: lesson.title.to_string(),
                    steps: lesson.steps.len(),
                    queries: lesson.query_count(),
                    completed: progress.is_completed(lesson.slug),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputFormat::Csv => {
            anyhow::bail!("CSV output is not supported for the lessons command")
        }
        OutputFormat::Text => {
            const SLUG_WIDTH: usize = 18;
            const TITLE_WIDTH: usize = 24;
            println!(
                "{}",
                format!(
                    "   {:<SLUG_WIDTH$}  {:<TITLE_WIDTH$}  {:>7}  {}",
                    "LESSON", "TITLE", "QUERIES", "STATUS"
                )
                .bold()
            );

            for lesson in all {
                let status = if progress.is_completed(lesson.slug) {
                    "done".green()
                } else {
                    "-".dimmed()
                };
                println!(
                    "{}  {:<SLUG_WIDTH$}  {:<TITLE_WIDTH$}  {:>7}  {}",
                    lesson.number,
                    lesson.slug.cyan(),
                    lesson.title,
                    lesson.query_count(),
                    status
                );
            }

            println!();
            println!(
                "{}",
                format!(
                    "{} of {} lessons completed. Run 'sqlcoach lesson <n>' to start one.",
                    progress.completed_count(),
                    all.len()
                )
                .dimmed()
            );
        }
    }

    Ok(())
}
