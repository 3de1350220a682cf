//! Lesson command - run one lesson against the sample database.
//!
//! Prints each step's prose and, for query steps, the SQL and its
//! rendered result table, in order. Completion is recorded in the
//! progress file when the lesson runs through.

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::table;
use crate::lessons::{self, Lesson};
use crate::progress::Progress;
use crate::storage::Database;

/// Arguments for the lesson command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    sqlcoach lesson 1              Run the first lesson\n    \
    sqlcoach lesson joins          Run a lesson by slug\n    \
    sqlcoach lesson 2 --no-run     Read the lesson without executing queries")]
pub struct Args {
    /// Lesson number or slug (see 'sqlcoach lessons')
    #[arg(value_name = "LESSON")]
    pub lesson: String,

    /// Print prose and SQL without executing the queries
    #[arg(long)]
    pub no_run: bool,
}

/// Executes the lesson command.
pub fn run(args: Args) -> Result<()> {
    let lesson = lessons::find(&args.lesson).with_context(|| {
        format!(
            "No lesson '{}'. Run 'sqlcoach lessons' to see what is available.",
            args.lesson
        )
    })?;

    let db = if args.no_run {
        None
    } else {
        Some(Database::open_default()?)
    };

    print_header(lesson);
    for (i, step) in lesson.steps.iter().enumerate() {
        println!("{}", wrap(step.prose, 76));

        if let Some(sql) = step.sql {
            println!();
            println!("  {}", sql.yellow());
            if let Some(db) = &db {
                let result = db
                    .run_query(sql)
                    .with_context(|| format!("Lesson query failed: {sql}"))?;
                println!();
                print!("{}", indent(&table::render(&result), "  "));
            }
        }

        if i + 1 < lesson.steps.len() {
            println!();
        }
    }

    if !args.no_run {
        let mut progress = Progress::load()?;
        let first_time = !progress.is_completed(lesson.slug);
        progress.mark_completed(lesson.slug);
        progress.save()?;

        println!();
        if first_time {
            println!("{}", format!("Lesson '{}' completed.", lesson.slug).green());
        } else {
            println!(
                "{}",
                format!("Lesson '{}' completed (again).", lesson.slug).dimmed()
            );
        }
    }

    Ok(())
}

fn print_header(lesson: &Lesson) {
    println!(
        "{}  {}",
        format!("Lesson {}", lesson.number).bold().cyan(),
        lesson.title.bold()
    );
    println!();
}

/// Wraps prose to a column width at word boundaries.
fn wrap(text: &str, width: usize) -> String {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\n")
}

/// Prefixes every non-empty line of a block with an indent.
fn indent(block: &str, prefix: &str) -> String {
    block
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap("hello world", 76), "hello world");
    }

    #[test]
    fn test_wrap_breaks_at_word_boundaries() {
        let wrapped = wrap("one two three four five", 9);
        assert_eq!(wrapped, "one two\nthree\nfour five");
    }

    #[test]
    fn test_wrap_never_splits_words() {
        let wrapped = wrap("supercalifragilistic word", 5);
        assert!(wrapped.lines().any(|l| l == "supercalifragilistic"));
    }

    #[test]
    fn test_indent_prefixes_lines() {
        assert_eq!(indent("a\nb\n", "  "), "  a\n  b\n");
    }

    #[test]
    fn test_indent_skips_empty_lines() {
        assert_eq!(indent("a\n\nb\n", "  "), "  a\n\n  b\n");
    }
}
