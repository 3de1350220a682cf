//! Doctor command - diagnose sqlcoach installation and data.
//!
//! Performs health checks on the app home, configuration, sample
//! database, and provisioned tools, and reports them with text or JSON
//! output. Exits non-zero when any check errors.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::env;

use crate::cli::OutputFormat;
use crate::config::{app_home, Config};
use crate::provision;
use crate::storage::{seed, Database};

/// Arguments for the doctor command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    sqlcoach doctor               Run health checks\n    \
    sqlcoach doctor --format json Output as JSON")]
pub struct Args {
    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Check status indicating the result of a health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    /// Check passed successfully.
    Ok,
    /// Check passed but with a warning.
    Warning,
    /// Check failed with an error.
    Error,
}

/// Result of a single health check.
#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    message: String,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: String) -> Self {
        Self {
            name: name.to_string(),
            status,
            message,
        }
    }
}

/// JSON output structure for doctor.
#[derive(Serialize)]
struct DoctorOutput {
    checks: Vec<CheckResult>,
    ok_count: usize,
    warning_count: usize,
    error_count: usize,
    exit_code: i32,
}

/// Executes the doctor command.
pub fn run(args: Args) -> Result<()> {
    if args.format == OutputFormat::Csv {
        anyhow::bail!("CSV output is not supported for the doctor command");
    }

    let checks = run_checks();

    let ok_count = checks.iter().filter(|c| c.status == CheckStatus::Ok).count();
    let warning_count = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Warning)
        .count();
    let error_count = checks
        .iter()
        .filter(|c| c.status == CheckStatus::Error)
        .count();
    let exit_code = if error_count > 0 { 1 } else { 0 };

    match args.format {
        OutputFormat::Json => {
            let output = DoctorOutput {
                checks,
                ok_count,
                warning_count,
                error_count,
                exit_code,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        // Csv is rejected above.
        OutputFormat::Text | OutputFormat::Csv => {
            println!("{}", "sqlcoach doctor".bold().cyan());
            println!();
            for check in &checks {
                let marker = match check.status {
                    CheckStatus::Ok => "ok  ".green(),
                    CheckStatus::Warning => "warn".yellow(),
                    CheckStatus::Error => "err ".red(),
                };
                println!("  [{marker}] {:<16} {}", check.name, check.message);
            }
            println!();
            println!(
                "{}",
                format!("{ok_count} ok, {warning_count} warnings, {error_count} errors").dimmed()
            );
        }
    }

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

/// Runs all health checks in order.
fn run_checks() -> Vec<CheckResult> {
    let mut checks = Vec::new();
    checks.push(check_app_home());
    checks.push(check_config());
    let config = Config::load().unwrap_or_default();
    checks.push(check_database(&config));
    checks.push(check_sample_schema(&config));
    checks.push(check_bin_dir(&config));
    checks.push(check_browser(&config));
    checks
}

fn check_app_home() -> CheckResult {
    match app_home() {
        Ok(dir) => CheckResult::new("app home", CheckStatus::Ok, dir.display().to_string()),
        Err(e) => CheckResult::new("app home", CheckStatus::Error, e.to_string()),
    }
}

fn check_config() -> CheckResult {
    let path = match Config::config_path() {
        Ok(path) => path,
        Err(e) => return CheckResult::new("config", CheckStatus::Error, e.to_string()),
    };

    if !path.exists() {
        return CheckResult::new(
            "config",
            CheckStatus::Ok,
            "using defaults (no config file)".to_string(),
        );
    }

    match Config::load() {
        Ok(_) => CheckResult::new("config", CheckStatus::Ok, path.display().to_string()),
        Err(e) => CheckResult::new("config", CheckStatus::Error, format!("unparseable: {e}")),
    }
}

fn check_database(config: &Config) -> CheckResult {
    let path = match config.database_path() {
        Ok(path) => path,
        Err(e) => return CheckResult::new("database", CheckStatus::Error, e.to_string()),
    };

    if !path.exists() {
        return CheckResult::new(
            "database",
            CheckStatus::Warning,
            "not fetched yet (run 'sqlcoach fetch')".to_string(),
        );
    }

    match Database::open(&path).and_then(|db| db.list_tables()) {
        Ok(tables) if tables.is_empty() => CheckResult::new(
            "database",
            CheckStatus::Warning,
            "present but contains no tables".to_string(),
        ),
        Ok(tables) => CheckResult::new(
            "database",
            CheckStatus::Ok,
            format!("{} tables at {}", tables.len(), path.display()),
        ),
        Err(e) => CheckResult::new("database", CheckStatus::Error, format!("unreadable: {e}")),
    }
}

/// Every lesson queries the products table; a database with different
/// columns would make the lesson output nonsensical.
fn check_sample_schema(config: &Config) -> CheckResult {
    let path = match config.database_path() {
        Ok(path) => path,
        Err(e) => return CheckResult::new("sample schema", CheckStatus::Error, e.to_string()),
    };

    if !path.exists() {
        return CheckResult::new(
            "sample schema",
            CheckStatus::Warning,
            "no database to inspect".to_string(),
        );
    }

    match Database::open(&path).and_then(|db| db.table_schema("products")) {
        Ok(columns) => {
            let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
            if names == seed::PRODUCT_COLUMNS {
                CheckResult::new(
                    "sample schema",
                    CheckStatus::Ok,
                    "products table matches the lesson schema".to_string(),
                )
            } else {
                CheckResult::new(
                    "sample schema",
                    CheckStatus::Warning,
                    format!(
                        "products columns are {names:?}, lessons expect {:?}",
                        seed::PRODUCT_COLUMNS
                    ),
                )
            }
        }
        Err(e) => CheckResult::new(
            "sample schema",
            CheckStatus::Warning,
            format!("could not read the products schema: {e}"),
        ),
    }
}

fn check_bin_dir(config: &Config) -> CheckResult {
    let dir = match config.bin_dir() {
        Ok(dir) => dir,
        Err(e) => return CheckResult::new("bin dir", CheckStatus::Error, e.to_string()),
    };

    let on_path = env::var_os("PATH")
        .map(|path| env::split_paths(&path).any(|p| p == dir))
        .unwrap_or(false);

    if on_path {
        CheckResult::new("bin dir", CheckStatus::Ok, dir.display().to_string())
    } else {
        CheckResult::new(
            "bin dir",
            CheckStatus::Warning,
            format!("{} is not on PATH", dir.display()),
        )
    }
}

fn check_browser(config: &Config) -> CheckResult {
    match provision::which(&config.browser_package) {
        Some(path) => CheckResult::new("browser", CheckStatus::Ok, path.display().to_string()),
        None => CheckResult::new(
            "browser",
            CheckStatus::Warning,
            format!(
                "'{}' not found on PATH (run 'sqlcoach setup')",
                config.browser_package
            ),
        ),
    }
}
