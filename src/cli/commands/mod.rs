//! CLI commands for sqlcoach.
//!
//! Each submodule implements a single CLI command with its argument
//! parsing and execution logic.

/// Generate shell completion scripts.
pub mod completions;

/// Configuration viewing and management.
pub mod config;

/// Diagnose installation and database health.
pub mod doctor;

/// Open the SQL reference in the browser.
pub mod docs;

/// Download or seed the sample database.
pub mod fetch;

/// Run a single lesson.
pub mod lesson;

/// List bundled lessons and completion state.
pub mod lessons;

/// Execute a SQL query and print the result.
pub mod query;

/// Show table schemas.
pub mod schema;

/// Provision the environment (browser + companion tools).
pub mod setup;

/// Show an overview of database and lesson progress.
pub mod status;

/// List tables in the sample database.
pub mod tables;
