//! Command-line interface for sqlcoach.
//!
//! Provides the CLI commands for running the tutorial: executing
//! queries, running lessons, inspecting the sample schema, fetching the
//! database, and provisioning the environment.

/// Individual CLI command implementations.
pub mod commands;

/// Shared output-format selection.
pub mod format;

/// Aligned text-table rendering.
pub mod table;

pub use format::OutputFormat;
