//! Sqlcoach - learn SQL in your terminal.
//!
//! Sqlcoach runs short, prose-driven SQL lessons against a small sample
//! database and leaves a query command for exploring on your own.

pub mod config;
pub mod fetch;
pub mod lessons;
pub mod progress;
pub mod provision;
pub mod storage;
