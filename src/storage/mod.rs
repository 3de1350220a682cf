//! Storage layer for the sample database.

pub mod db;
pub mod models;
pub mod seed;

pub use db::Database;
pub use models::*;
