//! Local plan store
//!
//! SQLite persistence for diet plans, exercise plans and profile metrics.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
