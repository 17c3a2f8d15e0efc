//! Storage layer for the fantasy league engine
//!
//! This module provides a clean abstraction over the SQLite database,
//! organized into logical components:
//! - `models`: Data structures
//! - `schema`: Database connection and schema management
//! - `queries`: Record creation and reads
//! - `engine`: Schedule, results, lineups and recompute passes

pub mod engine;
pub mod models;
pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

// Re-export the main types and database struct for easy access
pub use models::*;
pub use schema::LeagueDatabase;
