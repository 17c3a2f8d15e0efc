//! Command implementations for the fantasy league CLI

pub mod common;
pub mod import;
pub mod lineup;
pub mod match_data;
pub mod points;
pub mod schedule;
pub mod tables;
