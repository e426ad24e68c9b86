//! Wanderlust Core Library
//!
//! Shared infrastructure for Wanderlust components:
//! - SQLite pool creation and the `define_database!` macro
//! - Database error type with constraint-violation classification
//! - Tracing subscriber initialisation

pub mod db;
pub mod tracing_init;

pub use db::DatabaseError;
