//! SQLite storage for the Wanderlust API.
//!
//! Provides persistence for users, hotels, bookings, favorites, and messages.

mod db;
mod models;
mod queries;
mod queries_bookings;
mod queries_hotels;
mod queries_messages;
mod seed;


pub use db::ApiDatabase;
pub use models::*;
pub use wanderlust_core::db::DatabaseError;
