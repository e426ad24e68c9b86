//! Wanderlust API Library
//!
//! Core functionality for the Wanderlust travel API:
//! - SQLite storage for users, hotels, bookings, favorites, and messages
//! - JWT authentication, password hashing and the two-role model
//! - Amadeus flight and Hotelbeds hotel provider clients
//! - axum routes, extractors and error mapping

pub mod auth;
pub mod providers;
pub mod server;
pub mod storage;
