//! Authentication module for the Wanderlust API.
//!
//! Provides JWT token management, password hashing, and the closed role set.

pub mod claims;
pub mod jwt;
pub mod password;
pub mod role;

pub use claims::Claims;
pub use jwt::JwtManager;
pub use role::Role;
