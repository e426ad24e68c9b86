//! SQLite database for the Wanderlust API.

wanderlust_core::define_database!(ApiDatabase, "API database migrations complete");
