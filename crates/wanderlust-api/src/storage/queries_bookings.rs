//! Booking and favorite queries for the Wanderlust API.

use wanderlust_core::DatabaseError;
use wanderlust_core::db::unix_timestamp;

use super::db::ApiDatabase;
use super::models::{BookingSummary, Hotel, NewBooking};

impl ApiDatabase {
    // =========================================================================
    // Booking queries
    // =========================================================================

    /// Create a booking and return its ID.
    ///
    /// An unknown user or hotel is `InvalidReference`.
    pub async fn create_booking(&self, booking: &NewBooking<'_>) -> Result<i64, DatabaseError> {
        let now = unix_timestamp();

        let result = sqlx::query(
            "INSERT INTO bookings (user_id, hotel_id, check_in_date, check_out_date, special_requests, arrival_time, \
             add_on_flight, add_on_car, add_on_taxi, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(booking.user_id)
        .bind(booking.hotel_id)
        .bind(booking.check_in_date)
        .bind(booking.check_out_date)
        .bind(booking.special_requests)
        .bind(booking.arrival_time)
        .bind(booking.add_on_flight)
        .bind(booking.add_on_car)
        .bind(booking.add_on_taxi)
        .bind(now)
        .execute(self.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Every booking with its user's and hotel's names, newest first.
    pub async fn list_bookings(&self) -> Result<Vec<BookingSummary>, DatabaseError> {
        let bookings = sqlx::query_as::<_, BookingSummary>(
            "SELECT b.*, u.username AS username, h.name AS hotel_name \
             FROM bookings b \
             JOIN users u ON b.user_id = u.id \
             JOIN hotels h ON b.hotel_id = h.id \
             ORDER BY b.created_at DESC, b.id DESC",
        )
        .fetch_all(self.pool())
        .await?;

        Ok(bookings)
    }

    // =========================================================================
    // Favorite queries
    // =========================================================================

    /// Mark a hotel as a user's favorite.
    ///
    /// The composite primary key turns a repeat into `Conflict`; an unknown
    /// hotel is `InvalidReference`.
    pub async fn add_favorite(&self, user_id: i64, hotel_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("INSERT INTO user_favorites (user_id, hotel_id) VALUES (?, ?)")
            .bind(user_id)
            .bind(hotel_id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Remove a favorite. Removing one that does not exist is not an error.
    pub async fn remove_favorite(&self, user_id: i64, hotel_id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM user_favorites WHERE user_id = ? AND hotel_id = ?")
            .bind(user_id)
            .bind(hotel_id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// The hotels a user has marked as favorites, ordered by hotel ID.
    pub async fn list_favorites(&self, user_id: i64) -> Result<Vec<Hotel>, DatabaseError> {
        let hotels = sqlx::query_as::<_, Hotel>(
            "SELECT h.* FROM hotels h \
             JOIN user_favorites uf ON h.id = uf.hotel_id \
             WHERE uf.user_id = ? \
             ORDER BY h.id",
        )
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        Ok(hotels)
    }
}
