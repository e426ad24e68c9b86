//! Hotel queries for the Wanderlust API.

use sqlx::{QueryBuilder, Sqlite};
use wanderlust_core::DatabaseError;
use wanderlust_core::db::unix_timestamp;

use super::db::ApiDatabase;
use super::models::{Hotel, HotelChange, HotelFilter, HotelValue, NewHotel};

impl ApiDatabase {
    /// Insert a hotel and read it back.
    pub async fn create_hotel(&self, hotel: &NewHotel) -> Result<Hotel, DatabaseError> {
        let now = unix_timestamp();

        let result = sqlx::query(
            "INSERT INTO hotels (name, address, city, country, description, price_per_night, image_url, availability, \
             star_rating, rating_text, rating_score, review_count, location_score, distance_from_downtown, \
             room_type, room_beds, breakfast_included, free_cancellation, no_prepayment_needed, promo_message, \
             created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&hotel.name)
        .bind(&hotel.address)
        .bind(&hotel.city)
        .bind(&hotel.country)
        .bind(&hotel.description)
        .bind(hotel.price_per_night)
        .bind(&hotel.image_url)
        .bind(hotel.availability)
        .bind(hotel.star_rating)
        .bind(&hotel.rating_text)
        .bind(hotel.rating_score)
        .bind(hotel.review_count)
        .bind(hotel.location_score)
        .bind(&hotel.distance_from_downtown)
        .bind(&hotel.room_type)
        .bind(&hotel.room_beds)
        .bind(hotel.breakfast_included)
        .bind(hotel.free_cancellation)
        .bind(hotel.no_prepayment_needed)
        .bind(&hotel.promo_message)
        .bind(now)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_hotel(result.last_insert_rowid()).await
    }

    /// Get a hotel by ID.
    pub async fn get_hotel(&self, id: i64) -> Result<Hotel, DatabaseError> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Hotel {id}")))
    }

    /// List hotels matching every predicate in `filter`, ordered by ID.
    pub async fn list_hotels(&self, filter: &HotelFilter) -> Result<Vec<Hotel>, DatabaseError> {
        let mut qb = QueryBuilder::<Sqlite>::new("SELECT * FROM hotels WHERE 1 = 1");

        if !filter.include_unavailable {
            qb.push(" AND availability = 1");
        }
        if let Some(city) = &filter.city {
            qb.push(" AND city = ").push_bind(city.clone());
        }
        if let Some(min) = filter.min_price {
            qb.push(" AND price_per_night >= ").push_bind(min);
        }
        if let Some(max) = filter.max_price {
            qb.push(" AND price_per_night <= ").push_bind(max);
        }
        if let Some(term) = &filter.search {
            let pattern = format!("%{}%", escape_like(term));
            qb.push(" AND (name LIKE ")
                .push_bind(pattern.clone())
                .push(" ESCAPE '\\' OR description LIKE ")
                .push_bind(pattern)
                .push(" ESCAPE '\\')");
        }
        qb.push(" ORDER BY id");

        let hotels = qb.build_query_as::<Hotel>().fetch_all(self.pool()).await?;
        Ok(hotels)
    }

    /// The first `limit` hotels by ID.
    pub async fn featured_hotels(&self, limit: u32) -> Result<Vec<Hotel>, DatabaseError> {
        let hotels = sqlx::query_as::<_, Hotel>("SELECT * FROM hotels ORDER BY id LIMIT ?")
            .bind(limit)
            .fetch_all(self.pool())
            .await?;

        Ok(hotels)
    }

    /// Apply `changes` to a hotel and read it back.
    ///
    /// An empty change set is a no-op read.
    pub async fn update_hotel(
        &self,
        id: i64,
        changes: &[HotelChange],
    ) -> Result<Hotel, DatabaseError> {
        if changes.is_empty() {
            return self.get_hotel(id).await;
        }

        let mut qb = QueryBuilder::<Sqlite>::new("UPDATE hotels SET ");
        {
            let mut set = qb.separated(", ");
            for change in changes {
                set.push(format!("{} = ", change.column()));
                match change.value() {
                    HotelValue::Text(v) => set.push_bind_unseparated(v.clone()),
                    HotelValue::Real(v) => set.push_bind_unseparated(*v),
                    HotelValue::Integer(v) => set.push_bind_unseparated(*v),
                    HotelValue::Bool(v) => set.push_bind_unseparated(*v),
                };
            }
            set.push("updated_at = ");
            set.push_bind_unseparated(unix_timestamp());
        }
        qb.push(" WHERE id = ").push_bind(id);

        let result = qb.build().execute(self.pool()).await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Hotel {id}")));
        }

        self.get_hotel(id).await
    }

    /// Delete a hotel. Returns `false` when no such hotel existed.
    pub async fn delete_hotel(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Escape `LIKE` wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
