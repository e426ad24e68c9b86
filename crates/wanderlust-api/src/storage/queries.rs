//! User queries for the Wanderlust API.

use wanderlust_core::db::unix_timestamp;

use super::db::ApiDatabase;
use super::models::User;
use crate::auth::Role;
use wanderlust_core::DatabaseError;

impl ApiDatabase {
    /// Create a new user. A duplicate username or email is `Conflict`.
    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, DatabaseError> {
        let now = unix_timestamp();

        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_user(result.last_insert_rowid()).await
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: i64) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User {id}")))
    }

    /// Get a user by email.
    pub async fn get_user_by_email(&self, email: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User with email {email}")))
    }

    /// The operator with the lowest ID, if any operator exists.
    pub async fn first_operator(&self) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role = ? ORDER BY id LIMIT 1",
        )
        .bind(Role::Operator)
        .fetch_optional(self.pool())
        .await?;

        Ok(user)
    }

    /// Replace a user's profile photo URL.
    pub async fn update_profile_photo(
        &self,
        id: i64,
        profile_photo_url: &str,
    ) -> Result<User, DatabaseError> {
        let result = sqlx::query("UPDATE users SET profile_photo_url = ? WHERE id = ?")
            .bind(profile_photo_url)
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("User {id}")));
        }

        self.get_user(id).await
    }
}
