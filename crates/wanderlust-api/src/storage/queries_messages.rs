//! Message queries for the Wanderlust API.

use wanderlust_core::DatabaseError;
use wanderlust_core::db::unix_timestamp;

use super::db::ApiDatabase;
use super::models::{Message, MessageWithUsers};

const SELECT_WITH_USERS: &str = "SELECT m.*, sender.username AS sender_username, receiver.username AS receiver_username \
     FROM messages m \
     JOIN users sender ON m.sender_id = sender.id \
     JOIN users receiver ON m.receiver_id = receiver.id";

impl ApiDatabase {
    /// Store a message and read it back with both usernames.
    pub async fn create_message(
        &self,
        sender_id: i64,
        receiver_id: i64,
        body: &str,
    ) -> Result<MessageWithUsers, DatabaseError> {
        let now = unix_timestamp();

        let result = sqlx::query(
            "INSERT INTO messages (sender_id, receiver_id, message, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(sender_id)
        .bind(receiver_id)
        .bind(body)
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_message_with_users(result.last_insert_rowid()).await
    }

    /// Get a message by ID.
    pub async fn get_message(&self, id: i64) -> Result<Message, DatabaseError> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Message {id}")))
    }

    /// Get a message by ID with both usernames.
    pub async fn get_message_with_users(&self, id: i64) -> Result<MessageWithUsers, DatabaseError> {
        sqlx::query_as::<_, MessageWithUsers>(&format!("{SELECT_WITH_USERS} WHERE m.id = ?"))
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Message {id}")))
    }

    /// Every message, newest first.
    pub async fn list_all_messages(&self) -> Result<Vec<MessageWithUsers>, DatabaseError> {
        let messages = sqlx::query_as::<_, MessageWithUsers>(&format!(
            "{SELECT_WITH_USERS} ORDER BY m.created_at DESC, m.id DESC"
        ))
        .fetch_all(self.pool())
        .await?;

        Ok(messages)
    }

    /// Messages a user sent or received, newest first.
    pub async fn list_messages_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<MessageWithUsers>, DatabaseError> {
        let messages = sqlx::query_as::<_, MessageWithUsers>(&format!(
            "{SELECT_WITH_USERS} WHERE m.sender_id = ? OR m.receiver_id = ? \
             ORDER BY m.created_at DESC, m.id DESC"
        ))
        .bind(user_id)
        .bind(user_id)
        .fetch_all(self.pool())
        .await?;

        Ok(messages)
    }

    /// Delete a message. Returns `false` when no such message existed.
    pub async fn delete_message(&self, id: i64) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
