//! Traveler/operator messaging routes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::error::ApiError;
use super::extract::{CurrentUser, JsonBody, OperatorUser, PathParam};
use super::payload::loose_i64;
use super::state::AppState;
use crate::storage::DatabaseError;

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    pub original_message_id: Option<Value>,
    pub message: Option<String>,
}

fn trimmed(message: Option<&str>) -> Option<&str> {
    message.map(str::trim).filter(|m| !m.is_empty())
}

/// `POST /api/messages`
///
/// Messages go to the operator with the lowest ID.
pub async fn send(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<SendRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Some(body) = trimmed(req.message.as_deref()) else {
        return Err(ApiError::bad_request("Message content is required"));
    };

    let Some(operator) = state.db.first_operator().await? else {
        return Err(ApiError::not_found("No operators available to receive messages"));
    };

    let message = state.db.create_message(user.id, operator.id, body).await?;
    info!(
        message_id = message.message.id,
        sender_id = user.id,
        receiver_id = operator.id,
        "Message sent"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Message sent successfully", "data": message })),
    ))
}

/// `GET /api/messages`
///
/// Operators see every message; anyone else sees the ones they sent or
/// received.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let messages = if user.role.is_operator() {
        state.db.list_all_messages().await?
    } else {
        state.db.list_messages_for_user(user.id).await?
    };

    Ok(Json(json!({
        "success": true,
        "count": messages.len(),
        "data": messages,
    })))
}

/// `POST /api/messages/reply`
pub async fn reply(
    State(state): State<AppState>,
    OperatorUser(operator): OperatorUser,
    JsonBody(req): JsonBody<ReplyRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Some(body) = trimmed(req.message.as_deref()) else {
        return Err(ApiError::bad_request("Reply message content is required"));
    };
    let Some(original_id) = req.original_message_id.as_ref().and_then(loose_i64) else {
        return Err(ApiError::bad_request("Original message ID is required"));
    };

    let original = match state.db.get_message(original_id).await {
        Ok(message) => message,
        Err(DatabaseError::NotFound(_)) => {
            return Err(ApiError::not_found("Original message not found"));
        }
        Err(e) => return Err(e.into()),
    };

    let receiver_id = original.counterparty(operator.id);
    let message = state.db.create_message(operator.id, receiver_id, body).await?;
    info!(
        message_id = message.message.id,
        original_id,
        sender_id = operator.id,
        receiver_id,
        "Reply sent"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Reply sent successfully", "data": message })),
    ))
}

/// `DELETE /api/messages/{id}`
pub async fn remove(
    State(state): State<AppState>,
    OperatorUser(operator): OperatorUser,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.db.delete_message(id).await? {
        return Err(ApiError::not_found("Message not found"));
    }

    info!(message_id = id, operator_id = operator.id, "Message deleted");
    Ok(Json(json!({ "success": true, "message": "Message deleted successfully" })))
}
