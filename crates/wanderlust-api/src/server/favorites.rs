//! Favorite hotel routes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::error::ApiError;
use super::extract::{CurrentUser, JsonBody, PathParam};
use super::payload::loose_i64;
use super::state::AppState;
use crate::storage::{DatabaseError, Hotel};

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(rename = "hotelId")]
    pub hotel_id: Option<Value>,
}

/// `GET /api/favorites`
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Hotel>>, ApiError> {
    Ok(Json(state.db.list_favorites(user.id).await?))
}

/// `POST /api/favorites`
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Some(hotel_id) = req.hotel_id.as_ref().and_then(loose_i64) else {
        return Err(ApiError::bad_request("Hotel ID is required"));
    };

    match state.db.add_favorite(user.id, hotel_id).await {
        Ok(()) => {}
        Err(DatabaseError::Conflict(_)) => {
            return Err(ApiError::Conflict("Hotel is already a favorite".into()));
        }
        Err(DatabaseError::InvalidReference(_)) => {
            return Err(ApiError::not_found("Hotel not found."));
        }
        Err(e) => return Err(e.into()),
    }

    info!(user_id = user.id, hotel_id, "Favorite added");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Favorite added successfully" })),
    ))
}

/// `DELETE /api/favorites/{hotelId}`
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    PathParam(hotel_id): PathParam<i64>,
) -> Result<Json<Value>, ApiError> {
    let removed = state.db.remove_favorite(user.id, hotel_id).await?;
    info!(user_id = user.id, hotel_id, removed, "Favorite removed");
    Ok(Json(json!({ "message": "Favorite removed successfully" })))
}
