//! Booking routes.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde_json::{Value, json};
use tracing::info;

use super::error::ApiError;
use super::extract::{CurrentUser, JsonBody, OperatorUser};
use super::payload::{self, JsonObject};
use super::state::AppState;
use crate::storage::{BookingSummary, DatabaseError, NewBooking};

/// `POST /api/bookings`
///
/// The booking always belongs to the caller; a `user_id` in the body is
/// ignored.
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(body): JsonBody<JsonObject>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let form = payload::booking_form(&body)?;

    let booking = NewBooking {
        user_id: user.id,
        hotel_id: form.hotel_id,
        check_in_date: &form.check_in_date,
        check_out_date: &form.check_out_date,
        special_requests: form.special_requests.as_deref(),
        arrival_time: form.arrival_time.as_deref(),
        add_on_flight: form.add_on_flight,
        add_on_car: form.add_on_car,
        add_on_taxi: form.add_on_taxi,
    };

    let booking_id = match state.db.create_booking(&booking).await {
        Ok(id) => id,
        Err(DatabaseError::InvalidReference(_)) => {
            return Err(ApiError::not_found("Hotel not found."));
        }
        Err(e) => return Err(e.into()),
    };

    info!(booking_id, user_id = user.id, hotel_id = form.hotel_id, "Booking created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Booking created successfully", "bookingId": booking_id })),
    ))
}

/// `GET /api/bookings`
pub async fn list(
    State(state): State<AppState>,
    OperatorUser(_operator): OperatorUser,
) -> Result<Json<Vec<BookingSummary>>, ApiError> {
    Ok(Json(state.db.list_bookings().await?))
}
