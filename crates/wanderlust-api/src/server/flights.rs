//! Flight offer search.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

use super::error::ApiError;
use super::extract::QueryParams;
use super::state::AppState;
use crate::providers::FlightQuery;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
    pub airline: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `GET /api/flights/search`
pub async fn search(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    let (Some(origin), Some(destination), Some(date)) = (
        present(params.origin),
        present(params.destination),
        present(params.date),
    ) else {
        return Err(ApiError::bad_request(
            "Origin, destination, and date are required.",
        ));
    };

    let query = FlightQuery {
        origin,
        destination,
        date,
        airline: present(params.airline),
    };

    let offers = state.flights.search_flights(&query).await.map_err(|e| {
        error!(error = %e, origin = %query.origin, destination = %query.destination, "Flight search failed");
        ApiError::Upstream("Failed to fetch flight data from external API.".into())
    })?;

    Ok(Json(offers))
}
