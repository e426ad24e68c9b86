//! Hotel routes: the local catalogue, operator management, and the
//! provider-backed availability search.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info};

use super::error::ApiError;
use super::extract::{JsonBody, OperatorUser, PathParam, QueryParams};
use super::payload::{self, JsonObject};
use super::state::AppState;
use crate::providers::HotelQuery;
use crate::storage::{DatabaseError, Hotel, HotelFilter};

const FEATURED_COUNT: u32 = 5;
const HOTEL_NOT_FOUND: &str = "Hotel not found.";

/// Destination names the search page sends that Hotelbeds knows by code.
const DESTINATION_ALIASES: &[(&str, &str)] = &[("Lanzarote", "ACE")];

/// Query values are kept as text; blank reads as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub city: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
    pub include_unavailable: Option<String>,
}

impl TryFrom<ListParams> for HotelFilter {
    type Error = ApiError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        Ok(Self {
            city: non_blank(params.city),
            min_price: number_param("minPrice", params.min_price)?,
            max_price: number_param("maxPrice", params.max_price)?,
            search: non_blank(params.search),
            include_unavailable: non_blank(params.include_unavailable)
                .is_some_and(|v| payload::loose_bool(&Value::String(v))),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub destination_code: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub adults: Option<String>,
    pub children: Option<String>,
    pub rooms: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// A finite number, or `None` when the parameter is absent or blank.
fn number_param(name: &str, value: Option<String>) -> Result<Option<f64>, ApiError> {
    non_blank(value)
        .map(|v| {
            payload::loose_f64(&Value::String(v))
                .ok_or_else(|| ApiError::bad_request(format!("{name} must be a number")))
        })
        .transpose()
}

fn count_param(name: &str, value: Option<String>, default: u32) -> Result<u32, ApiError> {
    match non_blank(value) {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| {
            ApiError::bad_request(format!("{name} must be a non-negative integer"))
        }),
    }
}

fn resolve_destination(code: &str) -> String {
    DESTINATION_ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map_or_else(|| code.to_string(), |(_, resolved)| (*resolved).to_string())
}

fn hotel_not_found(e: DatabaseError) -> ApiError {
    match e {
        DatabaseError::NotFound(_) => ApiError::not_found(HOTEL_NOT_FOUND),
        other => other.into(),
    }
}

/// `GET /api/hotels`
pub async fn list(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> Result<Json<Vec<Hotel>>, ApiError> {
    let filter = HotelFilter::try_from(params)?;
    let hotels = state.db.list_hotels(&filter).await?;
    Ok(Json(hotels))
}

/// `GET /api/hotels/featured`
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Hotel>>, ApiError> {
    Ok(Json(state.db.featured_hotels(FEATURED_COUNT).await?))
}

/// `GET /api/hotels/{id}`
pub async fn get(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Hotel>, ApiError> {
    let hotel = state.db.get_hotel(id).await.map_err(hotel_not_found)?;
    Ok(Json(hotel))
}

/// `GET /api/hotels/search`
///
/// A provider failure is a 503 with an empty `hotels` array so the search
/// page can tell "provider down" from "nothing available".
pub async fn search(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Response, ApiError> {
    let Some(code) = non_blank(params.destination_code) else {
        return Err(ApiError::bad_request(
            "destinationCode query parameter is required.",
        ));
    };

    let query = HotelQuery {
        destination_code: resolve_destination(code.trim()),
        check_in: params.check_in,
        check_out: params.check_out,
        adults: count_param("adults", params.adults, 1)?,
        children: count_param("children", params.children, 0)?,
        rooms: count_param("rooms", params.rooms, 1)?,
    };

    match state.hotels.search_hotels(&query).await {
        Ok(hotels) => Ok(Json(json!({ "hotels": hotels })).into_response()),
        Err(e) => {
            error!(error = %e, destination = %query.destination_code, "Hotel search failed");
            Ok((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "message": "Hotel search service is temporarily unavailable",
                    "error": "External hotel booking API is currently down. Please try again later.",
                    "hotels": [],
                })),
            )
                .into_response())
        }
    }
}

/// `POST /api/hotels`
pub async fn create(
    State(state): State<AppState>,
    OperatorUser(operator): OperatorUser,
    JsonBody(body): JsonBody<JsonObject>,
) -> Result<(StatusCode, Json<Hotel>), ApiError> {
    let new_hotel = payload::new_hotel(&body)?;
    let hotel = state.db.create_hotel(&new_hotel).await?;
    info!(hotel_id = hotel.id, operator_id = operator.id, "Hotel created");
    Ok((StatusCode::CREATED, Json(hotel)))
}

/// `PUT /api/hotels/{id}`
pub async fn update(
    State(state): State<AppState>,
    OperatorUser(operator): OperatorUser,
    PathParam(id): PathParam<i64>,
    JsonBody(body): JsonBody<JsonObject>,
) -> Result<Json<Hotel>, ApiError> {
    let changes = payload::hotel_changes(&body)?;
    let hotel = state
        .db
        .update_hotel(id, &changes)
        .await
        .map_err(hotel_not_found)?;
    info!(hotel_id = id, operator_id = operator.id, fields = changes.len(), "Hotel updated");
    Ok(Json(hotel))
}

/// `DELETE /api/hotels/{id}`
pub async fn remove(
    State(state): State<AppState>,
    OperatorUser(operator): OperatorUser,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Value>, ApiError> {
    if !state.db.delete_hotel(id).await? {
        return Err(ApiError::not_found(HOTEL_NOT_FOUND));
    }
    info!(hotel_id = id, operator_id = operator.id, "Hotel deleted");
    Ok(Json(json!({ "message": "Hotel removed successfully." })))
}
