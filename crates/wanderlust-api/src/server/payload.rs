//! Loosely-typed request bodies.
//!
//! Admin forms send numbers and booleans as strings, so hotel and booking
//! payloads are read from a raw JSON object and coerced field by field.

use serde_json::{Map, Value};

use super::error::ApiError;
use crate::storage::{FieldKind, HOTEL_FIELDS, HotelChange, HotelValue, NewHotel};

pub type JsonObject = Map<String, Value>;

/// `true`, `1`, `"true"` and `"1"` (any case) are true; everything else is
/// false.
pub fn loose_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1),
        Value::String(s) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s == "1"
        }
        _ => false,
    }
}

/// A JSON number or a numeric string.
pub fn loose_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// A JSON integer or an integer string.
pub fn loose_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A non-empty string, or a number rendered as one.
pub fn loose_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn present<'a>(body: &'a JsonObject, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|v| !v.is_null())
}

fn text(body: &JsonObject, key: &str) -> Option<String> {
    present(body, key).and_then(loose_text)
}

fn flag(body: &JsonObject, key: &str) -> Option<bool> {
    present(body, key).map(loose_bool)
}

fn missing_fields_error(prefix: &str, missing: &[&str]) -> ApiError {
    ApiError::bad_request(format!("{prefix}: {}", missing.join(", ")))
}

/// Build a hotel insert from an operator's form.
pub fn new_hotel(body: &JsonObject) -> Result<NewHotel, ApiError> {
    let name = text(body, "name");
    let address = text(body, "address");
    let city = text(body, "city");
    let country = text(body, "country");
    let price = present(body, "price_per_night").and_then(loose_f64);

    let missing: Vec<&str> = [
        ("name", name.is_none()),
        ("address", address.is_none()),
        ("city", city.is_none()),
        ("country", country.is_none()),
        ("price_per_night", price.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect();

    let (Some(name), Some(address), Some(city), Some(country), Some(price)) =
        (name, address, city, country, price)
    else {
        return Err(missing_fields_error("Missing required hotel fields", &missing));
    };

    let mut hotel = NewHotel::new(name, address, city, country, price);
    hotel.description = text(body, "description");
    hotel.image_url = text(body, "image_url");
    hotel.availability = flag(body, "availability").unwrap_or(true);
    hotel.star_rating = present(body, "star_rating").and_then(loose_i64);
    hotel.rating_text = text(body, "rating_text");
    hotel.rating_score = present(body, "rating_score").and_then(loose_f64);
    hotel.review_count = present(body, "review_count").and_then(loose_i64);
    hotel.location_score = present(body, "location_score").and_then(loose_f64);
    hotel.distance_from_downtown = text(body, "distance_from_downtown");
    hotel.room_type = text(body, "room_type");
    hotel.room_beds = text(body, "room_beds");
    hotel.breakfast_included = flag(body, "breakfast_included").unwrap_or(false);
    hotel.free_cancellation = flag(body, "free_cancellation").unwrap_or(false);
    hotel.no_prepayment_needed = flag(body, "no_prepayment_needed").unwrap_or(false);
    hotel.promo_message = text(body, "promo_message");
    Ok(hotel)
}

/// Collect the allow-listed, non-null fields of an update form.
///
/// Unknown keys are ignored. An empty result is a 400.
pub fn hotel_changes(body: &JsonObject) -> Result<Vec<HotelChange>, ApiError> {
    let mut changes = Vec::new();

    for &(column, kind) in HOTEL_FIELDS {
        let Some(raw) = present(body, column) else {
            continue;
        };
        let value = match kind {
            FieldKind::Text => match loose_text(raw) {
                Some(s) => HotelValue::Text(s),
                None => continue,
            },
            FieldKind::Real => {
                let parsed = loose_f64(raw);
                if column == "price_per_night" && parsed.is_none() {
                    return Err(ApiError::bad_request("Invalid price_per_night."));
                }
                HotelValue::Real(parsed)
            }
            FieldKind::Integer => HotelValue::Integer(loose_i64(raw)),
            FieldKind::Bool => HotelValue::Bool(loose_bool(raw)),
        };
        if let Some(change) = HotelChange::new(column, value) {
            changes.push(change);
        }
    }

    if changes.is_empty() {
        return Err(ApiError::bad_request("No valid fields to update."));
    }
    Ok(changes)
}

/// A booking request with the caller still to be attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingForm {
    pub hotel_id: i64,
    pub check_in_date: String,
    pub check_out_date: String,
    pub special_requests: Option<String>,
    pub arrival_time: Option<String>,
    pub add_on_flight: bool,
    pub add_on_car: bool,
    pub add_on_taxi: bool,
}

pub fn booking_form(body: &JsonObject) -> Result<BookingForm, ApiError> {
    let hotel_id = present(body, "hotel_id").and_then(loose_i64);
    let check_in = text(body, "check_in_date");
    let check_out = text(body, "check_out_date");

    let missing: Vec<&str> = [
        ("hotel_id", hotel_id.is_none()),
        ("check_in_date", check_in.is_none()),
        ("check_out_date", check_out.is_none()),
    ]
    .into_iter()
    .filter_map(|(field, absent)| absent.then_some(field))
    .collect();

    let (Some(hotel_id), Some(check_in_date), Some(check_out_date)) = (hotel_id, check_in, check_out)
    else {
        return Err(missing_fields_error(
            "Missing required booking information",
            &missing,
        ));
    };

    Ok(BookingForm {
        hotel_id,
        check_in_date,
        check_out_date,
        special_requests: text(body, "special_requests"),
        arrival_time: text(body, "arrival_time"),
        add_on_flight: flag(body, "add_on_flight").unwrap_or(false),
        add_on_car: flag(body, "add_on_car").unwrap_or(false),
        add_on_taxi: flag(body, "add_on_taxi").unwrap_or(false),
    })
}
