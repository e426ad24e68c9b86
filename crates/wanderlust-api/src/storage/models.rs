//! Data models for Wanderlust storage.

use serde::{Deserialize, Serialize};

use crate::auth::Role;

/// A stored account, password hash included. Never serialized; responses
/// go through [`UserProfile`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub profile_photo_url: Option<String>,
    pub created_at: i64,
}

/// A user as returned to API callers: everything except the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub profile_photo_url: Option<String>,
    pub created_at: i64,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            profile_photo_url: user.profile_photo_url,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub description: Option<String>,
    pub price_per_night: f64,
    pub image_url: Option<String>,
    pub availability: bool,
    pub star_rating: Option<i64>,
    pub rating_text: Option<String>,
    pub rating_score: Option<f64>,
    pub review_count: Option<i64>,
    pub location_score: Option<f64>,
    pub distance_from_downtown: Option<String>,
    pub room_type: Option<String>,
    pub room_beds: Option<String>,
    pub breakfast_included: bool,
    pub free_cancellation: bool,
    pub no_prepayment_needed: bool,
    pub promo_message: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Column values for a hotel insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHotel {
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub description: Option<String>,
    pub price_per_night: f64,
    pub image_url: Option<String>,
    pub availability: bool,
    pub star_rating: Option<i64>,
    pub rating_text: Option<String>,
    pub rating_score: Option<f64>,
    pub review_count: Option<i64>,
    pub location_score: Option<f64>,
    pub distance_from_downtown: Option<String>,
    pub room_type: Option<String>,
    pub room_beds: Option<String>,
    pub breakfast_included: bool,
    pub free_cancellation: bool,
    pub no_prepayment_needed: bool,
    pub promo_message: Option<String>,
}

impl NewHotel {
    /// A hotel with only the required columns set and every flag at its
    /// column default.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        price_per_night: f64,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            city: city.into(),
            country: country.into(),
            description: None,
            price_per_night,
            image_url: None,
            availability: true,
            star_rating: None,
            rating_text: None,
            rating_score: None,
            review_count: None,
            location_score: None,
            distance_from_downtown: None,
            room_type: None,
            room_beds: None,
            breakfast_included: false,
            free_cancellation: false,
            no_prepayment_needed: false,
            promo_message: None,
        }
    }
}

/// Storage type of an updatable hotel column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Real,
    Integer,
    Bool,
}

/// Hotel columns an operator may change, with their storage types.
pub const HOTEL_FIELDS: &[(&str, FieldKind)] = &[
    ("name", FieldKind::Text),
    ("address", FieldKind::Text),
    ("city", FieldKind::Text),
    ("country", FieldKind::Text),
    ("description", FieldKind::Text),
    ("price_per_night", FieldKind::Real),
    ("image_url", FieldKind::Text),
    ("availability", FieldKind::Bool),
    ("star_rating", FieldKind::Integer),
    ("rating_text", FieldKind::Text),
    ("rating_score", FieldKind::Real),
    ("review_count", FieldKind::Integer),
    ("location_score", FieldKind::Real),
    ("distance_from_downtown", FieldKind::Text),
    ("room_type", FieldKind::Text),
    ("room_beds", FieldKind::Text),
    ("breakfast_included", FieldKind::Bool),
    ("free_cancellation", FieldKind::Bool),
    ("no_prepayment_needed", FieldKind::Bool),
    ("promo_message", FieldKind::Text),
];

#[derive(Debug, Clone, PartialEq)]
pub enum HotelValue {
    Text(String),
    Real(Option<f64>),
    Integer(Option<i64>),
    Bool(bool),
}

/// One `column = value` assignment of a hotel update.
///
/// Only constructible for columns listed in [`HOTEL_FIELDS`], so the column
/// name is safe to splice into SQL.
#[derive(Debug, Clone, PartialEq)]
pub struct HotelChange {
    column: &'static str,
    value: HotelValue,
}

impl HotelChange {
    pub fn new(column: &str, value: HotelValue) -> Option<Self> {
        HOTEL_FIELDS
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(name, _)| Self {
                column: *name,
                value,
            })
    }

    pub const fn column(&self) -> &'static str {
        self.column
    }

    pub const fn value(&self) -> &HotelValue {
        &self.value
    }
}

/// Predicates for the local hotel listing. All present filters must hold.
#[derive(Debug, Clone, Default)]
pub struct HotelFilter {
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub search: Option<String>,
    pub include_unavailable: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub hotel_id: i64,
    pub check_in_date: String,
    pub check_out_date: String,
    pub special_requests: Option<String>,
    pub arrival_time: Option<String>,
    pub add_on_flight: bool,
    pub add_on_car: bool,
    pub add_on_taxi: bool,
    pub created_at: i64,
}

/// A booking joined with the names operators need to read it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BookingSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub username: String,
    pub hotel_name: String,
}

/// Parameters for creating a booking.
pub struct NewBooking<'a> {
    pub user_id: i64,
    pub hotel_id: i64,
    pub check_in_date: &'a str,
    pub check_out_date: &'a str,
    pub special_requests: Option<&'a str>,
    pub arrival_time: Option<&'a str>,
    pub add_on_flight: bool,
    pub add_on_car: bool,
    pub add_on_taxi: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub message: String,
    pub created_at: i64,
}

impl Message {
    /// The other side of this conversation from `user_id`'s point of view.
    pub const fn counterparty(&self, user_id: i64) -> i64 {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }
}

/// A message with both participants' usernames resolved.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MessageWithUsers {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub message: Message,
    pub sender_username: String,
    pub receiver_username: String,
}
