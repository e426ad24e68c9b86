#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use wanderlust_api::auth::{JwtManager, Role};
use wanderlust_api::providers::{
    FlightProvider, FlightQuery, HotelProvider, HotelQuery, ProviderError, UnconfiguredProvider,
};
use wanderlust_api::server::{AppState, build_router};
use wanderlust_api::storage::ApiDatabase;

struct FakeFlights;

#[async_trait]
impl FlightProvider for FakeFlights {
    async fn search_flights(&self, query: &FlightQuery) -> Result<Value, ProviderError> {
        if query.origin == "ERR" {
            return Err(ProviderError::Api {
                status: 500,
                message: "Internal Server Error".into(),
            });
        }
        Ok(json!({
            "data": [{ "id": "1", "from": query.origin, "airline": query.airline }],
            "dictionaries": {}
        }))
    }
}

/// Hotels keyed by the destination code they are returned for.
struct FakeHotels;

#[async_trait]
impl HotelProvider for FakeHotels {
    async fn search_hotels(&self, query: &HotelQuery) -> Result<Vec<Value>, ProviderError> {
        match query.destination_code.as_str() {
            "ACE" => Ok(vec![json!({
                "code": 1,
                "name": "Playa",
                "adults": query.adults,
                "rooms": query.rooms,
                "images": [{ "path": "1.jpg" }]
            })]),
            _ => Ok(Vec::new()),
        }
    }
}

/// Answers after a delay longer than any request timeout used here.
struct SlowHotels;

#[async_trait]
impl HotelProvider for SlowHotels {
    async fn search_hotels(&self, _query: &HotelQuery) -> Result<Vec<Value>, ProviderError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(Vec::new())
    }
}

async fn base_state(flights: Arc<dyn FlightProvider>, hotels: Arc<dyn HotelProvider>) -> AppState {
    let db = ApiDatabase::open_in_memory().await.unwrap();
    let jwt = JwtManager::new(b"integration-test-secret", 3600);
    AppState::new(db, jwt, flights, hotels)
}

struct TestApp {
    router: axum::Router,
    db: ApiDatabase,
    jwt: Arc<JwtManager>,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_parts(Arc::new(FakeFlights), Arc::new(FakeHotels), None).await
    }

    async fn with_parts(
        flights: Arc<dyn FlightProvider>,
        hotels: Arc<dyn HotelProvider>,
        operator_code: Option<&str>,
    ) -> Self {
        let state = base_state(flights, hotels)
            .await
            .with_operator_code(operator_code.map(String::from));
        Self::from_state(state)
    }

    fn from_state(state: AppState) -> Self {
        let db = state.db.clone();
        let jwt = Arc::clone(&state.jwt);
        Self {
            router: build_router(state),
            db,
            jwt,
        }
    }

    /// Insert a user directly and return a bearer token for them.
    async fn user(&self, username: &str, role: Role) -> (i64, String) {
        let user = self
            .db
            .create_user(username, &format!("{username}@example.com"), "unused", role)
            .await
            .unwrap();
        let (token, _) = self.jwt.issue_token(user.id, username, role).unwrap();
        (user.id, token)
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let resp = self.router.clone().oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send("GET", uri, token, None).await
    }

    async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, token, Some(body)).await
    }

    async fn hotel(&self, operator: &str, name: &str, price: f64) -> i64 {
        let (status, body) = self
            .post(
                "/api/hotels",
                Some(operator),
                json!({
                    "name": name, "address": "1 Main St", "city": "Paris",
                    "country": "France", "price_per_night": price
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["id"].as_i64().unwrap()
    }
}

// === Accounts ===

#[tokio::test]
async fn register_and_login() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post(
            "/api/users/register",
            None,
            json!({ "username": "alice", "email": "alice@example.com", "password": "pw123456" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, profile) = app.get("/api/users/profile", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["username"], "alice");
    assert_eq!(profile["role"], "public");
    assert!(profile.get("password_hash").is_none());

    let (status, body) = app
        .post(
            "/api/users/login",
            None,
            json!({ "email": "alice@example.com", "password": "pw123456" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn register_requires_all_fields() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post("/api/users/register", None, json!({ "username": "alice", "email": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username, email, and password are required.");
}

#[tokio::test]
async fn duplicate_email_or_username_conflicts() {
    let app = TestApp::new().await;
    app.user("alice", Role::Public).await;

    let (status, body) = app
        .post(
            "/api/users/register",
            None,
            json!({ "username": "alice2", "email": "alice@example.com", "password": "pw" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Username or email already exists.");

    let (status, _) = app
        .post(
            "/api/users/register",
            None,
            json!({ "username": "alice", "email": "new@example.com", "password": "pw" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let app = TestApp::new().await;
    app.post(
        "/api/users/register",
        None,
        json!({ "username": "alice", "email": "alice@example.com", "password": "right" }),
    )
    .await;

    let (wrong_status, wrong_body) = app
        .post(
            "/api/users/login",
            None,
            json!({ "email": "alice@example.com", "password": "wrong" }),
        )
        .await;
    let (unknown_status, unknown_body) = app
        .post(
            "/api/users/login",
            None,
            json!({ "email": "nobody@example.com", "password": "right" }),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["message"], "Invalid credentials.");
    assert_eq!(wrong_body, unknown_body);

    let (status, body) = app.post("/api/users/login", None, json!({ "email": "a@b.c" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email and password are required.");
}

#[tokio::test]
async fn unknown_role_registers_as_public() {
    let app = TestApp::new().await;
    let (_, body) = app
        .post(
            "/api/users/register",
            None,
            json!({ "username": "bob", "email": "bob@example.com", "password": "pw", "role": "admin" }),
        )
        .await;
    let token = body["token"].as_str().unwrap().to_string();

    let (_, profile) = app.get("/api/users/profile", Some(&token)).await;
    assert_eq!(profile["role"], "public");
}

#[tokio::test]
async fn operator_signup_code_is_enforced() {
    let app = TestApp::with_parts(
        Arc::new(FakeFlights),
        Arc::new(FakeHotels),
        Some("letmein"),
    )
    .await;

    let (status, _) = app
        .post(
            "/api/users/register",
            None,
            json!({ "username": "op", "email": "op@example.com", "password": "pw", "role": "operator" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(
            "/api/users/register",
            None,
            json!({
                "username": "op", "email": "op@example.com", "password": "pw",
                "role": "operator", "operator_code": "letmein"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let token = body["token"].as_str().unwrap().to_string();
    let (_, profile) = app.get("/api/users/profile", Some(&token)).await;
    assert_eq!(profile["role"], "operator");
}

#[tokio::test]
async fn profile_photo_update() {
    let app = TestApp::new().await;
    let (_, token) = app.user("alice", Role::Public).await;

    let (status, body) = app
        .send(
            "PUT",
            "/api/users/profile/photo",
            Some(&token),
            Some(json!({ "profile_photo_url": "https://img.example.com/a.png" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["profile_photo_url"], "https://img.example.com/a.png");

    let (status, _) = app
        .send("PUT", "/api/users/profile/photo", Some(&token), Some(json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// === Authorization ===

#[tokio::test]
async fn missing_and_bad_tokens_are_rejected() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/users/profile", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, no token");

    let (status, body) = app.get("/api/users/profile", Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, token failed");
}

#[tokio::test]
async fn token_for_deleted_user_fails() {
    let app = TestApp::new().await;
    let (id, token) = app.user("ghost", Role::Public).await;
    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(app.db.pool())
        .await
        .unwrap();

    let (status, body) = app.get("/api/users/profile", Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, token failed");
}

#[tokio::test]
async fn operator_routes_check_role() {
    let app = TestApp::new().await;
    let (_, public) = app.user("alice", Role::Public).await;
    let (_, operator) = app.user("op", Role::Operator).await;
    let hotel = json!({
        "name": "Lodge", "address": "1 Road", "city": "Oslo",
        "country": "Norway", "price_per_night": 120
    });

    let (status, _) = app.post("/api/hotels", None, hotel.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.post("/api/hotels", Some(&public), hotel.clone()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized as an operator");

    let (status, body) = app.post("/api/hotels", Some(&operator), hotel).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Lodge");
    assert_eq!(body["availability"], true);
}

// === Hotels ===

#[tokio::test]
async fn price_range_filter() {
    let app = TestApp::new().await;
    let (_, op) = app.user("op", Role::Operator).await;
    app.hotel(&op, "Cheap", 100.0).await;
    let mid = app.hotel(&op, "Mid", 250.0).await;
    app.hotel(&op, "Dear", 500.0).await;

    let (status, body) = app.get("/api/hotels?minPrice=200&maxPrice=300", None).await;
    assert_eq!(status, StatusCode::OK);
    let hotels = body.as_array().unwrap();
    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0]["id"], mid);
}

#[tokio::test]
async fn blank_query_values_count_as_absent() {
    let app = TestApp::new().await;
    let (_, op) = app.user("op", Role::Operator).await;
    app.hotel(&op, "Cheap", 100.0).await;
    app.hotel(&op, "Dear", 500.0).await;

    let (status, body) = app.get("/api/hotels?minPrice=&maxPrice=300", None).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = app.get("/api/hotels?city=&search=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn non_numeric_price_filter_is_rejected() {
    let app = TestApp::new().await;
    for uri in ["/api/hotels?minPrice=cheap", "/api/hotels?minPrice=NaN"] {
        let (status, body) = app.get(uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "minPrice must be a number");
    }

    let (status, body) = app.get("/api/hotels?maxPrice=lots", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "maxPrice must be a number");
}

#[tokio::test]
async fn hotel_crud_lifecycle() {
    let app = TestApp::new().await;
    let (_, op) = app.user("op", Role::Operator).await;
    let id = app.hotel(&op, "Lodge", 120.0).await;

    let (status, body) = app.get(&format!("/api/hotels/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Lodge");

    let (status, body) = app
        .send(
            "PUT",
            &format!("/api/hotels/{id}"),
            Some(&op),
            Some(json!({ "price_per_night": "99", "breakfast_included": "true", "id": 500 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["price_per_night"], 99.0);
    assert_eq!(body["breakfast_included"], true);

    let (status, body) = app
        .send("PUT", &format!("/api/hotels/{id}"), Some(&op), Some(json!({ "bogus": 1 })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No valid fields to update.");

    let (status, body) = app.send("DELETE", &format!("/api/hotels/{id}"), Some(&op), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hotel removed successfully.");

    let (status, body) = app.get(&format!("/api/hotels/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Hotel not found.");

    let (status, _) = app.send("DELETE", &format!("/api/hotels/{id}"), Some(&op), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send("PUT", &format!("/api/hotels/{id}"), Some(&op), Some(json!({ "name": "X" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_hotel_without_price_names_the_field() {
    let app = TestApp::new().await;
    let (_, op) = app.user("op", Role::Operator).await;

    let (status, body) = app
        .post(
            "/api/hotels",
            Some(&op),
            json!({ "name": "Lodge", "address": "1 Road", "city": "Oslo", "country": "Norway" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Missing required hotel fields: price_per_night");
}

#[tokio::test]
async fn featured_returns_first_five() {
    let app = TestApp::new().await;
    let (_, op) = app.user("op", Role::Operator).await;
    let mut ids = Vec::new();
    for i in 0..6 {
        ids.push(app.hotel(&op, &format!("Hotel {i}"), 50.0).await);
    }

    let (status, body) = app.get("/api/hotels/featured", None).await;
    assert_eq!(status, StatusCode::OK);
    let featured: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["id"].as_i64().unwrap())
        .collect();
    assert_eq!(featured, &ids[..5]);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = TestApp::new().await;
    let request = Request::builder()
        .method("POST")
        .uri("/api/users/login")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// === Hotel search ===

#[tokio::test]
async fn hotel_search_requires_destination() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/hotels/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "destinationCode query parameter is required.");
}

#[tokio::test]
async fn hotel_search_resolves_alias_and_defaults() {
    let app = TestApp::new().await;
    let (status, body) = app
        .get("/api/hotels/search?destinationCode=Lanzarote&checkIn=2025-08-01&checkOut=2025-08-04", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let hotels = body["hotels"].as_array().unwrap();
    assert_eq!(hotels.len(), 1);
    assert_eq!(hotels[0]["adults"], 1);
    assert_eq!(hotels[0]["rooms"], 1);
    assert_eq!(hotels[0]["images"][0]["path"], "1.jpg");
}

#[tokio::test]
async fn hotel_search_blank_counts_use_defaults() {
    let app = TestApp::new().await;
    let (status, body) = app
        .get("/api/hotels/search?destinationCode=ACE&adults=&rooms=2", None)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["hotels"][0]["adults"], 1);
    assert_eq!(body["hotels"][0]["rooms"], 2);

    let (status, body) = app
        .get("/api/hotels/search?destinationCode=ACE&children=two", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "children must be a non-negative integer");
}

#[tokio::test]
async fn hotel_search_with_no_results_is_empty_ok() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/hotels/search?destinationCode=XYZ", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "hotels": [] }));
}

#[tokio::test]
async fn hotel_search_provider_failure_is_503() {
    let app = TestApp::with_parts(
        Arc::new(FakeFlights),
        Arc::new(UnconfiguredProvider::new("Hotelbeds")),
        None,
    )
    .await;

    let (status, body) = app.get("/api/hotels/search?destinationCode=ACE", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["message"], "Hotel search service is temporarily unavailable");
    assert_eq!(body["hotels"], json!([]));
    assert!(body["error"].is_string());
}

// === Flights ===

#[tokio::test]
async fn flight_search_validates_and_passes_through() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/flights/search?origin=LHR&date=2025-12-25", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Origin, destination, and date are required.");

    let (status, body) = app
        .get("/api/flights/search?origin=LHR&destination=JFK&date=2025-12-25&airline=BA", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["from"], "LHR");
    assert_eq!(body["data"][0]["airline"], "BA");
}

#[tokio::test]
async fn flight_provider_failure_is_500() {
    let app = TestApp::new().await;
    let (status, body) = app
        .get("/api/flights/search?origin=ERR&destination=JFK&date=2025-12-25", None)
        .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Failed to fetch flight data from external API.");
}

// === Favorites ===

#[tokio::test]
async fn favorites_add_then_remove() {
    let app = TestApp::new().await;
    let (_, op) = app.user("op", Role::Operator).await;
    let (_, alice) = app.user("alice", Role::Public).await;
    let hotel = app.hotel(&op, "Lodge", 120.0).await;

    let (status, body) = app.post("/api/favorites", Some(&alice), json!({ "hotelId": hotel })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Favorite added successfully");

    let (status, _) = app.post("/api/favorites", Some(&alice), json!({ "hotelId": hotel })).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, list) = app.get("/api/favorites", Some(&alice)).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["id"], hotel);

    let (status, body) = app
        .send("DELETE", &format!("/api/favorites/{hotel}"), Some(&alice), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Favorite removed successfully");

    let (_, list) = app.get("/api/favorites", Some(&alice)).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn favorite_validation() {
    let app = TestApp::new().await;
    let (_, alice) = app.user("alice", Role::Public).await;

    let (status, body) = app.post("/api/favorites", Some(&alice), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Hotel ID is required");

    let (status, _) = app.post("/api/favorites", Some(&alice), json!({ "hotelId": 999 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// === Bookings ===

#[tokio::test]
async fn booking_lifecycle() {
    let app = TestApp::new().await;
    let (_, op) = app.user("op", Role::Operator).await;
    let (alice_id, alice) = app.user("alice", Role::Public).await;
    let hotel = app.hotel(&op, "Lodge", 120.0).await;

    let (status, body) = app
        .post("/api/bookings", Some(&alice), json!({ "hotel_id": hotel }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Missing required booking information: check_in_date, check_out_date"
    );

    let (status, body) = app
        .post(
            "/api/bookings",
            Some(&alice),
            json!({
                "hotel_id": hotel, "user_id": 12345,
                "check_in_date": "2025-07-01", "check_out_date": "2025-07-05",
                "add_on_car": "true"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Booking created successfully");
    let booking_id = body["bookingId"].as_i64().unwrap();

    let (status, _) = app.get("/api/bookings", Some(&alice)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, list) = app.get("/api/bookings", Some(&op)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["id"], booking_id);
    assert_eq!(list[0]["user_id"], alice_id);
    assert_eq!(list[0]["username"], "alice");
    assert_eq!(list[0]["hotel_name"], "Lodge");
    assert_eq!(list[0]["add_on_car"], true);
}

#[tokio::test]
async fn booking_unknown_hotel_is_not_found() {
    let app = TestApp::new().await;
    let (_, alice) = app.user("alice", Role::Public).await;
    let (status, _) = app
        .post(
            "/api/bookings",
            Some(&alice),
            json!({ "hotel_id": 42, "check_in_date": "2025-07-01", "check_out_date": "2025-07-05" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// === Messages ===

// Messages are routed to the lowest-ID operator; with one operator that is
// always B. Multi-operator routing is a known limitation.
#[tokio::test]
async fn messaging_round_trip() {
    let app = TestApp::new().await;
    let (_, a) = app.user("traveler", Role::Public).await;
    let (_, b) = app.user("operator", Role::Operator).await;

    let (status, _) = app.post("/api/messages", None, json!({ "message": "hi" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post("/api/messages", Some(&a), json!({ "message": "  Is breakfast included?  " }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Message sent successfully");
    assert_eq!(body["data"]["sender_username"], "traveler");
    assert_eq!(body["data"]["receiver_username"], "operator");
    assert_eq!(body["data"]["message"], "Is breakfast included?");
    let original_id = body["data"]["id"].as_i64().unwrap();

    let (status, inbox) = app.get("/api/messages", Some(&b)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(inbox["success"], true);
    assert_eq!(inbox["count"], 1);

    let (status, body) = app
        .post(
            "/api/messages/reply",
            Some(&b),
            json!({ "originalMessageId": original_id, "message": "Yes it is" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Reply sent successfully");
    assert_eq!(body["data"]["receiver_username"], "traveler");

    let (_, thread) = app.get("/api/messages", Some(&a)).await;
    assert_eq!(thread["count"], 2);
    assert_eq!(thread["data"][0]["message"], "Yes it is");
    assert_eq!(thread["data"][0]["sender_username"], "operator");
}

#[tokio::test]
async fn message_validation_and_routing_errors() {
    let app = TestApp::new().await;
    let (_, a) = app.user("traveler", Role::Public).await;

    let (status, body) = app.post("/api/messages", Some(&a), json!({ "message": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Message content is required");

    let (status, body) = app.post("/api/messages", Some(&a), json!({ "message": "hello" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No operators available to receive messages");
}

#[tokio::test]
async fn travelers_only_see_their_own_messages() {
    let app = TestApp::new().await;
    let (_, a) = app.user("alice", Role::Public).await;
    let (_, c) = app.user("carol", Role::Public).await;
    app.user("op", Role::Operator).await;

    app.post("/api/messages", Some(&a), json!({ "message": "from alice" })).await;
    app.post("/api/messages", Some(&c), json!({ "message": "from carol" })).await;

    let (_, alice_view) = app.get("/api/messages", Some(&a)).await;
    assert_eq!(alice_view["count"], 1);
    assert_eq!(alice_view["data"][0]["message"], "from alice");
}

#[tokio::test]
async fn reply_names_the_missing_field() {
    let app = TestApp::new().await;
    let (_, op) = app.user("op", Role::Operator).await;

    let (status, body) = app
        .post("/api/messages/reply", Some(&op), json!({ "originalMessageId": 1, "message": "  " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Reply message content is required");

    let (status, body) = app
        .post("/api/messages/reply", Some(&op), json!({ "message": "hello" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Original message ID is required");
}

#[tokio::test]
async fn reply_and_delete_require_existing_message() {
    let app = TestApp::new().await;
    let (_, a) = app.user("traveler", Role::Public).await;
    let (_, op) = app.user("op", Role::Operator).await;

    let (status, body) = app
        .post(
            "/api/messages/reply",
            Some(&op),
            json!({ "originalMessageId": 999, "message": "hello?" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Original message not found");

    let (_, sent) = app.post("/api/messages", Some(&a), json!({ "message": "bye" })).await;
    let id = sent["data"]["id"].as_i64().unwrap();

    let (status, _) = app.send("DELETE", &format!("/api/messages/{id}"), Some(&a), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.send("DELETE", &format!("/api/messages/{id}"), Some(&op), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "message": "Message deleted successfully" }));

    let (status, body) = app.send("DELETE", &format!("/api/messages/{id}"), Some(&op), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Message not found");
}

// === Misc ===

#[tokio::test]
async fn root_is_plain_text_welcome() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("Wanderlust"));
}

#[tokio::test]
async fn slow_requests_time_out() {
    let state = base_state(Arc::new(FakeFlights), Arc::new(SlowHotels))
        .await
        .with_request_timeout(Duration::from_millis(50));
    let app = TestApp::from_state(state);

    let (status, _) = app.get("/api/hotels/search?destinationCode=ACE", None).await;
    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);

    let (status, _) = app.get("/api/hotels", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn public_dir_serves_unmatched_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("photo")).unwrap();
    std::fs::write(dir.path().join("photo").join("mokkoan.jpg"), "jpeg bytes").unwrap();

    let state = base_state(Arc::new(FakeFlights), Arc::new(FakeHotels))
        .await
        .with_public_dir(Some(dir.path().to_path_buf()));
    let app = TestApp::from_state(state);

    let (status, body) = app.get("/photo/mokkoan.jpg", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "jpeg bytes");

    let (status, _) = app.get("/photo/missing.jpg", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app.get("/api/hotels", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn unknown_paths_are_not_found_without_public_dir() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/photo/mokkoan.jpg", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
