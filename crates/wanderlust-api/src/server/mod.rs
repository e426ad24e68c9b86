//! HTTP surface of the Wanderlust API.

pub mod bookings;
pub mod error;
pub mod extract;
pub mod favorites;
pub mod flights;
pub mod hotels;
pub mod messages;
pub mod payload;
pub mod state;
pub mod users;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// `GET /`
async fn root() -> &'static str {
    "Wanderlust API is running."
}

/// Build the router with every route, CORS open to all origins, request
/// tracing, the request timeout and panic recovery. Unmatched paths fall
/// back to the public directory when one is configured.
pub fn build_router(state: AppState) -> Router {
    let users = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/profile", get(users::profile))
        .route("/profile/photo", put(users::update_photo));

    let hotels = Router::new()
        .route("/", get(hotels::list).post(hotels::create))
        .route("/search", get(hotels::search))
        .route("/featured", get(hotels::featured))
        .route(
            "/{id}",
            get(hotels::get).put(hotels::update).delete(hotels::remove),
        );

    let favorites = Router::new()
        .route("/", get(favorites::list).post(favorites::add))
        .route("/{hotel_id}", delete(favorites::remove));

    let bookings = Router::new().route("/", get(bookings::list).post(bookings::create));

    let messages = Router::new()
        .route("/", get(messages::list).post(messages::send))
        .route("/reply", post(messages::reply))
        .route("/{id}", delete(messages::remove));

    let mut router = Router::new()
        .route("/", get(root))
        .nest("/api/users", users)
        .nest("/api/hotels", hotels)
        .route("/api/flights/search", get(flights::search))
        .nest("/api/favorites", favorites)
        .nest("/api/bookings", bookings)
        .nest("/api/messages", messages);

    if let Some(dir) = &state.public_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.request_timeout,
        ))
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
