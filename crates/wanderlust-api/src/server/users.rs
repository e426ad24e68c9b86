//! Account routes: registration, login and the caller's profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::ApiError;
use super::extract::{CurrentUser, JsonBody};
use super::state::AppState;
use crate::auth::Role;
use crate::auth::password::{hash_password, verify_password};
use crate::storage::{DatabaseError, UserProfile};

const INVALID_CREDENTIALS: &str = "Invalid credentials.";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub operator_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PhotoRequest {
    pub profile_photo_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `POST /api/users/register`
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let (Some(username), Some(email), Some(password)) = (
        non_empty(req.username),
        non_empty(req.email),
        non_empty(req.password),
    ) else {
        return Err(ApiError::bad_request(
            "Username, email, and password are required.",
        ));
    };

    let role = Role::from_input(req.role.as_deref());
    if role.is_operator()
        && let Some(expected) = state.operator_code.as_deref()
        && req.operator_code.as_deref() != Some(expected)
    {
        warn!(%username, "Operator registration with wrong signup code");
        return Err(ApiError::Forbidden("Invalid operator code.".into()));
    }

    let password_hash = hash_password(&password)?;
    let user = match state
        .db
        .create_user(&username, &email, &password_hash, role)
        .await
    {
        Ok(user) => user,
        Err(DatabaseError::Conflict(_)) => {
            return Err(ApiError::Conflict("Username or email already exists.".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let (token, _) = state.jwt.issue_token(user.id, &user.username, user.role)?;
    info!(user_id = user.id, role = %user.role, "User registered");

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// `POST /api/users/login`
pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let (Some(email), Some(password)) = (non_empty(req.email), non_empty(req.password)) else {
        return Err(ApiError::bad_request("Email and password are required."));
    };

    let user = match state.db.get_user_by_email(&email).await {
        Ok(user) => user,
        Err(DatabaseError::NotFound(_)) => {
            warn!("Login for unknown email");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.into()));
        }
        Err(e) => return Err(e.into()),
    };

    if !verify_password(&password, &user.password_hash)? {
        warn!(user_id = user.id, "Login with wrong password");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.into()));
    }

    let (token, _) = state.jwt.issue_token(user.id, &user.username, user.role)?;
    info!(user_id = user.id, "User logged in");

    Ok(Json(TokenResponse { token }))
}

/// `GET /api/users/profile`
pub async fn profile(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    Json(user.into())
}

/// `PUT /api/users/profile/photo`
pub async fn update_photo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<PhotoRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let Some(url) = non_empty(req.profile_photo_url) else {
        return Err(ApiError::bad_request("Profile photo URL is required."));
    };

    let updated = state.db.update_profile_photo(user.id, url.trim()).await?;
    info!(user_id = user.id, "Profile photo updated");
    Ok(Json(updated.into()))
}
