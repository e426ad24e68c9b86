//! Request extractors: JSON and query wrappers with API-shaped rejections, and
//! the authenticated caller.

use axum::extract::FromRequestParts;
use axum::extract::{FromRequest, Path, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use tracing::debug;

use super::error::{ApiError, NO_TOKEN, NOT_OPERATOR, TOKEN_FAILED};
use super::state::AppState;
use crate::storage::{DatabaseError, User};

/// `axum::Json` whose rejection is a 400 with a JSON `message`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Query` whose rejection is a 400 with a JSON `message`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

/// `axum::extract::Path` whose rejection is a 400 with a JSON `message`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct PathParam<T>(pub T);

/// The authenticated caller, re-read from the database on every request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// An authenticated caller holding the operator role.
#[derive(Debug, Clone)]
pub struct OperatorUser(pub User);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let token = bearer_token(parts).ok_or_else(|| ApiError::Unauthorized(NO_TOKEN.into()))?;

        let claims = state.jwt.validate(token).map_err(|e| {
            debug!(error = %e, "Token rejected");
            ApiError::Unauthorized(TOKEN_FAILED.into())
        })?;
        let user_id = claims
            .user_id()
            .ok_or_else(|| ApiError::Unauthorized(TOKEN_FAILED.into()))?;

        match state.db.get_user(user_id).await {
            Ok(user) => Ok(Self(user)),
            Err(DatabaseError::NotFound(_)) => {
                debug!(user_id, "Token for missing user");
                Err(ApiError::Unauthorized(TOKEN_FAILED.into()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl FromRequestParts<AppState> for OperatorUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, ApiError> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if !user.role.is_operator() {
            return Err(ApiError::Forbidden(NOT_OPERATOR.into()));
        }
        Ok(Self(user))
    }
}
