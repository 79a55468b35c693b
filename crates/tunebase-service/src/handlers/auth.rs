//! Registration, login and token renewal.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use tunebase_core::fields::{str_field, user};
use tunebase_core::{CreateUserInput, LoginInput, UserProfile};
use tunebase_store::Table;

use super::users::{create_user, AuthPayload};
use crate::auth::AuthUser;
use crate::crypto::verify_password;
use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Body of a successful renewal.
#[derive(Debug, Serialize)]
pub struct RenewPayload {
    /// User id.
    pub uid: String,
    /// Current display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Fresh token.
    pub token: String,
}

/// `POST /auth/register`
pub async fn register(
    state: State<Arc<AppState>>,
    body: ApiJson<CreateUserInput>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>), ApiError> {
    create_user(state, body).await
}

/// `POST /auth/login`
///
/// An unknown email and a wrong password are both client errors; neither
/// issues a token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<LoginInput>,
) -> Result<Json<ApiResponse<AuthPayload>>, ApiError> {
    let credentials = input.validate()?;

    let stored = state
        .catalog
        .find_user_by_email(&credentials.email)?
        .ok_or_else(|| {
            ApiError::BadRequest(format!("no user with email '{}'", credentials.email))
        })?;

    let hash = str_field(&stored, user::PASSWORD).unwrap_or_default().to_string();
    if !verify_password(credentials.password, hash).await? {
        tracing::debug!(email = %credentials.email, "Login rejected");
        return Err(ApiError::BadRequest("incorrect password".into()));
    }

    let profile = UserProfile::from(&stored);
    let token = state.tokens.issue(&profile.id, &profile.name)?;
    tracing::info!(user_id = %profile.id, "User logged in");

    Ok(Json(ApiResponse::ok(AuthPayload {
        user: profile,
        token,
    })))
}

/// `GET /auth/renew`
///
/// The caller is looked up by scanning the user table for the token's `uid`.
pub async fn renew(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<RenewPayload>>, ApiError> {
    let users = state.catalog.list(Table::Users)?;
    let current = users
        .iter()
        .find(|u| str_field(u, user::ID) == Some(claims.uid.as_str()))
        .ok_or_else(|| ApiError::NotFound(format!("user '{}' does not exist", claims.uid)))?;

    let name = str_field(current, user::NAME).unwrap_or_default().to_string();
    let email = str_field(current, user::EMAIL).unwrap_or_default().to_string();
    let token = state.tokens.issue(&claims.uid, &name)?;

    Ok(Json(ApiResponse::ok(RenewPayload {
        uid: claims.uid,
        name,
        email,
        token,
    })))
}
