//! User handlers.
//!
//! Stored users carry a bcrypt hash under `password`; every response goes
//! through [`sanitize`] or [`UserProfile`] so the hash never leaves the
//! service.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use tunebase_core::fields::{str_field, user};
use tunebase_core::user::sanitize;
use tunebase_core::{filter_and_paginate, CreateUserInput, Document, UserProfile};
use tunebase_store::Table;

use super::params::UserListParams;
use super::{existing, require_changes, require_text};
use crate::auth::AuthUser;
use crate::crypto::hash_password;
use crate::error::ApiError;
use crate::extract::{require_id, ApiJson, ApiQuery};
use crate::response::{ApiResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// A user projection plus a freshly issued token.
#[derive(Debug, Serialize)]
pub struct AuthPayload {
    /// The user, without the password hash.
    pub user: UserProfile,
    /// Signed token for this user.
    pub token: String,
}

/// List users, filtered and paginated.
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<UserListParams>,
) -> Result<Json<ListResponse<Document>>, ApiError> {
    let (filter, pagination) = params.parse()?;

    let users = state.catalog.list(Table::Users)?;
    let page = filter_and_paginate(users, &filter, pagination);

    let data = page.items.into_iter().map(sanitize).collect();
    Ok(Json(ListResponse::ok(page.total, data)))
}

/// Get one user.
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let found = existing(&state, Table::Users, &id)?;
    Ok(Json(ApiResponse::ok(sanitize(found))))
}

/// Create a user and issue a token for it.
///
/// Shared by `POST /auth/register` and `POST /music/users`.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<CreateUserInput>,
) -> Result<(StatusCode, Json<ApiResponse<AuthPayload>>), ApiError> {
    let new_user = input.validate()?;

    if state.catalog.find_user_by_email(&new_user.email)?.is_some() {
        return Err(ApiError::Conflict(format!(
            "a user with email '{}' already exists",
            new_user.email
        )));
    }

    let password_hash = hash_password(new_user.password.clone(), state.config.bcrypt_cost).await?;
    let created = state
        .catalog
        .create(Table::Users, new_user.into_document(password_hash))?;

    let profile = UserProfile::from(&created);
    let token = state.tokens.issue(&profile.id, &profile.name)?;

    tracing::info!(user_id = %profile.id, "User created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AuthPayload {
            user: profile,
            token,
        })),
    ))
}

/// Overwrite the supplied attributes of a user.
///
/// A new email must not belong to another user; a new password is hashed
/// before it is stored.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(mut changes): ApiJson<Document>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let id = require_id(&id)?;
    existing(&state, Table::Users, id)?;
    require_changes(&changes)?;
    require_text(&changes, &[user::NAME, user::EMAIL])?;

    if let Some(email) = str_field(&changes, user::EMAIL).filter(|e| !e.is_empty()) {
        let holder = state.catalog.find_user_by_email(email)?;
        if holder.is_some_and(|u| str_field(&u, user::ID) != Some(id)) {
            return Err(ApiError::Conflict(format!(
                "a user with email '{email}' already exists"
            )));
        }
    }

    if let Some(password) = changes.get(user::PASSWORD) {
        let plain = password
            .as_str()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| ApiError::BadRequest("password must be a non-empty string".into()))?
            .to_string();
        let hash = hash_password(plain, state.config.bcrypt_cost).await?;
        changes.insert(user::PASSWORD.to_string(), Value::String(hash));
    }

    let updated = state.catalog.update(Table::Users, id, &changes)?;
    tracing::info!(user_id = %id, "User updated");

    Ok(Json(ApiResponse::ok(sanitize(updated))))
}

/// Delete a user. Their playlists are left in place.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = require_id(&id)?;
    existing(&state, Table::Users, id)?;

    state.catalog.delete(Table::Users, id)?;
    tracing::info!(user_id = %id, by = %claims.uid, "User deleted");

    Ok(Json(MessageResponse::ok("user deleted")))
}
