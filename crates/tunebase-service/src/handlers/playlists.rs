//! Playlist handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;

use tunebase_core::fields::{id_list_field, playlist, str_field, user};
use tunebase_core::playlist::name_taken;
use tunebase_core::{filter_and_paginate, CreatePlaylistInput, Document};
use tunebase_store::Table;

use super::params::PlaylistListParams;
use super::{existing, require_changes, require_text};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{require_id, ApiJson, ApiQuery};
use crate::response::{ApiResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// List playlists, filtered and paginated.
pub async fn list_playlists(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<PlaylistListParams>,
) -> Result<Json<ListResponse<Document>>, ApiError> {
    let (filter, pagination) = params.parse()?;

    let playlists = state.catalog.list(Table::Playlists)?;
    let page = filter_and_paginate(playlists, &filter, pagination);

    Ok(Json(ListResponse::ok(page.total, page.items)))
}

/// Every playlist listed in a user's `playlists_ids`.
///
/// An unknown user or an empty list is an empty result, not an error.
pub async fn list_user_playlists(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<ListResponse<Document>>, ApiError> {
    let user_id = require_id(&user_id)?;

    let ids = state
        .catalog
        .get(Table::Users, user_id)?
        .map(|owner| id_list_field(&owner, user::PLAYLIST_IDS))
        .unwrap_or_default();

    let playlists = state.catalog.find_by_ids(Table::Playlists, &ids)?;
    Ok(Json(ListResponse::ok(playlists.len(), playlists)))
}

/// Get one playlist.
pub async fn get_playlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let found = existing(&state, Table::Playlists, &id)?;
    Ok(Json(ApiResponse::ok(found)))
}

/// Create a playlist for an existing user.
pub async fn create_playlist(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<CreatePlaylistInput>,
) -> Result<(StatusCode, Json<ApiResponse<Document>>), ApiError> {
    let new_playlist = input.validate(&state.config.media, Utc::now())?;

    if state.catalog.get(Table::Users, &new_playlist.owner)?.is_none() {
        return Err(ApiError::NotFound(format!(
            "user '{}' does not exist",
            new_playlist.owner
        )));
    }

    let playlists = state.catalog.list(Table::Playlists)?;
    if name_taken(&playlists, &new_playlist.name, &new_playlist.owner, None) {
        return Err(ApiError::Conflict(format!(
            "user '{}' already has a playlist named '{}'",
            new_playlist.owner, new_playlist.name
        )));
    }

    let created = state
        .catalog
        .create(Table::Playlists, new_playlist.attributes)?;
    tracing::info!(
        playlist_id = str_field(&created, playlist::ID).unwrap_or_default(),
        "Playlist created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// Overwrite the supplied attributes of a playlist.
///
/// Renaming the playlist or moving it to another owner re-checks the
/// (name, owner) pair against every other playlist, filling the unchanged
/// half from the stored record.
pub async fn update_playlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<Document>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let id = require_id(&id)?;
    let current = existing(&state, Table::Playlists, id)?;
    require_changes(&changes)?;
    require_text(&changes, &[playlist::NAME, playlist::OWNER])?;

    if changes.contains_key(playlist::NAME) || changes.contains_key(playlist::OWNER) {
        let pick = |field: &'static str| {
            str_field(&changes, field)
                .or_else(|| str_field(&current, field))
                .unwrap_or_default()
        };
        let (name, owner) = (pick(playlist::NAME), pick(playlist::OWNER));

        let playlists = state.catalog.list(Table::Playlists)?;
        if name_taken(&playlists, name, owner, Some(id)) {
            return Err(ApiError::Conflict(format!(
                "user '{owner}' already has a playlist named '{name}'"
            )));
        }
    }

    let updated = state.catalog.update(Table::Playlists, id, &changes)?;
    tracing::info!(playlist_id = %id, "Playlist updated");

    Ok(Json(ApiResponse::ok(updated)))
}

/// Delete a playlist. Songs it references are left in place.
pub async fn delete_playlist(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = require_id(&id)?;
    existing(&state, Table::Playlists, id)?;

    state.catalog.delete(Table::Playlists, id)?;
    tracing::info!(playlist_id = %id, by = %claims.uid, "Playlist deleted");

    Ok(Json(MessageResponse::ok("playlist deleted")))
}
