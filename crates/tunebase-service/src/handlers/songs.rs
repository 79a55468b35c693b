//! Song handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use tunebase_core::fields::{song, str_field};
use tunebase_core::song::title_artist_taken;
use tunebase_core::{filter_and_paginate, CreateSongInput, Document};
use tunebase_store::Table;

use super::params::SongListParams;
use super::{existing, require_changes, require_text};
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::extract::{require_id, ApiJson, ApiQuery};
use crate::response::{ApiResponse, ListResponse, MessageResponse};
use crate::state::AppState;

/// List songs, filtered and paginated.
pub async fn list_songs(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<SongListParams>,
) -> Result<Json<ListResponse<Document>>, ApiError> {
    let (filter, pagination) = params.parse()?;

    let songs = state.catalog.list(Table::Songs)?;
    let page = filter_and_paginate(songs, &filter, pagination);

    Ok(Json(ListResponse::ok(page.total, page.items)))
}

/// Get one song.
pub async fn get_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let found = existing(&state, Table::Songs, &id)?;
    Ok(Json(ApiResponse::ok(found)))
}

/// Create a song.
pub async fn create_song(
    State(state): State<Arc<AppState>>,
    ApiJson(input): ApiJson<CreateSongInput>,
) -> Result<(StatusCode, Json<ApiResponse<Document>>), ApiError> {
    let new_song = input.validate(&state.config.media)?;

    let songs = state.catalog.list(Table::Songs)?;
    if title_artist_taken(&songs, &new_song.title, &new_song.artist, None) {
        return Err(duplicate(&new_song.title, &new_song.artist));
    }

    let created = state.catalog.create(Table::Songs, new_song.attributes)?;
    tracing::info!(
        song_id = str_field(&created, song::ID).unwrap_or_default(),
        "Song created"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}

/// Overwrite the supplied attributes of a song.
///
/// Changing the title or the artist re-checks the pair against every other
/// song, filling the unchanged half from the stored record.
pub async fn update_song(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ApiJson(changes): ApiJson<Document>,
) -> Result<Json<ApiResponse<Document>>, ApiError> {
    let id = require_id(&id)?;
    let current = existing(&state, Table::Songs, id)?;
    require_changes(&changes)?;
    require_text(&changes, &[song::TITLE, song::ARTIST])?;

    if changes.contains_key(song::TITLE) || changes.contains_key(song::ARTIST) {
        let pick = |field: &'static str| {
            str_field(&changes, field)
                .or_else(|| str_field(&current, field))
                .unwrap_or_default()
        };
        let (title, artist) = (pick(song::TITLE), pick(song::ARTIST));

        let songs = state.catalog.list(Table::Songs)?;
        if title_artist_taken(&songs, title, artist, Some(id)) {
            return Err(duplicate(title, artist));
        }
    }

    let updated = state.catalog.update(Table::Songs, id, &changes)?;
    tracing::info!(song_id = %id, "Song updated");

    Ok(Json(ApiResponse::ok(updated)))
}

/// Delete a song. Playlists that list it keep the id.
pub async fn delete_song(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = require_id(&id)?;
    existing(&state, Table::Songs, id)?;

    state.catalog.delete(Table::Songs, id)?;
    tracing::info!(song_id = %id, by = %claims.uid, "Song deleted");

    Ok(Json(MessageResponse::ok("song deleted")))
}

fn duplicate(title: &str, artist: &str) -> ApiError {
    ApiError::Conflict(format!("a song '{title}' by '{artist}' already exists"))
}
