//! API handlers.

pub mod auth;
pub mod health;
pub mod params;
pub mod playlists;
pub mod songs;
pub mod users;

use tunebase_core::Document;
use tunebase_store::Table;

use crate::error::ApiError;
use crate::extract::require_id;
use crate::state::AppState;

/// Singular noun used in messages about records of `table`.
fn noun(table: Table) -> &'static str {
    match table {
        Table::Users => "user",
        Table::Playlists => "playlist",
        Table::Songs => "song",
    }
}

/// Load a record that must exist, answering `404` otherwise.
fn existing(state: &AppState, table: Table, id: &str) -> Result<Document, ApiError> {
    let id = require_id(id)?;
    state
        .catalog
        .get(table, id)?
        .ok_or_else(|| ApiError::NotFound(format!("{} '{id}' does not exist", noun(table))))
}

/// Reject a change set that blanks out one of `fields`.
///
/// Fields create requires must stay non-empty strings once updated.
fn require_text(changes: &Document, fields: &[&'static str]) -> Result<(), ApiError> {
    for &field in fields {
        if let Some(value) = changes.get(field) {
            if value.as_str().map_or(true, |s| s.trim().is_empty()) {
                return Err(ApiError::BadRequest(format!(
                    "{field} must be a non-empty string"
                )));
            }
        }
    }
    Ok(())
}

/// Reject an empty change set before any write.
fn require_changes(changes: &Document) -> Result<(), ApiError> {
    if changes.is_empty() {
        return Err(ApiError::BadRequest(
            "update requires at least one attribute".into(),
        ));
    }
    Ok(())
}
