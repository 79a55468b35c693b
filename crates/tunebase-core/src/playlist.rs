//! Playlist input contracts and the per-owner name uniqueness rule.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::defaults::MediaDefaults;
use crate::error::{CatalogError, Result};
use crate::fields::{playlist, str_field, Document};

/// Body accepted by playlist creation.
///
/// Attributes beyond the known ones are persisted unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePlaylistInput {
    /// Playlist name.
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    /// Description.
    #[serde(rename = "descripcion")]
    pub description: Option<String>,
    /// Owner's user id.
    #[serde(rename = "id_usuario")]
    pub owner: Option<String>,
    /// Cover image URL.
    #[serde(rename = "imagen_portada")]
    pub cover_image: Option<String>,
    /// Song ids.
    #[serde(rename = "canciones_ids")]
    pub song_ids: Option<Value>,
    /// Creation timestamp; set to now when absent.
    #[serde(rename = "fecha_creacion")]
    pub created_at: Option<Value>,
    /// Any other attribute.
    #[serde(flatten)]
    pub extra: Document,
}

/// A validated playlist creation request with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlaylist {
    /// Playlist name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Owner's user id.
    pub owner: String,
    /// Full attribute set to persist (without the identifier).
    pub attributes: Document,
}

impl CreatePlaylistInput {
    /// Check required fields and substitute defaults.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingFields` if `nombre`, `descripcion` or
    /// `id_usuario` is absent or empty.
    pub fn validate(self, defaults: &MediaDefaults, now: DateTime<Utc>) -> Result<NewPlaylist> {
        let mut missing = Vec::new();
        for (value, field) in [
            (&self.name, playlist::NAME),
            (&self.description, playlist::DESCRIPTION),
            (&self.owner, playlist::OWNER),
        ] {
            if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
                missing.push(field);
            }
        }
        if !missing.is_empty() {
            return Err(CatalogError::MissingFields(missing));
        }

        let name = self.name.unwrap_or_default();
        let description = self.description.unwrap_or_default();
        let owner = self.owner.unwrap_or_default();

        let mut attributes = self.extra;
        attributes.insert(playlist::NAME.into(), Value::String(name.clone()));
        attributes.insert(
            playlist::DESCRIPTION.into(),
            Value::String(description.clone()),
        );
        attributes.insert(playlist::OWNER.into(), Value::String(owner.clone()));
        attributes.insert(
            playlist::COVER_IMAGE.into(),
            Value::String(
                self.cover_image
                    .filter(|url| !url.is_empty())
                    .unwrap_or_else(|| defaults.playlist_image.clone()),
            ),
        );
        attributes.insert(
            playlist::SONG_IDS.into(),
            match self.song_ids {
                None | Some(Value::Null) => Value::Array(Vec::new()),
                Some(ids) => ids,
            },
        );
        attributes.insert(
            playlist::CREATED_AT.into(),
            match self.created_at {
                None | Some(Value::Null) => Value::String(now.to_rfc3339()),
                Some(ts) => ts,
            },
        );

        Ok(NewPlaylist {
            name,
            description,
            owner,
            attributes,
        })
    }
}

/// Whether `name` is already used by another playlist of `owner`.
///
/// `exclude` names the playlist being renamed, which never conflicts with itself.
#[must_use]
pub fn name_taken(playlists: &[Document], name: &str, owner: &str, exclude: Option<&str>) -> bool {
    playlists.iter().any(|p| {
        str_field(p, playlist::NAME) == Some(name)
            && str_field(p, playlist::OWNER) == Some(owner)
            && exclude.map_or(true, |id| str_field(p, playlist::ID) != Some(id))
    })
}
