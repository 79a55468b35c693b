//! Record representation and wire attribute names.
//!
//! Records are stored and returned as flat JSON objects. Attribute names are
//! part of the public wire format and are kept as constants here so that the
//! store, the controllers and the client agree on them.

use serde_json::{Map, Value};

/// A stored record: a flat mapping of attribute name to JSON value.
pub type Document = Map<String, Value>;

/// User attribute names.
pub mod user {
    /// Primary key.
    pub const ID: &str = "id_usuario";
    /// Display name.
    pub const NAME: &str = "nombre";
    /// Email (scan-derived secondary lookup key).
    pub const EMAIL: &str = "email";
    /// Password hash.
    pub const PASSWORD: &str = "password";
    /// Subscription tier.
    pub const SUBSCRIPTION: &str = "suscripcion";
    /// Admin flag.
    pub const IS_ADMIN: &str = "isAdmin";
    /// Ordered playlist identifiers.
    pub const PLAYLIST_IDS: &str = "playlists_ids";
}

/// Playlist attribute names.
pub mod playlist {
    /// Primary key.
    pub const ID: &str = "id_playlist";
    /// Playlist name, unique per owner.
    pub const NAME: &str = "nombre";
    /// Free-form description.
    pub const DESCRIPTION: &str = "descripcion";
    /// Owner's user identifier.
    pub const OWNER: &str = "id_usuario";
    /// Cover image URL.
    pub const COVER_IMAGE: &str = "imagen_portada";
    /// Ordered song identifiers.
    pub const SONG_IDS: &str = "canciones_ids";
    /// Creation timestamp (RFC 3339).
    pub const CREATED_AT: &str = "fecha_creacion";
}

/// Song attribute names.
pub mod song {
    /// Primary key.
    pub const ID: &str = "id_cancion";
    /// Song title.
    pub const TITLE: &str = "titulo";
    /// Artist name.
    pub const ARTIST: &str = "artista";
    /// Album name.
    pub const ALBUM: &str = "album";
    /// Duration in seconds.
    pub const DURATION: &str = "duracion_segundos";
    /// Genre.
    pub const GENRE: &str = "genero";
    /// Cover image URL.
    pub const IMAGE: &str = "imagen_cancion";
    /// Audio URL.
    pub const AUDIO: &str = "url_audio";
}

/// Read a string attribute, if present and a string.
#[must_use]
pub fn str_field<'a>(doc: &'a Document, name: &str) -> Option<&'a str> {
    doc.get(name).and_then(Value::as_str)
}

/// Read a numeric attribute as `f64`, if present and a number.
#[must_use]
pub fn number_field(doc: &Document, name: &str) -> Option<f64> {
    doc.get(name).and_then(Value::as_f64)
}

/// Read a list of string identifiers. Non-string entries are skipped.
#[must_use]
pub fn id_list_field(doc: &Document, name: &str) -> Vec<String> {
    doc.get(name)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
