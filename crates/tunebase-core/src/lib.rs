//! Core types and rules for tunebase.
//!
//! This crate provides the pieces of the music catalog that do not touch
//! storage or HTTP:
//!
//! - **Identifiers**: `UserId`, `PlaylistId`, `SongId`
//! - **Records**: the `Document` representation and wire attribute names
//! - **Input contracts**: `CreateUserInput`, `LoginInput`, `CreatePlaylistInput`,
//!   `CreateSongInput`, each validating required fields and applying defaults
//! - **Uniqueness rules**: playlist name per owner, song (title, artist)
//! - **Listing**: record filters and pagination
//!
//! # Relationships
//!
//! Users reference playlists and playlists reference songs through plain id
//! lists. Nothing enforces these references and nothing cascades on delete.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod defaults;
pub mod error;
pub mod fields;
pub mod ids;
pub mod playlist;
pub mod query;
pub mod song;
pub mod user;

pub use defaults::MediaDefaults;
pub use error::{CatalogError, Result};
pub use fields::Document;
pub use ids::{PlaylistId, SongId, UserId};
pub use playlist::{CreatePlaylistInput, NewPlaylist};
pub use query::{
    filter_and_paginate, Page, Pagination, PlaylistFilter, RecordFilter, SongFilter, UserFilter,
};
pub use song::{CreateSongInput, NewSong};
pub use user::{CreateUserInput, Credentials, LoginInput, NewUser, UserProfile};
