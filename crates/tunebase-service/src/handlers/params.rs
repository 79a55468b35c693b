//! Query string parameters of the list endpoints.
//!
//! Every parameter arrives as text. Empty values count as absent; values that
//! must be numeric and are not are rejected with `400`.

use std::str::FromStr;

use serde::Deserialize;
use tunebase_core::{Pagination, PlaylistFilter, SongFilter, UserFilter};

use crate::error::ApiError;

/// `GET /music/users` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct UserListParams {
    suscripcion: Option<String>,
    #[serde(rename = "isAdmin")]
    is_admin: Option<String>,
    limit: Option<String>,
    page: Option<String>,
}

/// `GET /music/playlists` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PlaylistListParams {
    nombre: Option<String>,
    year: Option<String>,
    limit: Option<String>,
    page: Option<String>,
}

/// `GET /music/songs` parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SongListParams {
    titulo: Option<String>,
    artista: Option<String>,
    album: Option<String>,
    genero: Option<String>,
    #[serde(rename = "duracionMin")]
    duration_min: Option<String>,
    #[serde(rename = "duracionMax")]
    duration_max: Option<String>,
    limit: Option<String>,
    page: Option<String>,
}

impl UserListParams {
    /// Split into filter and page selection.
    pub fn parse(self) -> Result<(UserFilter, Pagination), ApiError> {
        let is_admin = match present(self.is_admin).as_deref() {
            None => None,
            Some("true") => Some(true),
            Some("false") => Some(false),
            Some(_) => {
                return Err(ApiError::BadRequest(
                    "query parameter 'isAdmin' must be true or false".into(),
                ))
            }
        };

        let filter = UserFilter {
            subscription: present(self.suscripcion),
            is_admin,
        };
        Ok((filter, pagination(self.page, self.limit)?))
    }
}

impl PlaylistListParams {
    /// Split into filter and page selection.
    pub fn parse(self) -> Result<(PlaylistFilter, Pagination), ApiError> {
        let filter = PlaylistFilter {
            name: present(self.nombre),
            year: number("year", self.year)?,
        };
        Ok((filter, pagination(self.page, self.limit)?))
    }
}

impl SongListParams {
    /// Split into filter and page selection.
    pub fn parse(self) -> Result<(SongFilter, Pagination), ApiError> {
        let filter = SongFilter {
            title: present(self.titulo),
            artist: present(self.artista),
            album: present(self.album),
            genre: present(self.genero),
            duration_min: number("duracionMin", self.duration_min)?,
            duration_max: number("duracionMax", self.duration_max)?,
        };
        Ok((filter, pagination(self.page, self.limit)?))
    }
}

fn pagination(page: Option<String>, limit: Option<String>) -> Result<Pagination, ApiError> {
    Ok(Pagination {
        page: number("page", page)?,
        limit: number("limit", limit)?,
    })
}

fn present(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.is_empty())
}

fn number<T: FromStr>(name: &str, raw: Option<String>) -> Result<Option<T>, ApiError> {
    match present(raw) {
        None => Ok(None),
        Some(v) => v.trim().parse().map(Some).map_err(|_| {
            ApiError::BadRequest(format!("query parameter '{name}' must be a number"))
        }),
    }
}
