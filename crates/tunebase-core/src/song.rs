//! Song input contracts and the (title, artist) uniqueness rule.

use serde::Deserialize;
use serde_json::{Number, Value};

use crate::defaults::MediaDefaults;
use crate::error::{CatalogError, Result};
use crate::fields::{song, str_field, Document};

/// Body accepted by song creation.
///
/// Attributes beyond the known ones are persisted unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSongInput {
    /// Title.
    #[serde(rename = "titulo")]
    pub title: Option<String>,
    /// Artist.
    #[serde(rename = "artista")]
    pub artist: Option<String>,
    /// Album.
    pub album: Option<String>,
    /// Duration in seconds.
    #[serde(rename = "duracion_segundos")]
    pub duration_seconds: Option<Number>,
    /// Genre.
    #[serde(rename = "genero")]
    pub genre: Option<String>,
    /// Image URL.
    #[serde(rename = "imagen_cancion")]
    pub image: Option<String>,
    /// Audio URL.
    #[serde(rename = "url_audio")]
    pub audio: Option<String>,
    /// Any other attribute.
    #[serde(flatten)]
    pub extra: Document,
}

/// A validated song creation request with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSong {
    /// Title.
    pub title: String,
    /// Artist.
    pub artist: String,
    /// Full attribute set to persist (without the identifier).
    pub attributes: Document,
}

impl CreateSongInput {
    /// Check required fields and substitute defaults.
    ///
    /// # Errors
    ///
    /// - `CatalogError::MissingFields` if `titulo`, `artista`, `album`,
    ///   `duracion_segundos` or `genero` is absent or empty (a zero duration
    ///   counts as absent).
    /// - `CatalogError::InvalidField` if the duration is negative.
    pub fn validate(self, defaults: &MediaDefaults) -> Result<NewSong> {
        let mut missing = Vec::new();
        for (value, field) in [
            (&self.title, song::TITLE),
            (&self.artist, song::ARTIST),
            (&self.album, song::ALBUM),
        ] {
            if is_blank(value.as_deref()) {
                missing.push(field);
            }
        }
        let duration = self.duration_seconds.filter(|d| d.as_f64() != Some(0.0));
        if duration.is_none() {
            missing.push(song::DURATION);
        }
        if is_blank(self.genre.as_deref()) {
            missing.push(song::GENRE);
        }
        if !missing.is_empty() {
            return Err(CatalogError::MissingFields(missing));
        }

        let duration = duration.unwrap_or_else(|| Number::from(0));
        if duration.as_f64().is_some_and(|d| d < 0.0) {
            return Err(CatalogError::invalid(song::DURATION, "must be positive"));
        }

        let title = self.title.unwrap_or_default();
        let artist = self.artist.unwrap_or_default();

        let mut attributes = self.extra;
        attributes.insert(song::TITLE.into(), Value::String(title.clone()));
        attributes.insert(song::ARTIST.into(), Value::String(artist.clone()));
        attributes.insert(song::ALBUM.into(), Value::String(self.album.unwrap_or_default()));
        attributes.insert(song::DURATION.into(), Value::Number(duration));
        attributes.insert(song::GENRE.into(), Value::String(self.genre.unwrap_or_default()));
        attributes.insert(
            song::IMAGE.into(),
            Value::String(non_empty_or(self.image, &defaults.song_image)),
        );
        attributes.insert(
            song::AUDIO.into(),
            Value::String(non_empty_or(self.audio, &defaults.song_audio)),
        );

        Ok(NewSong {
            title,
            artist,
            attributes,
        })
    }
}

/// Whether another song already has this exact (title, artist) pair.
///
/// `exclude` names the song being updated, which never conflicts with itself.
#[must_use]
pub fn title_artist_taken(
    songs: &[Document],
    title: &str,
    artist: &str,
    exclude: Option<&str>,
) -> bool {
    songs.iter().any(|s| {
        str_field(s, song::TITLE) == Some(title)
            && str_field(s, song::ARTIST) == Some(artist)
            && exclude.map_or(true, |id| str_field(s, song::ID) != Some(id))
    })
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn non_empty_or(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> CreateSongInput {
        serde_json::from_value(value).unwrap()
    }

    fn full() -> Value {
        json!({
            "titulo": "Never Gonna Give You Up",
            "artista": "Rick Astley",
            "album": "Whenever You Need Somebody",
            "duracion_segundos": 213,
            "genero": "Pop"
        })
    }

    #[test]
    fn applies_media_defaults() {
        let defaults = MediaDefaults::default();
        let new = input(full()).validate(&defaults).unwrap();
        assert_eq!(new.attributes["imagen_cancion"], defaults.song_image.as_str());
        assert_eq!(new.attributes["url_audio"], defaults.song_audio.as_str());
        assert_eq!(new.attributes["duracion_segundos"], 213);
    }

    #[test]
    fn each_required_field_is_enforced() {
        for field in ["titulo", "artista", "album", "duracion_segundos", "genero"] {
            let mut body = full();
            body.as_object_mut().unwrap().remove(field);
            let err = input(body).validate(&MediaDefaults::default()).unwrap_err();
            assert_eq!(err, CatalogError::MissingFields(vec![field]), "{field}");
        }
    }

    #[test]
    fn zero_duration_counts_as_missing() {
        let mut body = full();
        body["duracion_segundos"] = json!(0);
        let err = input(body).validate(&MediaDefaults::default()).unwrap_err();
        assert_eq!(err, CatalogError::MissingFields(vec!["duracion_segundos"]));
    }

    #[test]
    fn negative_duration_is_invalid() {
        let mut body = full();
        body["duracion_segundos"] = json!(-3);
        let err = input(body).validate(&MediaDefaults::default()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidField { field: "duracion_segundos", .. }));
    }

    #[test]
    fn title_artist_pair_is_unique() {
        let all = vec![json!({"id_cancion": "s1", "titulo": "A", "artista": "X"})
            .as_object()
            .cloned()
            .unwrap()];
        assert!(title_artist_taken(&all, "A", "X", None));
        assert!(!title_artist_taken(&all, "A", "Y", None));
        assert!(!title_artist_taken(&all, "A", "X", Some("s1")));
    }
}
