//! Placeholder media used when a playlist or song is created without one.

/// Cover image used for playlists created without `imagen_portada`.
pub const DEFAULT_PLAYLIST_IMAGE: &str =
    "https://ddqlflrzivqquzazcjhg.supabase.co/storage/v1/object/public/images/default_playlist_image.png";

/// Image used for songs created without `imagen_cancion`.
pub const DEFAULT_SONG_IMAGE: &str =
    "https://ddqlflrzivqquzazcjhg.supabase.co/storage/v1/object/public/images/default_song_image.png";

/// Audio used for songs created without `url_audio`.
pub const DEFAULT_SONG_AUDIO: &str =
    "https://ddqlflrzivqquzazcjhg.supabase.co/storage/v1/object/public/music/default_song_audio.mp3";

/// The set of placeholder URLs applied at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDefaults {
    /// Playlist cover placeholder.
    pub playlist_image: String,
    /// Song image placeholder.
    pub song_image: String,
    /// Song audio placeholder.
    pub song_audio: String,
}

impl Default for MediaDefaults {
    fn default() -> Self {
        Self {
            playlist_image: DEFAULT_PLAYLIST_IMAGE.into(),
            song_image: DEFAULT_SONG_IMAGE.into(),
            song_audio: DEFAULT_SONG_AUDIO.into(),
        }
    }
}
