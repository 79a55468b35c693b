//! Identifier types for tunebase.
//!
//! Identifiers are generated by the service (UUID v4, hyphenated) when a record
//! is created. Identifiers arriving from clients are accepted verbatim: an
//! unknown or malformed identifier simply does not match any record.

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Return the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier, returning the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }
    };
}

string_id! {
    /// A user identifier (`id_usuario`).
    UserId
}

string_id! {
    /// A playlist identifier (`id_playlist`).
    PlaylistId
}

string_id! {
    /// A song identifier (`id_cancion`).
    SongId
}
