//! Table definitions.
//!
//! Each table lives in its own `RocksDB` column family and is keyed by a
//! single string attribute.

use std::fmt;

use tunebase_core::fields::{playlist, song, user};
use tunebase_core::{PlaylistId, SongId, UserId};

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// User records, keyed by `id_usuario`.
    pub const USERS: &str = "usuarios";

    /// Playlist records, keyed by `id_playlist`.
    pub const PLAYLISTS: &str = "playlists";

    /// Song records, keyed by `id_cancion`.
    pub const SONGS: &str = "canciones";
}

/// The three record tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    /// Users.
    Users,
    /// Playlists.
    Playlists,
    /// Songs.
    Songs,
}

impl Table {
    /// Every table, in creation order.
    pub const ALL: [Table; 3] = [Table::Users, Table::Playlists, Table::Songs];

    /// Column family holding this table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Users => cf::USERS,
            Self::Playlists => cf::PLAYLISTS,
            Self::Songs => cf::SONGS,
        }
    }

    /// Attribute holding the record's primary key.
    #[must_use]
    pub const fn key_attribute(self) -> &'static str {
        match self {
            Self::Users => user::ID,
            Self::Playlists => playlist::ID,
            Self::Songs => song::ID,
        }
    }

    /// Generate a fresh identifier for a record of this table.
    #[must_use]
    pub fn generate_id(self) -> String {
        match self {
            Self::Users => UserId::generate().into_inner(),
            Self::Playlists => PlaylistId::generate().into_inner(),
            Self::Songs => SongId::generate().into_inner(),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    Table::ALL.iter().map(|t| t.name()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_have_distinct_families() {
        let families = all_column_families();
        assert_eq!(families, vec!["usuarios", "playlists", "canciones"]);
    }

    #[test]
    fn key_attributes() {
        assert_eq!(Table::Users.key_attribute(), "id_usuario");
        assert_eq!(Table::Playlists.key_attribute(), "id_playlist");
        assert_eq!(Table::Songs.key_attribute(), "id_cancion");
    }

    #[test]
    fn generated_ids_are_fresh() {
        for table in Table::ALL {
            let (a, b) = (table.generate_id(), table.generate_id());
            assert_eq!(a.len(), 36);
            assert_ne!(a, b);
        }
    }
}
