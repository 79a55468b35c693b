//! Document storage layer for tunebase.
//!
//! This crate provides the item store adapter for users, playlists and songs,
//! plus the typed access functions built on top of it.
//!
//! # Architecture
//!
//! The storage uses one `RocksDB` column family per table:
//!
//! - `usuarios`: user records, keyed by `id_usuario`
//! - `playlists`: playlist records, keyed by `id_playlist`
//! - `canciones`: song records, keyed by `id_cancion`
//!
//! Records are flat JSON objects encoded as CBOR. There are no secondary
//! indexes: lookups by anything other than the key are full scans.
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use tunebase_store::{access, RocksStore, Table};
//!
//! let store = RocksStore::open("/tmp/tunebase-db").unwrap();
//!
//! let song = json!({"titulo": "Hey", "artista": "Someone"});
//! let created = access::create(&store, Table::Songs, song.as_object().cloned().unwrap()).unwrap();
//!
//! let id = created["id_cancion"].as_str().unwrap();
//! let fetched = access::get_by_id(&store, Table::Songs, id).unwrap();
//! assert!(fetched.is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod access;
pub mod error;
pub mod expression;
pub mod filter;
pub mod keys;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;
pub mod schema;

pub use error::{Result, StoreError};
pub use expression::{ExpressionError, UpdateExpression};
pub use filter::ScanFilter;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;
pub use schema::Table;

use tunebase_core::Document;

/// The storage trait defining the document primitives.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, instrumented wrappers in tests).
pub trait Store: Send + Sync {
    /// Get a record by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get(&self, table: Table, id: &str) -> Result<Option<Document>>;

    /// Read every record of a table, optionally keeping only those matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn scan(&self, table: Table, filter: Option<&ScanFilter>) -> Result<Vec<Document>>;

    /// Insert or replace a record. The key is read from the table's key attribute.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MissingKey` if the record has no string key.
    fn put(&self, table: Table, record: &Document) -> Result<()>;

    /// Apply a partial update and return the complete post-update record.
    ///
    /// A missing record is created from the key and the updated attributes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::KeyAttribute` if the update sets the key attribute.
    fn update(&self, table: Table, id: &str, update: &UpdateExpression) -> Result<Document>;

    /// Remove a record. Removing an absent record is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn delete(&self, table: Table, id: &str) -> Result<()>;
}
