//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options,
};
use serde_json::Value;
use tunebase_core::Document;

use crate::error::{Result, StoreError};
use crate::expression::UpdateExpression;
use crate::filter::ScanFilter;
use crate::keys;
use crate::schema::{all_column_families, Table};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, table: Table) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(table.name())
            .ok_or_else(|| StoreError::Database(format!("column family not found: {table}")))
    }

    fn serialize(record: &Document) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(record, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    fn deserialize(data: &[u8]) -> Result<Document> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn write(&self, table: Table, id: &str, record: &Document) -> Result<()> {
        let cf = self.cf(table)?;
        let value = Self::serialize(record)?;
        self.db
            .put_cf(&cf, keys::record_key(id), value)
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

impl Store for RocksStore {
    fn get(&self, table: Table, id: &str) -> Result<Option<Document>> {
        let cf = self.cf(table)?;

        self.db
            .get_cf(&cf, keys::record_key(id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn scan(&self, table: Table, filter: Option<&ScanFilter>) -> Result<Vec<Document>> {
        let cf = self.cf(table)?;
        let mut records = Vec::new();

        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let record = Self::deserialize(&value)?;
            if filter.map_or(true, |f| f.matches(&record)) {
                records.push(record);
            }
        }

        Ok(records)
    }

    fn put(&self, table: Table, record: &Document) -> Result<()> {
        let attribute = table.key_attribute();
        let id = record
            .get(attribute)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or(StoreError::MissingKey { attribute })?;

        self.write(table, id, record)
    }

    fn update(&self, table: Table, id: &str, update: &UpdateExpression) -> Result<Document> {
        let attribute = table.key_attribute();
        if update.sets(attribute) {
            return Err(StoreError::KeyAttribute { attribute });
        }

        let mut record = match self.get(table, id)? {
            Some(existing) => existing,
            None => {
                let mut fresh = Document::new();
                fresh.insert(attribute.to_string(), Value::String(id.to_string()));
                fresh
            }
        };
        update.apply(&mut record);

        self.write(table, id, &record)?;
        Ok(record)
    }

    fn delete(&self, table: Table, id: &str) -> Result<()> {
        let cf = self.cf(table)?;

        self.db
            .delete_cf(&cf, keys::record_key(id))
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}
