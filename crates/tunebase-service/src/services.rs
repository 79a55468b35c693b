//! Service layer between handlers and the store.
//!
//! Every method forwards to the matching entity access function. Handlers
//! never touch the store directly, so the storage backend can change
//! without touching them.

use std::sync::Arc;

use tunebase_core::Document;
use tunebase_store::{access, Result, Store, Table};

/// Catalog operations over the three tables.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn Store>,
}

impl CatalogService {
    /// Create a service backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Every record of `table`.
    pub fn list(&self, table: Table) -> Result<Vec<Document>> {
        access::list_all(self.store.as_ref(), table)
    }

    /// One record by id.
    pub fn get(&self, table: Table, id: &str) -> Result<Option<Document>> {
        access::get_by_id(self.store.as_ref(), table, id)
    }

    /// Insert a record under a fresh id.
    pub fn create(&self, table: Table, attributes: Document) -> Result<Document> {
        access::create(self.store.as_ref(), table, attributes)
    }

    /// Overwrite the given attributes and return the merged record.
    pub fn update(&self, table: Table, id: &str, changes: &Document) -> Result<Document> {
        access::update_by_id(self.store.as_ref(), table, id, changes)
    }

    /// Remove a record.
    pub fn delete(&self, table: Table, id: &str) -> Result<()> {
        access::delete_by_id(self.store.as_ref(), table, id)
    }

    /// First user with exactly this email.
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<Document>> {
        access::find_user_by_email(self.store.as_ref(), email)
    }

    /// Records of `table` whose ids are listed.
    pub fn find_by_ids(&self, table: Table, ids: &[String]) -> Result<Vec<Document>> {
        access::find_by_ids(self.store.as_ref(), table, ids)
    }
}
