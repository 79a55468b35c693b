//! Entity access functions shared by the three tables.
//!
//! Each function is a thin wrapper over one [`Store`] primitive. None of them
//! validates input or checks uniqueness; callers do that before writing.

use serde_json::Value;
use tunebase_core::fields::user;
use tunebase_core::Document;

use crate::error::Result;
use crate::expression::UpdateExpression;
use crate::filter::ScanFilter;
use crate::schema::Table;
use crate::Store;

/// Every record of `table`, in scan order.
///
/// # Errors
///
/// Returns an error if the scan fails.
pub fn list_all(store: &dyn Store, table: Table) -> Result<Vec<Document>> {
    store.scan(table, None)
}

/// The record with identifier `id`, if any.
///
/// # Errors
///
/// Returns an error if the read fails.
pub fn get_by_id(store: &dyn Store, table: Table, id: &str) -> Result<Option<Document>> {
    store.get(table, id)
}

/// Persist `attributes` under a freshly generated identifier and return the
/// stored record.
///
/// The generated identifier always wins over any key attribute already
/// present in `attributes`.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn create(store: &dyn Store, table: Table, attributes: Document) -> Result<Document> {
    let id = table.generate_id();
    let mut record = attributes;
    record.insert(table.key_attribute().to_string(), Value::String(id.clone()));

    store.put(table, &record)?;
    tracing::debug!(%table, %id, "record created");

    Ok(record)
}

/// Overwrite the attributes named in `changes` and return the full
/// post-update record.
///
/// # Errors
///
/// - `StoreError::InvalidUpdate` if `changes` is empty.
/// - `StoreError::KeyAttribute` if `changes` names the key attribute.
pub fn update_by_id(
    store: &dyn Store,
    table: Table,
    id: &str,
    changes: &Document,
) -> Result<Document> {
    let update = UpdateExpression::build(changes)?;
    tracing::debug!(%table, %id, expression = update.expression(), "updating record");

    store.update(table, id, &update)
}

/// Remove the record with identifier `id`.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_by_id(store: &dyn Store, table: Table, id: &str) -> Result<()> {
    store.delete(table, id)?;
    tracing::debug!(%table, %id, "record deleted");
    Ok(())
}

/// The first user whose email is exactly `email`.
///
/// # Errors
///
/// Returns an error if the scan fails.
pub fn find_user_by_email(store: &dyn Store, email: &str) -> Result<Option<Document>> {
    let filter = ScanFilter::equals(user::EMAIL, email);
    Ok(store.scan(Table::Users, Some(&filter))?.into_iter().next())
}

/// The records of `table` whose identifiers appear in `ids`.
///
/// # Errors
///
/// Returns an error if the scan fails.
pub fn find_by_ids(store: &dyn Store, table: Table, ids: &[String]) -> Result<Vec<Document>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let values = ids.iter().cloned().map(Value::String).collect();
    let filter = ScanFilter::one_of(table.key_attribute(), values);
    store.scan(table, Some(&filter))
}
