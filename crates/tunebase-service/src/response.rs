//! Success envelopes shared by every handler.

use serde::Serialize;

const OK: &str = "OK";

/// `{"status": "OK", "data": ...}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Always `"OK"`.
    pub status: &'static str,
    /// Payload.
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload.
    pub fn ok(data: T) -> Self {
        Self { status: OK, data }
    }
}

/// `{"status": "OK", "total": n, "data": [...]}`
///
/// `total` counts the filtered set before pagination.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    /// Always `"OK"`.
    pub status: &'static str,
    /// Size of the filtered set.
    pub total: usize,
    /// Records of the requested page.
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    /// Wrap one page of records.
    pub fn ok(total: usize, data: Vec<T>) -> Self {
        Self {
            status: OK,
            total,
            data,
        }
    }
}

/// `{"status": "OK", "msg": "..."}`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Always `"OK"`.
    pub status: &'static str,
    /// Confirmation text.
    pub msg: String,
}

impl MessageResponse {
    /// Wrap a confirmation message.
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            status: OK,
            msg: msg.into(),
        }
    }
}
