//! Request and response types for the tunebase client.

use serde::{Deserialize, Serialize};

pub use tunebase_core::{Document, UserProfile};

/// The three collections exposed under `/api/v1/music`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// `/music/users`
    Users,
    /// `/music/playlists`
    Playlists,
    /// `/music/songs`
    Songs,
}

impl Resource {
    /// Path segment of the collection.
    #[must_use]
    pub fn segment(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Playlists => "playlists",
            Self::Songs => "songs",
        }
    }
}

/// Registration (and user creation) request.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Subscription tier; the service defaults it to `free`.
    #[serde(rename = "suscripcion", skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
    /// Admin flag; the service defaults it to `false`.
    #[serde(rename = "isAdmin", skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl RegisterRequest {
    /// A request with only the required fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            subscription: None,
            is_admin: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// A user plus a freshly issued token.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    /// The user, without its password hash.
    pub user: UserProfile,
    /// Token to send as `x-token`.
    pub token: String,
}

/// Result of a token renewal.
#[derive(Debug, Clone, Deserialize)]
pub struct RenewPayload {
    /// User id.
    pub uid: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Fresh token.
    pub token: String,
}

/// One page of a list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ListPage<T> {
    /// Size of the filtered set before pagination.
    pub total: usize,
    /// Records on this page.
    pub data: Vec<T>,
}

/// Liveness probe body.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    /// `ok` when the service is up.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

/// Filter and pagination parameters of a list call.
///
/// Parameter names are the service's own (`titulo`, `duracionMin`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pairs: Vec<(String, String)>,
}

impl ListQuery {
    /// No filters, default page.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((name.into(), value.to_string()));
        self
    }

    /// 1-based page number.
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.param("page", page)
    }

    /// Page size.
    #[must_use]
    pub fn limit(self, limit: u32) -> Self {
        self.param("limit", limit)
    }

    /// The parameters in insertion order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageEnvelope {
    pub msg: String,
}

/// Failure envelope: `{"status": "FAILED", "data": {"code", "error"}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub data: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: String,
    pub error: String,
}
