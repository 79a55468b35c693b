//! Tunebase HTTP client implementation.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, AuthPayload, Document, Envelope, HealthResponse, ListPage, ListQuery,
    LoginRequest, MessageEnvelope, RegisterRequest, RenewPayload, Resource,
};

/// Header carrying the auth token.
const TOKEN_HEADER: &str = "x-token";

/// Tunebase API client.
///
/// Gated calls (renew, listing users, deletes) need a token, set with
/// [`TunebaseClient::with_token`]. Other calls send it when present.
#[derive(Debug, Clone)]
pub struct TunebaseClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl TunebaseClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the service (e.g., `"http://tunebase:3002"`)
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a token sent as `x-token` on every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The token currently attached, if any.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Check that the service is up.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response).await
    }

    /// Register a new user. The returned token is bound to it.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Conflict` if the email is taken.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthPayload, ClientError> {
        let url = self.auth_url("register");
        self.send_data(self.client.post(&url).json(request)).await
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Api` with status 400 for an unknown email or a
    /// wrong password.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthPayload, ClientError> {
        let url = self.auth_url("login");
        let body = LoginRequest { email, password };
        self.send_data(self.client.post(&url).json(&body)).await
    }

    /// Exchange the attached token for a fresh one.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` without a valid token.
    pub async fn renew(&self) -> Result<RenewPayload, ClientError> {
        let url = self.auth_url("renew");
        self.send_data(self.client.get(&url)).await
    }

    /// List a collection, filtered and paginated.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a parameter is rejected.
    pub async fn list(
        &self,
        resource: Resource,
        query: &ListQuery,
    ) -> Result<ListPage<Document>, ClientError> {
        let url = self.collection_url(resource);
        let request = self.client.get(&url).query(query.pairs());
        let response = self.authorize(request).send().await?;
        self.handle_response(response).await
    }

    /// Every playlist listed on a user. Unknown users yield an empty page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn playlists_by_user(&self, user_id: &str) -> Result<ListPage<Document>, ClientError> {
        let url = format!("{}/user/{user_id}", self.collection_url(Resource::Playlists));
        let response = self.authorize(self.client.get(&url)).send().await?;
        self.handle_response(response).await
    }

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the record does not exist.
    pub async fn get(&self, resource: Resource, id: &str) -> Result<Document, ClientError> {
        let url = self.record_url(resource, id);
        self.send_data(self.client.get(&url)).await
    }

    /// Create a user through `/music/users`. Like [`Self::register`], this
    /// issues a token for the new user.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Conflict` if the email is taken.
    pub async fn create_user(&self, request: &RegisterRequest) -> Result<AuthPayload, ClientError> {
        let url = self.collection_url(Resource::Users);
        self.send_data(self.client.post(&url).json(request)).await
    }

    /// Create a playlist.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` for an unknown owner and
    /// `ClientError::Conflict` if the owner already has a playlist with that
    /// name.
    pub async fn create_playlist(&self, playlist: &Document) -> Result<Document, ClientError> {
        self.create(Resource::Playlists, playlist).await
    }

    /// Create a song.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Conflict` if the title and artist pair exists.
    pub async fn create_song(&self, song: &Document) -> Result<Document, ClientError> {
        self.create(Resource::Songs, song).await
    }

    /// Overwrite the given attributes of a record and return the result.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if the record does not exist and
    /// `ClientError::Conflict` if the change breaks a uniqueness rule.
    pub async fn update(
        &self,
        resource: Resource,
        id: &str,
        changes: &Document,
    ) -> Result<Document, ClientError> {
        let url = self.record_url(resource, id);
        self.send_data(self.client.patch(&url).json(changes)).await
    }

    /// Delete a record and return the service's confirmation.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Unauthorized` without a valid token and
    /// `ClientError::NotFound` if the record does not exist.
    pub async fn delete(&self, resource: Resource, id: &str) -> Result<String, ClientError> {
        let url = self.record_url(resource, id);
        let response = self.authorize(self.client.delete(&url)).send().await?;
        let body: MessageEnvelope = self.handle_response(response).await?;
        Ok(body.msg)
    }

    async fn create<B: Serialize + ?Sized>(
        &self,
        resource: Resource,
        body: &B,
    ) -> Result<Document, ClientError> {
        let url = self.collection_url(resource);
        self.send_data(self.client.post(&url).json(body)).await
    }

    fn auth_url(&self, action: &str) -> String {
        format!("{}/api/v1/auth/{action}", self.base_url)
    }

    fn collection_url(&self, resource: Resource) -> String {
        format!("{}/api/v1/music/{}", self.base_url, resource.segment())
    }

    fn record_url(&self, resource: Resource, id: &str) -> String {
        format!("{}/{id}", self.collection_url(resource))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header(TOKEN_HEADER, token),
            None => request,
        }
    }

    /// Send a request and unwrap the `data` of the success envelope.
    async fn send_data<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.authorize(request).send().await?;
        let envelope: Envelope<T> = self.handle_response(response).await?;
        Ok(envelope.data)
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await?;
            return Ok(serde_json::from_slice(&body)?);
        }

        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let code = api_error.data.code;
                let message = api_error.data.error;
                tracing::debug!(status = status.as_u16(), %code, %message, "Request failed");

                match code.as_str() {
                    "not_found" => Err(ClientError::NotFound(message)),
                    "conflict" => Err(ClientError::Conflict(message)),
                    "unauthorized" => Err(ClientError::Unauthorized(message)),
                    _ => Err(ClientError::Api {
                        code,
                        message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = TunebaseClient::new("http://localhost:3002/").unwrap();
        assert_eq!(client.base_url, "http://localhost:3002");
    }

    #[test]
    fn urls_follow_route_table() {
        let client = TunebaseClient::new("http://localhost:3002").unwrap();
        assert_eq!(
            client.record_url(Resource::Songs, "abc"),
            "http://localhost:3002/api/v1/music/songs/abc"
        );
        assert_eq!(client.auth_url("renew"), "http://localhost:3002/api/v1/auth/renew");
    }

    #[test]
    fn token_is_attached() {
        let client = TunebaseClient::new("http://localhost:3002").unwrap();
        assert!(client.token().is_none());
        let client = client.with_token("tok");
        assert_eq!(client.token(), Some("tok"));
    }
}
