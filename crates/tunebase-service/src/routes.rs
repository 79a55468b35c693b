//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::Uri;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post};
use axum::{BoxError, Router};
use tower::limit::ConcurrencyLimitLayer;
use tower::timeout::{error::Elapsed, TimeoutLayer};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::error::ApiError;
use crate::handlers::{auth, health, playlists, songs, users};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Auth (`/api/v1/auth`)
/// - `POST /register` - Create a user and issue a token
/// - `POST /login` - Issue a token for valid credentials
/// - `GET /renew` - Issue a fresh token (token required)
///
/// ## Music (`/api/v1/music`)
/// - `GET /users` (token required), `POST /users`
/// - `GET /users/:id`, `PATCH /users/:id`, `DELETE /users/:id` (token required)
/// - `GET /playlists`, `POST /playlists`, `GET /playlists/user/:id`
/// - `GET /playlists/:id`, `PATCH /playlists/:id`, `DELETE /playlists/:id` (token required)
/// - `GET /songs`, `POST /songs`
/// - `GET /songs/:id`, `PATCH /songs/:id`, `DELETE /songs/:id` (token required)
pub fn create_router(state: AppState) -> Router {
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);
    let gate = || from_fn_with_state(state.clone(), require_auth);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/renew", get(auth::renew).route_layer(gate()));

    let music_routes = Router::new()
        .route(
            "/users",
            get(users::list_users)
                .route_layer(gate())
                .merge(post(users::create_user)),
        )
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .merge(delete(users::delete_user).route_layer(gate())),
        )
        .route(
            "/playlists",
            get(playlists::list_playlists).post(playlists::create_playlist),
        )
        .route(
            "/playlists/user/:id",
            get(playlists::list_user_playlists),
        )
        .route(
            "/playlists/:id",
            get(playlists::get_playlist)
                .patch(playlists::update_playlist)
                .merge(delete(playlists::delete_playlist).route_layer(gate())),
        )
        .route("/songs", get(songs::list_songs).post(songs::create_song))
        .route(
            "/songs/:id",
            get(songs::get_song)
                .patch(songs::update_song)
                .merge(delete(songs::delete_song).route_layer(gate())),
        );

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/music", music_routes)
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    let router = Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api_routes)
        .fallback(unknown_route)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes));

    with_timeout(router, Duration::from_secs(request_timeout_seconds)).with_state(state)
}

/// Bound every request by `duration`, answering `408` in the error envelope.
fn with_timeout<S>(router: Router<S>, duration: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .layer(TimeoutLayer::new(duration)),
    )
}

async fn handle_timeout(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        tracing::debug!("Request timed out");
        ApiError::Timeout
    } else {
        ApiError::Internal(err.to_string())
    }
}

async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for '{}'", uri.path()))
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::Value;

    #[tokio::test]
    async fn timeout_uses_error_envelope() {
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                "late"
            }),
        );
        let server = TestServer::new(with_timeout(slow, Duration::from_millis(20))).unwrap();

        let response = server.get("/slow").await;

        response.assert_status(StatusCode::REQUEST_TIMEOUT);
        let body: Value = response.json();
        assert_eq!(body["status"], "FAILED");
        assert_eq!(body["data"]["code"], "timeout");
    }

    #[tokio::test]
    async fn fast_requests_pass_through() {
        let fast = Router::new().route("/fast", get(|| async { "done" }));
        let server = TestServer::new(with_timeout(fast, Duration::from_secs(5))).unwrap();

        let response = server.get("/fast").await;

        response.assert_status_ok();
        response.assert_text("done");
    }
}
