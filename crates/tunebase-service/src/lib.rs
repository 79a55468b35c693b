//! Tunebase HTTP API Service.
//!
//! This crate provides the HTTP API for the tunebase music catalog:
//!
//! - Registration, login and token renewal
//! - CRUD over users, playlists and songs
//! - Filtered, paginated listings
//!
//! # Authentication
//!
//! Tokens are HS256 JWTs sent in the `x-token` header. Only token renewal,
//! the user listing and the three delete endpoints require one.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Store calls are synchronous

pub mod auth;
pub mod config;
pub mod crypto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{Claims, TokenService, TOKEN_HEADER};
pub use config::{ConfigError, ServiceConfig};
pub use error::ApiError;
pub use routes::create_router;
pub use services::CatalogService;
pub use state::AppState;
