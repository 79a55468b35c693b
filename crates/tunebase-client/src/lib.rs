//! Tunebase Client SDK.
//!
//! A typed client for the tunebase HTTP API: registration and login, token
//! renewal, and CRUD over users, playlists and songs.
//!
//! # Example
//!
//! ```no_run
//! use tunebase_client::{ListQuery, Resource, TunebaseClient};
//!
//! # async fn example() -> Result<(), tunebase_client::ClientError> {
//! let client = TunebaseClient::new("http://tunebase:3002")?;
//!
//! let auth = client.login("ana@example.com", "secret").await?;
//! let client = client.with_token(auth.token);
//!
//! let page = client
//!     .list(Resource::Songs, &ListQuery::new().param("artista", "Queen").limit(5))
//!     .await?;
//! println!("{} matching songs", page.total);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{ClientOptions, TunebaseClient};
pub use error::ClientError;
pub use types::*;
