//! Application state.

use std::sync::Arc;

use tunebase_store::Store;

use crate::auth::TokenService;
use crate::config::ServiceConfig;
use crate::services::CatalogService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Catalog operations over the store.
    pub catalog: CatalogService,

    /// Token signing and verification.
    pub tokens: TokenService,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(store: Arc<dyn Store>, config: ServiceConfig) -> Self {
        let tokens = TokenService::new(&config.jwt_secret, config.token_ttl_hours);

        Self {
            catalog: CatalogService::new(store),
            tokens,
            config,
        }
    }
}
