//! Common test utilities for tunebase integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use tunebase_core::Document;
use tunebase_service::{create_router, AppState, ServiceConfig, TokenService, TOKEN_HEADER};
use tunebase_store::{RocksStore, ScanFilter, Store, Table, UpdateExpression};

/// Signing secret used by every harness.
pub const TEST_SECRET: &str = "test-secret";

/// A store wrapper counting write operations.
pub struct CountingStore {
    inner: RocksStore,
    writes: AtomicUsize,
}

impl CountingStore {
    /// Number of put, update and delete calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl Store for CountingStore {
    fn get(&self, table: Table, id: &str) -> tunebase_store::Result<Option<Document>> {
        self.inner.get(table, id)
    }

    fn scan(
        &self,
        table: Table,
        filter: Option<&ScanFilter>,
    ) -> tunebase_store::Result<Vec<Document>> {
        self.inner.scan(table, filter)
    }

    fn put(&self, table: Table, record: &Document) -> tunebase_store::Result<()> {
        self.count();
        self.inner.put(table, record)
    }

    fn update(
        &self,
        table: Table,
        id: &str,
        update: &UpdateExpression,
    ) -> tunebase_store::Result<Document> {
        self.count();
        self.inner.update(table, id, update)
    }

    fn delete(&self, table: Table, id: &str) -> tunebase_store::Result<()> {
        self.count();
        self.inner.delete(table, id)
    }
}

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// The store behind the server.
    pub store: Arc<CountingStore>,
    /// Token service sharing the server's secret.
    pub tokens: TokenService,
    /// Temporary directory for the database (kept alive for test duration).
    pub _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness with a fresh database.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let inner = RocksStore::open(temp_dir.path()).expect("Failed to open store");
        let store = Arc::new(CountingStore {
            inner,
            writes: AtomicUsize::new(0),
        });

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            data_dir: temp_dir.path().to_string_lossy().to_string(),
            jwt_secret: TEST_SECRET.into(),
            bcrypt_cost: 4,
            ..ServiceConfig::default()
        };

        let tokens = TokenService::new(TEST_SECRET, config.token_ttl_hours);
        let state = AppState::new(store.clone(), config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            tokens,
            _temp_dir: temp_dir,
        }
    }

    /// Register a user and return the response `data` (`{user, token}`).
    pub async fn register(&self, name: &str, email: &str, password: &str) -> Value {
        let response = self
            .server
            .post("/api/v1/auth/register")
            .json(&json!({"nombre": name, "email": email, "password": password}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }

    /// Register a user and return its id.
    pub async fn register_id(&self, name: &str, email: &str) -> String {
        let data = self.register(name, email, "secret").await;
        data["user"]["id_usuario"].as_str().unwrap().to_string()
    }

    /// A valid token for an arbitrary caller.
    pub fn token(&self) -> String {
        self.tokens.issue("test-caller", "Tester").unwrap()
    }

    /// Create a song and return the stored record.
    pub async fn create_song(&self, title: &str, artist: &str, duration: u32) -> Value {
        let response = self
            .server
            .post("/api/v1/music/songs")
            .json(&json!({
                "titulo": title,
                "artista": artist,
                "album": "Greatest Hits",
                "duracion_segundos": duration,
                "genero": "Pop"
            }))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// The token header name.
pub fn token_header() -> HeaderName {
    HeaderName::from_static(TOKEN_HEADER)
}

/// A token as a header value.
pub fn token_value(token: &str) -> HeaderValue {
    HeaderValue::from_str(token).expect("token is a valid header value")
}
