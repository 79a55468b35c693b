//! Service configuration.

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tunebase_core::MediaDefaults;

/// Lowest work factor bcrypt accepts.
const MIN_BCRYPT_COST: u32 = 4;

/// Highest work factor bcrypt accepts.
const MAX_BCRYPT_COST: u32 = 31;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No token signing secret was found.
    #[error("JWT_SECRET is not set and no .secrets/auth.json was found")]
    MissingSecret,

    /// The bcrypt work factor is out of range.
    #[error("BCRYPT_COST must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}, got {0}")]
    InvalidBcryptCost(u32),
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:3002").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "/data/tunebase").
    pub data_dir: String,

    /// HMAC secret used to sign and verify tokens.
    pub jwt_secret: String,

    /// Token lifetime in hours (default: 24).
    pub token_ttl_hours: u64,

    /// bcrypt work factor for password hashes.
    pub bcrypt_cost: u32,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Placeholder media URLs used when a create request omits them.
    pub media: MediaDefaults,
}

/// Auth secrets file structure.
#[derive(Debug, Deserialize)]
struct AuthSecrets {
    jwt_secret: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingSecret` if no signing secret is available
    /// and `ConfigError::InvalidBcryptCost` for an out-of-range work factor.
    pub fn from_env() -> Result<Self, ConfigError> {
        let file_secret = load_auth_secret();
        Self::from_lookup(|key| {
            if key == "JWT_SECRET" && file_secret.is_some() {
                return file_secret.clone();
            }
            std::env::var(key).ok()
        })
    }

    /// Build a configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// See [`ServiceConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let bcrypt_cost = parse_var(&lookup, "BCRYPT_COST").unwrap_or(defaults.bcrypt_cost);
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidBcryptCost(bcrypt_cost));
        }

        Ok(Self {
            listen_addr: lookup("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            data_dir: lookup("DATA_DIR").unwrap_or(defaults.data_dir),
            jwt_secret,
            token_ttl_hours: parse_var(&lookup, "TOKEN_TTL_HOURS")
                .unwrap_or(defaults.token_ttl_hours),
            bcrypt_cost,
            cors_origins: lookup("CORS_ORIGINS")
                .unwrap_or_else(|| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: parse_var(&lookup, "MAX_BODY_BYTES")
                .unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: parse_var(&lookup, "REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
            media: MediaDefaults {
                playlist_image: lookup("DEFAULT_PLAYLIST_IMAGE")
                    .unwrap_or(defaults.media.playlist_image),
                song_image: lookup("DEFAULT_SONG_IMAGE").unwrap_or(defaults.media.song_image),
                song_audio: lookup("DEFAULT_SONG_AUDIO").unwrap_or(defaults.media.song_audio),
            },
        })
    }
}

/// Parse a numeric variable; absent or unparsable values yield `None`.
fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

/// Load the signing secret from the first secrets file found.
fn load_auth_secret() -> Option<String> {
    let secret_paths = [
        ".secrets/auth.json",
        "tunebase/.secrets/auth.json",
        "../.secrets/auth.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<AuthSecrets>(path) {
            tracing::info!(path = %path, "Loaded auth secrets from file");
            return Some(secrets.jwt_secret);
        }
    }

    tracing::debug!("Auth secrets file not found, using environment variables");
    None
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3002".into(),
            data_dir: "/data/tunebase".into(),
            jwt_secret: String::new(),
            token_ttl_hours: 24,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
            media: MediaDefaults::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn secret_is_required() {
        let result = ServiceConfig::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(ConfigError::MissingSecret)));

        let result = ServiceConfig::from_lookup(lookup(&[("JWT_SECRET", "")]));
        assert!(matches!(result, Err(ConfigError::MissingSecret)));
    }

    #[test]
    fn defaults_apply() {
        let config = ServiceConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.listen_addr, "0.0.0.0:3002");
        assert_eq!(config.token_ttl_hours, 24);
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
        assert_eq!(config.media, MediaDefaults::default());
    }

    #[test]
    fn overrides_and_unparsable_numbers() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("TOKEN_TTL_HOURS", "2"),
            ("MAX_BODY_BYTES", "lots"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
            ("DEFAULT_SONG_IMAGE", "http://img.test/x.png"),
        ]))
        .unwrap();

        assert_eq!(config.token_ttl_hours, 2);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.media.song_image, "http://img.test/x.png");
    }

    #[test]
    fn bcrypt_cost_range() {
        let result =
            ServiceConfig::from_lookup(lookup(&[("JWT_SECRET", "s"), ("BCRYPT_COST", "2")]));
        assert!(matches!(result, Err(ConfigError::InvalidBcryptCost(2))));

        let config =
            ServiceConfig::from_lookup(lookup(&[("JWT_SECRET", "s"), ("BCRYPT_COST", "4")]))
                .unwrap();
        assert_eq!(config.bcrypt_cost, 4);
    }

    #[test]
    fn numeric_variables_of_every_width() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("BCRYPT_COST", "5"),
            ("TOKEN_TTL_HOURS", " 48 "),
            ("MAX_BODY_BYTES", "2048"),
            ("REQUEST_TIMEOUT_SECONDS", "7"),
        ]))
        .unwrap();

        assert_eq!(config.bcrypt_cost, 5);
        assert_eq!(config.token_ttl_hours, 48);
        assert_eq!(config.max_body_bytes, 2048);
        assert_eq!(config.request_timeout_seconds, 7);
    }
}
