//! Password hashing.
//!
//! bcrypt is CPU bound, so both operations run on the blocking thread pool.

use crate::error::ApiError;

/// Hash a password with the given bcrypt work factor.
pub async fn hash_password(password: String, cost: u32) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| ApiError::Internal(format!("hashing task failed: {e}")))?
        .map_err(|e| ApiError::Internal(format!("password hashing failed: {e}")))
}

/// Check a password against a stored hash.
///
/// A stored value that is not a bcrypt hash never matches.
pub async fn verify_password(password: String, hash: String) -> Result<bool, ApiError> {
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::Internal(format!("verification task failed: {e}")))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password is not a valid bcrypt hash");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("my_secure_password".into(), TEST_COST)
            .await
            .unwrap();

        assert_ne!(hash, "my_secure_password");
        assert!(verify_password("my_secure_password".into(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong_password".into(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn hashes_are_salted() {
        let first = hash_password("secret".into(), TEST_COST).await.unwrap();
        let second = hash_password("secret".into(), TEST_COST).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn plaintext_stored_value_never_matches() {
        assert!(!verify_password("secret".into(), "secret".into())
            .await
            .unwrap());
    }
}
