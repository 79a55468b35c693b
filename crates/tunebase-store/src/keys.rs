//! Key encoding utilities for `RocksDB`.
//!
//! Records are keyed by the UTF-8 bytes of their identifier, so a full scan
//! of a column family yields records in identifier byte order.

/// Create a record key from an identifier.
#[must_use]
pub fn record_key(id: &str) -> Vec<u8> {
    id.as_bytes().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_identifier_bytes() {
        assert_eq!(record_key("3f1c-user"), b"3f1c-user");
    }

    #[test]
    fn keys_order_like_identifiers() {
        assert!(record_key("a") < record_key("b"));
        assert!(record_key("ab") > record_key("a"));
    }
}
