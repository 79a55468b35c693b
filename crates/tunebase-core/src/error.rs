//! Error types for tunebase.

/// Result type for core validation.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Validation failures raised before any store access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// One or more required fields are absent or empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The caller supplied an identifier the service must assign itself.
    #[error("'{0}' cannot be specified manually")]
    IdentifierSupplied(&'static str),

    /// A field is present but holds an unusable value.
    #[error("invalid value for '{field}': {reason}")]
    InvalidField {
        /// The offending attribute.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl CatalogError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_lists_every_field() {
        let err = CatalogError::MissingFields(vec!["nombre", "email"]);
        assert_eq!(err.to_string(), "missing required fields: nombre, email");
    }
}
