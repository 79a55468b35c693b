//! Scan filters evaluated by the store.

use serde_json::Value;
use tunebase_core::Document;

/// A condition a record must satisfy to be returned by a scan.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanFilter {
    /// The attribute equals the value.
    Equals {
        /// Attribute name.
        attribute: String,
        /// Expected value.
        value: Value,
    },
    /// The attribute equals one of the values.
    In {
        /// Attribute name.
        attribute: String,
        /// Accepted values.
        values: Vec<Value>,
    },
}

impl ScanFilter {
    /// `attribute = value`.
    pub fn equals(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Equals {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// `attribute IN (values)`.
    pub fn one_of(attribute: impl Into<String>, values: Vec<Value>) -> Self {
        Self::In {
            attribute: attribute.into(),
            values,
        }
    }

    /// Whether `record` satisfies the condition. Absent attributes never match.
    #[must_use]
    pub fn matches(&self, record: &Document) -> bool {
        match self {
            Self::Equals { attribute, value } => record.get(attribute) == Some(value),
            Self::In { attribute, values } => record
                .get(attribute)
                .is_some_and(|actual| values.contains(actual)),
        }
    }
}
