//! Partial-update directives.
//!
//! An [`UpdateExpression`] is built from a flat change set and overwrites
//! exactly the named attributes of a record, leaving every other attribute
//! untouched. Attribute names never appear verbatim in the rendered
//! expression: each one is aliased (`#f0`, `#f1`, ...) and each value is
//! bound to a placeholder (`:v0`, `:v1`, ...), so names that collide with a
//! store keyword are safe.
//!
//! ```
//! use serde_json::json;
//! use tunebase_store::UpdateExpression;
//!
//! let changes = json!({"nombre": "Mireya", "suscripcion": "premium"});
//! let update = UpdateExpression::build(changes.as_object().unwrap()).unwrap();
//!
//! assert_eq!(update.expression(), "SET #f0 = :v0, #f1 = :v1");
//! assert_eq!(update.attribute_names()["#f0"], "nombre");
//! assert_eq!(update.attribute_values()[":v1"], "premium");
//! ```

use std::collections::BTreeMap;

use serde_json::Value;
use tunebase_core::Document;

/// Errors raised while building an update directive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    /// The change set has no attributes.
    #[error("update requires at least one attribute")]
    Empty,

    /// An attribute name is the empty string.
    #[error("attribute names must not be empty")]
    EmptyAttributeName,
}

/// A whole-value overwrite of one or more attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    assignments: Vec<(String, Value)>,
    expression: String,
}

impl UpdateExpression {
    /// Build a directive setting every attribute of `changes`.
    ///
    /// Attributes are assigned in the change set's key order, so the same
    /// change set always renders the same expression.
    ///
    /// # Errors
    ///
    /// Returns `ExpressionError::Empty` for an empty change set and
    /// `ExpressionError::EmptyAttributeName` if any attribute name is empty.
    pub fn build(changes: &Document) -> Result<Self, ExpressionError> {
        if changes.is_empty() {
            return Err(ExpressionError::Empty);
        }
        if changes.keys().any(String::is_empty) {
            return Err(ExpressionError::EmptyAttributeName);
        }

        let assignments: Vec<(String, Value)> = changes
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        let clauses: Vec<String> = (0..assignments.len())
            .map(|i| format!("{} = {}", name_placeholder(i), value_placeholder(i)))
            .collect();

        Ok(Self {
            assignments,
            expression: format!("SET {}", clauses.join(", ")),
        })
    }

    /// The rendered update expression, e.g. `SET #f0 = :v0, #f1 = :v1`.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Placeholder to attribute name bindings.
    #[must_use]
    pub fn attribute_names(&self) -> BTreeMap<String, String> {
        self.assignments
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name_placeholder(i), name.clone()))
            .collect()
    }

    /// Placeholder to value bindings.
    #[must_use]
    pub fn attribute_values(&self) -> BTreeMap<String, Value> {
        self.assignments
            .iter()
            .enumerate()
            .map(|(i, (_, value))| (value_placeholder(i), value.clone()))
            .collect()
    }

    /// The (attribute, value) pairs this directive sets.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.assignments.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Whether the directive sets `attribute`.
    #[must_use]
    pub fn sets(&self, attribute: &str) -> bool {
        self.assignments.iter().any(|(n, _)| n == attribute)
    }

    /// Apply the directive to a record in place.
    pub fn apply(&self, record: &mut Document) {
        for (name, value) in &self.assignments {
            record.insert(name.clone(), value.clone());
        }
    }
}

fn name_placeholder(index: usize) -> String {
    format!("#f{index}")
}

fn value_placeholder(index: usize) -> String {
    format!(":v{index}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_change_set_is_rejected() {
        assert_eq!(
            UpdateExpression::build(&Document::new()),
            Err(ExpressionError::Empty)
        );
    }

    #[test]
    fn empty_attribute_name_is_rejected() {
        assert_eq!(
            UpdateExpression::build(&doc(json!({"": 1}))),
            Err(ExpressionError::EmptyAttributeName)
        );
    }

    #[test]
    fn reserved_words_are_aliased() {
        let update = UpdateExpression::build(&doc(json!({"name": "x", "year": 2020}))).unwrap();
        assert!(!update.expression().contains("name"));
        assert!(!update.expression().contains("year"));
        assert_eq!(update.attribute_names().len(), 2);
    }

    #[test]
    fn build_is_deterministic() {
        let changes = doc(json!({"b": 1, "a": [1, 2], "c": {"nested": true}}));
        let first = UpdateExpression::build(&changes).unwrap();
        let second = UpdateExpression::build(&changes).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.expression(), "SET #f0 = :v0, #f1 = :v1, #f2 = :v2");
    }

    #[test]
    fn apply_overwrites_only_named_attributes() {
        let mut record = doc(json!({
            "id_cancion": "s1",
            "titulo": "Old",
            "artista": "Someone",
            "tags": ["a"]
        }));
        let update =
            UpdateExpression::build(&doc(json!({"titulo": "New", "tags": ["b", "c"], "bpm": 120})))
                .unwrap();

        update.apply(&mut record);

        assert_eq!(
            Value::Object(record),
            json!({
                "id_cancion": "s1",
                "titulo": "New",
                "artista": "Someone",
                "tags": ["b", "c"],
                "bpm": 120
            })
        );
    }

    #[test]
    fn null_is_a_value_not_a_removal() {
        let mut record = doc(json!({"album": "X"}));
        UpdateExpression::build(&doc(json!({"album": null})))
            .unwrap()
            .apply(&mut record);
        assert_eq!(record.get("album"), Some(&Value::Null));
    }

    #[test]
    fn reports_set_attributes() {
        let update = UpdateExpression::build(&doc(json!({"email": "a@b.c"}))).unwrap();
        assert!(update.sets("email"));
        assert!(!update.sets("nombre"));
        assert_eq!(update.assignments().count(), 1);
    }
}
