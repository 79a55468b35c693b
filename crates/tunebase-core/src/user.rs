//! User input contracts and projections.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CatalogError, Result};
use crate::fields::{self, user, Document};

/// Subscription tier assigned when none is supplied.
pub const DEFAULT_SUBSCRIPTION: &str = "free";

/// Body accepted by user creation and registration.
///
/// Every field is optional at the type level so that missing fields are
/// reported together, with the catalog's own error, rather than as a
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserInput {
    /// Must be absent: identifiers are assigned by the service.
    #[serde(rename = "id_usuario")]
    pub id: Option<Value>,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Plaintext password, hashed before persistence.
    pub password: Option<String>,
    /// Subscription tier.
    #[serde(rename = "suscripcion")]
    pub subscription: Option<String>,
    /// Admin flag. Anything but a JSON boolean falls back to `false`.
    #[serde(rename = "isAdmin")]
    pub is_admin: Option<Value>,
    /// Initial playlist ids. Anything but an array falls back to `[]`.
    #[serde(rename = "playlists_ids")]
    pub playlist_ids: Option<Value>,
}

/// A validated user creation request with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; never persisted as-is.
    pub password: String,
    /// Subscription tier.
    pub subscription: String,
    /// Admin flag.
    pub is_admin: bool,
    /// Playlist ids.
    pub playlist_ids: Vec<Value>,
}

impl CreateUserInput {
    /// Check required fields and substitute defaults.
    ///
    /// # Errors
    ///
    /// - `CatalogError::MissingFields` if `nombre`, `email` or `password` is absent or empty.
    /// - `CatalogError::IdentifierSupplied` if the body carries `id_usuario`.
    /// - `CatalogError::InvalidField` if the email is malformed.
    pub fn validate(self) -> Result<NewUser> {
        let mut missing = Vec::new();
        let name = required(self.name, user::NAME, &mut missing);
        let email = required(self.email, user::EMAIL, &mut missing);
        let password = required(self.password, user::PASSWORD, &mut missing);
        if !missing.is_empty() {
            return Err(CatalogError::MissingFields(missing));
        }

        if self.id.is_some() {
            return Err(CatalogError::IdentifierSupplied(user::ID));
        }

        let email = email.unwrap_or_default();
        if !is_valid_email(&email) {
            return Err(CatalogError::invalid(user::EMAIL, "not a valid email address"));
        }

        Ok(NewUser {
            name: name.unwrap_or_default(),
            email,
            password: password.unwrap_or_default(),
            subscription: self
                .subscription
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SUBSCRIPTION.to_string()),
            is_admin: self.is_admin.as_ref().and_then(Value::as_bool).unwrap_or(false),
            playlist_ids: match self.playlist_ids {
                Some(Value::Array(ids)) => ids,
                _ => Vec::new(),
            },
        })
    }
}

impl NewUser {
    /// Build the stored attributes, replacing the password with its hash.
    ///
    /// The identifier is not included; the store assigns it.
    #[must_use]
    pub fn into_document(self, password_hash: String) -> Document {
        let mut doc = Document::new();
        doc.insert(user::NAME.into(), Value::String(self.name));
        doc.insert(user::EMAIL.into(), Value::String(self.email));
        doc.insert(user::PASSWORD.into(), Value::String(password_hash));
        doc.insert(user::SUBSCRIPTION.into(), Value::String(self.subscription));
        doc.insert(user::IS_ADMIN.into(), Value::Bool(self.is_admin));
        doc.insert(user::PLAYLIST_IDS.into(), Value::Array(self.playlist_ids));
        doc
    }
}

/// Body accepted by login.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    /// Email address.
    pub email: Option<String>,
    /// Plaintext password.
    pub password: Option<String>,
}

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl LoginInput {
    /// Check that both credentials are present and the email is well formed.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::MissingFields` or `CatalogError::InvalidField`.
    pub fn validate(self) -> Result<Credentials> {
        let mut missing = Vec::new();
        let email = required(self.email, user::EMAIL, &mut missing);
        let password = required(self.password, user::PASSWORD, &mut missing);
        if !missing.is_empty() {
            return Err(CatalogError::MissingFields(missing));
        }

        let email = email.unwrap_or_default();
        if !is_valid_email(&email) {
            return Err(CatalogError::invalid(user::EMAIL, "not a valid email address"));
        }

        Ok(Credentials {
            email,
            password: password.unwrap_or_default(),
        })
    }
}

/// The user fields returned by registration and login. Never carries the hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id.
    #[serde(rename = "id_usuario")]
    pub id: String,
    /// Display name.
    #[serde(rename = "nombre")]
    pub name: String,
    /// Email address.
    pub email: String,
    /// Subscription tier.
    #[serde(rename = "suscripcion", default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<String>,
    /// Playlist ids.
    #[serde(rename = "playlists_ids", default)]
    pub playlist_ids: Vec<String>,
    /// Admin flag.
    #[serde(rename = "isAdmin", default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl From<&Document> for UserProfile {
    fn from(doc: &Document) -> Self {
        let text = |name: &str| fields::str_field(doc, name).unwrap_or_default().to_string();
        Self {
            id: text(user::ID),
            name: text(user::NAME),
            email: text(user::EMAIL),
            subscription: fields::str_field(doc, user::SUBSCRIPTION).map(str::to_string),
            playlist_ids: fields::id_list_field(doc, user::PLAYLIST_IDS),
            is_admin: doc.get(user::IS_ADMIN).and_then(Value::as_bool),
        }
    }
}

/// Remove the password hash from a stored user record.
#[must_use]
pub fn sanitize(mut doc: Document) -> Document {
    doc.remove(user::PASSWORD);
    doc
}

/// Shallow shape check: one `@`, a non-empty local part and a dotted domain.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

fn required(
    value: Option<String>,
    field: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v),
        _ => {
            missing.push(field);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: Value) -> CreateUserInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn applies_defaults() {
        let user = input(json!({"nombre": "Ana", "email": "ana@x.com", "password": "secret"}))
            .validate()
            .unwrap();
        assert_eq!(user.subscription, "free");
        assert!(!user.is_admin);
        assert!(user.playlist_ids.is_empty());
    }

    #[test]
    fn keeps_supplied_optionals() {
        let user = input(json!({
            "nombre": "Ana",
            "email": "ana@x.com",
            "password": "secret",
            "suscripcion": "premium",
            "isAdmin": true,
            "playlists_ids": ["p1"]
        }))
        .validate()
        .unwrap();
        assert_eq!(user.subscription, "premium");
        assert!(user.is_admin);
        assert_eq!(user.playlist_ids, vec![json!("p1")]);
    }

    #[test]
    fn non_boolean_admin_flag_falls_back() {
        let user = input(json!({
            "nombre": "Ana",
            "email": "ana@x.com",
            "password": "secret",
            "isAdmin": "yes",
            "playlists_ids": "p1"
        }))
        .validate()
        .unwrap();
        assert!(!user.is_admin);
        assert!(user.playlist_ids.is_empty());
    }

    #[test]
    fn reports_all_missing_fields() {
        let err = input(json!({"email": "", "nombre": "Ana"})).validate().unwrap_err();
        assert_eq!(err, CatalogError::MissingFields(vec!["email", "password"]));
    }

    #[test]
    fn rejects_supplied_identifier() {
        let err = input(json!({
            "id_usuario": "mine",
            "nombre": "Ana",
            "email": "ana@x.com",
            "password": "secret"
        }))
        .validate()
        .unwrap_err();
        assert_eq!(err, CatalogError::IdentifierSupplied("id_usuario"));
    }

    #[test]
    fn document_holds_hash_not_password() {
        let doc = input(json!({"nombre": "Ana", "email": "ana@x.com", "password": "secret"}))
            .validate()
            .unwrap()
            .into_document("$2b$hash".into());
        assert_eq!(doc["password"], "$2b$hash");
        assert_eq!(doc["suscripcion"], "free");
        assert!(!doc.contains_key("id_usuario"));
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("ana@x.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(!is_valid_email("ana"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("ana@x"));
        assert!(!is_valid_email("ana@@x.com"));
        assert!(!is_valid_email("an a@x.com"));
    }

    #[test]
    fn profile_omits_password() {
        let doc = json!({
            "id_usuario": "u1",
            "nombre": "Ana",
            "email": "ana@x.com",
            "password": "hash",
            "suscripcion": "free",
            "playlists_ids": ["p1"]
        });
        let profile = UserProfile::from(doc.as_object().unwrap());
        let out = serde_json::to_value(&profile).unwrap();
        assert!(out.get("password").is_none());
        assert_eq!(out["playlists_ids"], json!(["p1"]));
        assert!(out.get("isAdmin").is_none());
    }

    #[test]
    fn sanitize_strips_hash_only() {
        let doc = json!({"id_usuario": "u1", "password": "hash"});
        let clean = sanitize(doc.as_object().cloned().unwrap());
        assert_eq!(clean.len(), 1);
        assert_eq!(clean["id_usuario"], "u1");
    }
}
