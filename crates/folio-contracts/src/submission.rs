//! Form values and the transient submission entity.
//!
//! `ContactForm` carries the five raw field values exactly as typed (client)
//! or received (server).  `ContactSubmission` is what the intake handler
//! builds after sanitizing and validating; it lives for one request only.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::field::FieldName;

/// Unique identifier attached to one intake request in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub uuid::Uuid);

impl RequestId {
    /// Create a new, unique request ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The five contact form values.  Absent values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Phone => &self.phone,
            FieldName::Subject => &self.subject,
            FieldName::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let value = value.into();
        match field {
            FieldName::Name => self.name = value,
            FieldName::Email => self.email = value,
            FieldName::Phone => self.phone = value,
            FieldName::Subject => self.subject = value,
            FieldName::Message => self.message = value,
        }
    }

    /// Build a form from decoded `key=value` pairs.
    ///
    /// Unknown keys are ignored.  When a key repeats, the last value wins.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            if let Some(field) = FieldName::parse(key.as_ref()) {
                form.set(field, value);
            }
        }
        form
    }

    /// The fields as `(wire name, value)` pairs, in declaration order.
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        FieldName::ALL
            .into_iter()
            .map(|f| (f.as_str(), self.get(f)))
            .collect()
    }

    /// Apply `f` to every value.
    pub fn map_values(&self, mut f: impl FnMut(&str) -> String) -> Self {
        let mut out = Self::default();
        for field in FieldName::ALL {
            out.set(field, f(self.get(field)));
        }
        out
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A validated contact message, held only for the duration of one request.
///
/// Invariant: `name`, `email`, `subject`, `message` are non-empty after
/// trimming.  `phone` may be empty.  The server-assigned fields are filled
/// by the intake handler, never by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    /// Local wall-clock time the server accepted the message.
    pub submitted_at: NaiveDateTime,
    /// The caller's network address, when the transport knows it.
    pub source_ip: Option<String>,
    /// The caller's `User-Agent` header, when present.
    pub user_agent: Option<String>,
}
