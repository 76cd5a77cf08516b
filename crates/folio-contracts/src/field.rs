//! Contact form field names and the per-field error mapping.
//!
//! The form has a closed set of five fields.  Their declaration order is the
//! order errors are reported in, on both the client and the server.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// One of the five contact form fields.
///
/// `Ord` follows declaration order, so any ordered collection keyed by
/// `FieldName` iterates name, email, phone, subject, message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldName {
    Name,
    Email,
    Phone,
    Subject,
    Message,
}

impl FieldName {
    /// Every field, in declaration order.
    pub const ALL: [FieldName; 5] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Phone,
        FieldName::Subject,
        FieldName::Message,
    ];

    /// The wire name used in form bodies and JSON error maps.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Name => "name",
            FieldName::Email => "email",
            FieldName::Phone => "phone",
            FieldName::Subject => "subject",
            FieldName::Message => "message",
        }
    }

    /// Human-readable label used in "<Label> is required." messages.
    pub fn label(self) -> &'static str {
        match self {
            FieldName::Name => "Name",
            FieldName::Email => "Email",
            FieldName::Phone => "Phone",
            FieldName::Subject => "Subject",
            FieldName::Message => "Message",
        }
    }

    /// Whether the form refuses an empty value for this field.
    pub fn is_required(self) -> bool {
        !matches!(self, FieldName::Phone)
    }

    /// Resolve a wire name.  Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Name of the markup slot that displays this field's error.
    pub fn error_slot(self) -> String {
        format!("{}-error", self.as_str())
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered mapping from field to error message.
///
/// An empty mapping means the form is valid.  Serializes as a JSON object
/// (`{}` when empty) with lowercase field names as keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldName, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, replacing any earlier message.
    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: FieldName) -> Option<String> {
        self.0.remove(&field)
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Iterate in field declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// The failing fields, in declaration order.
    pub fn fields(&self) -> Vec<FieldName> {
        self.0.keys().copied().collect()
    }
}

impl FromIterator<(FieldName, String)> for FieldErrors {
    fn from_iter<I: IntoIterator<Item = (FieldName, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

// Keys the form does not know about are dropped rather than failing the
// whole response.
impl<'de> Deserialize<'de> for FieldErrors {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(k, v)| FieldName::parse(&k).map(|f| (f, v)))
            .collect())
    }
}
