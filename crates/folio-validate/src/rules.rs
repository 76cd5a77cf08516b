//! Field-level validation rules.
//!
//! Each rule takes a raw value, trims it, and returns `Ok(())` or the error
//! message to show next to the field.  The same functions run in the client
//! controller and in the server intake handler.
//!
//! Rule order per field:
//!
//! 1. **Required**: an empty (trimmed) value fails required fields and
//!    passes the optional `phone` field without further checks.
//! 2. **Length**: minimum character count (name 2, subject 5, message 10).
//! 3. **Shape**: a pattern check (name, email, phone).

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use folio_contracts::{
    field::{FieldErrors, FieldName},
    submission::ContactForm,
};

pub const NAME_MIN_CHARS: usize = 2;
pub const SUBJECT_MIN_CHARS: usize = 5;
pub const MESSAGE_MIN_CHARS: usize = 10;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z\s]+$"));
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| compile(r"^\+?[0-9\s\-()]+$"));

/// # Panics
///
/// Panics if `pattern` is not a valid regex, which cannot happen for the
/// literal patterns above.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in validation pattern must compile")
}

/// Validate one field.
///
/// Returns the message to display on failure.
pub fn validate_field(field: FieldName, raw: &str) -> Result<(), String> {
    let value = raw.trim();

    if value.is_empty() {
        return if field.is_required() {
            Err(format!("{} is required.", field.label()))
        } else {
            Ok(())
        };
    }

    let outcome = match field {
        FieldName::Name => validate_name(value),
        FieldName::Email => validate_email(value),
        FieldName::Phone => validate_phone(value),
        FieldName::Subject => min_chars(field, value, SUBJECT_MIN_CHARS),
        FieldName::Message => min_chars(field, value, MESSAGE_MIN_CHARS),
    };

    if let Err(message) = &outcome {
        debug!(field = %field, %message, "field failed validation");
    }
    outcome
}

/// Validate every field and collect all failures in declaration order.
///
/// There are no cross-field rules: the form is valid iff every field is.
pub fn validate_form(form: &ContactForm) -> FieldErrors {
    FieldName::ALL
        .into_iter()
        .filter_map(|field| {
            validate_field(field, form.get(field))
                .err()
                .map(|message| (field, message))
        })
        .collect()
}

/// Name: at least two characters, letters and whitespace only.
pub fn validate_name(raw: &str) -> Result<(), String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("Name is required.".to_string());
    }
    if value.chars().count() < NAME_MIN_CHARS {
        return Err(format!(
            "Name must be at least {NAME_MIN_CHARS} characters long."
        ));
    }
    if !NAME_RE.is_match(value) {
        return Err("Name can only contain letters and spaces.".to_string());
    }
    Ok(())
}

/// Email: `local@domain.tld`, no whitespace, exactly one `@`.
pub fn validate_email(raw: &str) -> Result<(), String> {
    let value = raw.trim();
    if value.is_empty() {
        return Err("Email is required.".to_string());
    }
    if !EMAIL_RE.is_match(value) {
        return Err("Please enter a valid email address.".to_string());
    }
    Ok(())
}

/// Phone: optional leading `+`, then digits, whitespace, `-`, `(` and `)`.
///
/// An empty value is accepted because the field is optional.
pub fn validate_phone(raw: &str) -> Result<(), String> {
    let value = raw.trim();
    if value.is_empty() || PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err("Please enter a valid phone number.".to_string())
    }
}

fn min_chars(field: FieldName, value: &str, min: usize) -> Result<(), String> {
    if value.chars().count() < min {
        Err(format!(
            "{} must be at least {min} characters long.",
            field.label()
        ))
    } else {
        Ok(())
    }
}
