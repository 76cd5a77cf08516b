//! Server-side input sanitizing.
//!
//! Applied to every received field before validation, in this order:
//!
//! 1. trim surrounding whitespace
//! 2. strip backslash escaping (`\x` → `x`, `\\` → `\`)
//! 3. escape markup-significant characters (`& " ' < >`)
//!
//! Validation then runs on the escaped text, so a value such as `O'Brien`
//! reaches the name rule as `O&#039;Brien`.

use folio_contracts::submission::ContactForm;

/// Sanitize a single raw value.
pub fn sanitize(raw: &str) -> String {
    escape_markup(&strip_backslashes(raw.trim()))
}

/// Sanitize every field of a form.
pub fn sanitize_form(form: &ContactForm) -> ContactForm {
    form.map_values(sanitize)
}

/// Remove one level of backslash escaping.
///
/// Each backslash is dropped and the character after it is kept verbatim,
/// so `\\` collapses to a single backslash.  A trailing lone backslash is
/// dropped.
pub fn strip_backslashes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_markup(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}
