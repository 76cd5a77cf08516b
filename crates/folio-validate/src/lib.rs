//! # folio-validate
//!
//! Field validation for the folio contact form.
//!
//! One module, linked into both the client controller and the server intake
//! handler, so the two sides can never disagree about what a valid field is.
//!
//! - [`rules`]: per-field rules and whole-form validation.
//! - [`sanitize`]: server-side trimming, unescaping, and markup escaping,
//!   applied before the server re-runs the rules.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use folio_validate::{validate_form, sanitize_form};
//!
//! let errors = validate_form(&sanitize_form(&form));
//! if errors.is_empty() {
//!     // persist
//! }
//! ```

pub mod rules;
pub mod sanitize;

pub use rules::{validate_email, validate_field, validate_form, validate_name, validate_phone};
pub use sanitize::{escape_markup, sanitize, sanitize_form, strip_backslashes};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use folio_contracts::{field::FieldName, submission::ContactForm};

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: String::new(),
            subject: "Hello there".to_string(),
            message: "This is a test message.".to_string(),
        }
    }

    fn err(field: FieldName, raw: &str) -> String {
        validate_field(field, raw).expect_err("expected a validation failure")
    }

    // ── Minimum lengths ───────────────────────────────────────────────────────

    #[test]
    fn name_minimum_length_boundary() {
        assert!(validate_field(FieldName::Name, "Al").is_ok());
        assert_eq!(
            err(FieldName::Name, "A"),
            "Name must be at least 2 characters long."
        );
    }

    #[test]
    fn subject_minimum_length_boundary() {
        assert!(validate_field(FieldName::Subject, "Hello").is_ok());
        assert_eq!(
            err(FieldName::Subject, "Hell"),
            "Subject must be at least 5 characters long."
        );
    }

    #[test]
    fn message_minimum_length_boundary() {
        assert!(validate_field(FieldName::Message, "0123456789").is_ok());
        assert_eq!(
            err(FieldName::Message, "012345678"),
            "Message must be at least 10 characters long."
        );
    }

    #[test]
    fn email_and_phone_single_character_boundaries() {
        // Shortest accepted email shape, and one character less.
        assert!(validate_field(FieldName::Email, "a@b.c").is_ok());
        assert!(validate_field(FieldName::Email, "a@b.").is_err());

        // A single digit is a valid phone; the empty value is "not provided".
        assert!(validate_field(FieldName::Phone, "5").is_ok());
        assert!(validate_field(FieldName::Phone, "").is_ok());
    }

    #[test]
    fn length_counts_characters_after_trimming() {
        assert!(validate_field(FieldName::Name, "  Al  ").is_ok());
        assert!(validate_field(FieldName::Subject, "   Hell   ").is_err());
        // Multi-byte characters count once.
        assert!(validate_field(FieldName::Message, "ééééééééé").is_err());
        assert!(validate_field(FieldName::Message, "éééééééééé").is_ok());
    }

    // ── Required fields ───────────────────────────────────────────────────────

    #[test]
    fn required_fields_reject_blank_values() {
        for field in [
            FieldName::Name,
            FieldName::Email,
            FieldName::Subject,
            FieldName::Message,
        ] {
            assert_eq!(err(field, "   "), format!("{} is required.", field.label()));
        }
    }

    // ── Shapes ────────────────────────────────────────────────────────────────

    #[test]
    fn name_rejects_non_letters() {
        assert_eq!(
            err(FieldName::Name, "R2D2"),
            "Name can only contain letters and spaces."
        );
        assert!(validate_name("Mary Ann Smith").is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("jane.doe+tag@mail.example.org").is_ok());
        assert_eq!(
            validate_email("not-an-email").unwrap_err(),
            "Please enter a valid email address."
        );
        assert!(validate_email("two@@example.com").is_err());
        assert!(validate_email("spaced out@example.com").is_err());
        assert!(validate_email("nodot@example").is_err());
    }

    #[test]
    fn phone_shapes() {
        assert!(validate_phone("+1 (555) 123-4567").is_ok());
        assert!(validate_phone("020 7946 0958").is_ok());
        assert_eq!(
            validate_phone("555-CALL-NOW").unwrap_err(),
            "Please enter a valid phone number."
        );
        assert!(validate_phone("++15551234").is_err());
        assert!(validate_phone("1+5551234").is_err());
    }

    // ── Whole form ────────────────────────────────────────────────────────────

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate_form(&valid_form()).is_empty());
    }

    #[test]
    fn form_errors_collected_in_declaration_order() {
        let form = ContactForm {
            name: "J".to_string(),
            email: "bad".to_string(),
            phone: "call me".to_string(),
            subject: "hi".to_string(),
            message: "short".to_string(),
        };

        let errors = validate_form(&form);
        assert_eq!(errors.fields(), FieldName::ALL.to_vec());
    }

    #[test]
    fn single_invalid_field_is_the_only_error() {
        for field in FieldName::ALL {
            let mut form = valid_form();
            form.set(field, "!");
            let errors = validate_form(&form);
            assert_eq!(errors.fields(), vec![field], "field {field}");
        }
    }

    // ── Sanitizing ────────────────────────────────────────────────────────────

    #[test]
    fn sanitize_trims_and_escapes_markup() {
        assert_eq!(
            sanitize("  <b>\"Hi\" & bye</b>  "),
            "&lt;b&gt;&quot;Hi&quot; &amp; bye&lt;/b&gt;"
        );
    }

    #[test]
    fn sanitize_strips_backslash_escaping() {
        assert_eq!(strip_backslashes(r"It\'s"), "It's");
        assert_eq!(strip_backslashes(r"a\\b"), r"a\b");
        assert_eq!(strip_backslashes(r"trailing\"), "trailing");
        assert_eq!(sanitize(r"It\'s"), "It&#039;s");
    }

    #[test]
    fn validation_sees_escaped_text() {
        // Client accepts neither, but the reason the server rejects the
        // apostrophe is the escaped entity, not the apostrophe itself.
        let escaped = sanitize("O'Brien");
        assert_eq!(escaped, "O&#039;Brien");
        assert_eq!(
            err(FieldName::Name, &escaped),
            "Name can only contain letters and spaces."
        );

        // Escaping keeps an email with an ampersand in a valid shape.
        assert!(validate_email(&sanitize("a&b@example.com")).is_ok());
    }

    #[test]
    fn client_and_server_agree_on_plain_input() {
        let cases = [
            (FieldName::Name, "Jane Doe"),
            (FieldName::Name, "J"),
            (FieldName::Email, "a@b.co"),
            (FieldName::Email, "not-an-email"),
            (FieldName::Phone, "+44 (0) 20 7946"),
            (FieldName::Phone, "ext. 5"),
            (FieldName::Subject, "  Hello  "),
            (FieldName::Message, "too short"),
            (FieldName::Message, "long enough message"),
        ];

        for (field, raw) in cases {
            assert_eq!(
                validate_field(field, raw),
                validate_field(field, &sanitize(raw)),
                "client and server disagree on {field}={raw:?}"
            );
        }
    }
}
