//! The server intake handler: the contact form's only write path.
//!
//! Every request runs the same pipeline:
//!
//!   Method → Extract → Sanitize → Validate → Record → Append → Respond
//!
//! The handler never returns an error to its caller.  Each stage that can
//! fail maps to an `IntakeReply` with a fixed, caller-safe message, so the
//! HTTP surface always has a well-formed body to send.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, error, info, warn};

use folio_contracts::{
    response::IntakeReply,
    submission::{ContactForm, ContactSubmission, RequestId},
};
use folio_validate::{sanitize_form, validate_form};

use crate::traits::MessageStore;

/// The only method the intake endpoint accepts.
pub const INTAKE_METHOD: &str = "POST";

/// One request as seen by the handler, independent of the HTTP library.
#[derive(Debug, Clone, Default)]
pub struct IntakeRequest {
    /// The HTTP method, as sent (methods are case-sensitive).
    pub method: String,
    /// Raw field values.  Absent fields are empty strings.
    pub form: ContactForm,
    /// The caller's network address, if the transport knows it.
    pub remote_addr: Option<String>,
    /// The caller's `User-Agent` header, if present.
    pub user_agent: Option<String>,
}

impl IntakeRequest {
    /// A `POST` carrying `form`, with no caller metadata.
    pub fn post(form: ContactForm) -> Self {
        Self {
            method: INTAKE_METHOD.to_string(),
            form,
            ..Self::default()
        }
    }
}

/// Runs the intake pipeline against a `MessageStore`.
///
/// The handler holds no per-request state; one instance serves every request
/// for the life of the server.
pub struct IntakeHandler {
    store: Box<dyn MessageStore>,
}

impl IntakeHandler {
    pub fn new(store: Box<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Whether `method` reaches the pipeline at all.
    pub fn accepts_method(method: &str) -> bool {
        method == INTAKE_METHOD
    }

    /// Handle one request, stamping it with the current local time.
    pub fn handle(&self, request: IntakeRequest) -> IntakeReply {
        self.handle_at(request, Local::now().naive_local())
    }

    /// Handle one request with an explicit acceptance time.
    ///
    /// # Pipeline
    ///
    /// 1. Reject any method other than `POST` without touching the body
    /// 2. Sanitize every field (trim, unescape, escape markup)
    /// 3. Validate the sanitized values, collecting every field error
    /// 4. Errors → `Invalid` reply, nothing written
    /// 5. Build the `ContactSubmission` with server-assigned fields
    /// 6. Append it to the store
    /// 7. Store failure → `StoreFailed` reply, I/O detail logged only
    /// 8. Otherwise → `Accepted` reply
    pub fn handle_at(&self, request: IntakeRequest, now: NaiveDateTime) -> IntakeReply {
        let request_id = RequestId::new();

        // ── Step 1: Method gate ──────────────────────────────────────────────
        if !Self::accepts_method(&request.method) {
            warn!(
                request_id = %request_id,
                method = %request.method,
                "intake rejected: invalid request method"
            );
            return IntakeReply::method_not_allowed();
        }

        // ── Steps 2 & 3: Sanitize, then validate the sanitized text ──────────
        let clean = sanitize_form(&request.form);
        let errors = validate_form(&clean);

        // ── Step 4: Field errors short-circuit before any write ──────────────
        if !errors.is_empty() {
            warn!(
                request_id = %request_id,
                fields = ?errors.fields(),
                "intake rejected: validation failed"
            );
            return IntakeReply::invalid(errors);
        }

        debug!(request_id = %request_id, "fields valid, building record");

        // ── Step 5: Server-assigned fields ───────────────────────────────────
        let submission = ContactSubmission {
            name: clean.name,
            email: clean.email,
            phone: clean.phone,
            subject: clean.subject,
            message: clean.message,
            submitted_at: now,
            source_ip: non_blank(request.remote_addr),
            user_agent: non_blank(request.user_agent),
        };

        // ── Steps 6 & 7: Append; failures never leak to the caller ───────────
        if let Err(e) = self.store.append(&submission) {
            error!(
                request_id = %request_id,
                error = %e,
                "intake failed: could not append message"
            );
            return IntakeReply::store_failed();
        }

        // ── Step 8 ───────────────────────────────────────────────────────────
        info!(
            request_id = %request_id,
            email = %submission.email,
            source_ip = submission.source_ip.as_deref().unwrap_or("unknown"),
            "contact message stored"
        );
        IntakeReply::accepted()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;

    use folio_contracts::{
        error::{FolioError, FolioResult},
        field::FieldName,
        response::{
            IntakeStatus, MSG_CORRECT_ERRORS, MSG_INVALID_METHOD, MSG_STORE_FAILED, MSG_THANK_YOU,
        },
        submission::{ContactForm, ContactSubmission},
    };

    use crate::traits::MessageStore;

    use super::{IntakeHandler, IntakeRequest};

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// A store that records every append for later inspection.
    #[derive(Default)]
    struct RecordingStore {
        appended: Mutex<Vec<ContactSubmission>>,
    }

    impl MessageStore for RecordingStore {
        fn append(&self, submission: &ContactSubmission) -> FolioResult<()> {
            self.appended.lock().unwrap().push(submission.clone());
            Ok(())
        }
    }

    /// A store whose every append fails with an I/O-style reason.
    struct FailingStore;

    impl MessageStore for FailingStore {
        fn append(&self, _submission: &ContactSubmission) -> FolioResult<()> {
            Err(FolioError::StoreWriteFailed {
                reason: "No space left on device (os error 28)".to_string(),
            })
        }
    }

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: String::new(),
            subject: "Hello there".to_string(),
            message: "This is a test message.".to_string(),
        }
    }

    fn fixed_now() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(9, 26, 53)
            .unwrap()
    }

    fn handler_with_recorder() -> (IntakeHandler, Arc<RecordingStore>) {
        let store = Arc::new(RecordingStore::default());
        (IntakeHandler::new(Box::new(store.clone())), store)
    }

    // ── Method gate ──────────────────────────────────────────────────────────

    #[test]
    fn non_post_methods_are_rejected_without_writing() {
        let (handler, store) = handler_with_recorder();

        for method in ["GET", "PUT", "DELETE", "post"] {
            let request = IntakeRequest {
                method: method.to_string(),
                form: valid_form(),
                ..IntakeRequest::default()
            };
            let reply = handler.handle_at(request, fixed_now());

            assert_eq!(reply.status, IntakeStatus::MethodNotAllowed, "method {method}");
            assert!(!reply.body.success);
            assert_eq!(reply.body.message, MSG_INVALID_METHOD);
            assert!(reply.body.errors.is_empty());
        }

        assert!(store.appended.lock().unwrap().is_empty());
    }

    // ── Happy path ───────────────────────────────────────────────────────────

    #[test]
    fn valid_submission_is_stored_once_with_server_fields() {
        let (handler, store) = handler_with_recorder();
        let request = IntakeRequest {
            remote_addr: Some("203.0.113.9".to_string()),
            user_agent: Some("curl/8.5.0".to_string()),
            ..IntakeRequest::post(valid_form())
        };

        let reply = handler.handle_at(request, fixed_now());

        assert_eq!(reply.status, IntakeStatus::Accepted);
        assert!(reply.body.success);
        assert_eq!(reply.body.message, MSG_THANK_YOU);
        assert!(reply.body.errors.is_empty());

        let appended = store.appended.lock().unwrap();
        assert_eq!(appended.len(), 1);
        assert_eq!(appended[0].name, "Jane Doe");
        assert_eq!(appended[0].phone, "");
        assert_eq!(appended[0].submitted_at, fixed_now());
        assert_eq!(appended[0].source_ip.as_deref(), Some("203.0.113.9"));
        assert_eq!(appended[0].user_agent.as_deref(), Some("curl/8.5.0"));
    }

    #[test]
    fn blank_caller_metadata_is_treated_as_absent() {
        let (handler, store) = handler_with_recorder();
        let request = IntakeRequest {
            user_agent: Some("   ".to_string()),
            ..IntakeRequest::post(valid_form())
        };

        handler.handle_at(request, fixed_now());

        let appended = store.appended.lock().unwrap();
        assert_eq!(appended[0].source_ip, None);
        assert_eq!(appended[0].user_agent, None);
    }

    #[test]
    fn stored_values_are_sanitized() {
        let (handler, store) = handler_with_recorder();
        let mut form = valid_form();
        form.subject = "  <script>alert(1)</script>  ".to_string();
        form.message = r#"He said \"hi\" & left."#.to_string();

        let reply = handler.handle_at(IntakeRequest::post(form), fixed_now());
        assert_eq!(reply.status, IntakeStatus::Accepted);

        let appended = store.appended.lock().unwrap();
        assert_eq!(appended[0].subject, "&lt;script&gt;alert(1)&lt;/script&gt;");
        assert_eq!(appended[0].message, "He said &quot;hi&quot; &amp; left.");
    }

    // ── Validation ───────────────────────────────────────────────────────────

    #[test]
    fn every_invalid_field_is_reported_and_nothing_written() {
        let (handler, store) = handler_with_recorder();
        let form = ContactForm {
            name: "J".to_string(),
            email: "bad".to_string(),
            phone: String::new(),
            subject: "hi".to_string(),
            message: "short".to_string(),
        };

        let reply = handler.handle_at(IntakeRequest::post(form), fixed_now());

        assert_eq!(reply.status, IntakeStatus::Invalid);
        assert!(!reply.body.success);
        assert_eq!(reply.body.message, MSG_CORRECT_ERRORS);
        assert_eq!(
            reply.body.errors.fields(),
            vec![
                FieldName::Name,
                FieldName::Email,
                FieldName::Subject,
                FieldName::Message
            ]
        );
        assert!(store.appended.lock().unwrap().is_empty());
    }

    #[test]
    fn absent_fields_are_required_errors() {
        let (handler, _store) = handler_with_recorder();

        let reply = handler.handle_at(IntakeRequest::post(ContactForm::default()), fixed_now());

        assert_eq!(reply.body.errors.len(), 4);
        assert_eq!(reply.body.errors.get(FieldName::Email), Some("Email is required."));
        assert!(!reply.body.errors.contains(FieldName::Phone));
    }

    #[test]
    fn validation_runs_on_escaped_text() {
        let (handler, _store) = handler_with_recorder();
        let mut form = valid_form();
        form.name = "O'Brien".to_string();

        let reply = handler.handle_at(IntakeRequest::post(form), fixed_now());

        assert_eq!(
            reply.body.errors.get(FieldName::Name),
            Some("Name can only contain letters and spaces.")
        );
    }

    // ── Persistence failure ──────────────────────────────────────────────────

    #[test]
    fn store_failure_yields_generic_message() {
        let handler = IntakeHandler::new(Box::new(FailingStore));

        let reply = handler.handle_at(IntakeRequest::post(valid_form()), fixed_now());

        assert_eq!(reply.status, IntakeStatus::StoreFailed);
        assert!(!reply.body.success);
        assert_eq!(reply.body.message, MSG_STORE_FAILED);
        assert!(!reply.body.message.contains("os error"));
        assert!(reply.body.errors.is_empty());
    }
}
