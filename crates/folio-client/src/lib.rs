//! # folio-client
//!
//! The visitor-facing half of the contact form.
//!
//! ## Overview
//!
//! [`SubmissionController`] owns the form values, one error slot per field,
//! the submit control, and the success/error banners.  It validates inline
//! on blur, validates the whole form on submit, and sends at most one request
//! at a time through a [`SubmitTransport`](folio_core::SubmitTransport).
//!
//! [`HttpTransport`] is the production transport: a form-encoded `POST` to
//! the intake endpoint.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::time::Instant;
//! use folio_client::{HttpTransport, SubmissionController};
//! use folio_contracts::field::FieldName;
//!
//! let transport = HttpTransport::new("http://127.0.0.1:8080/process_contact");
//! let mut controller = SubmissionController::new();
//! controller.set_value(FieldName::Name, "Jane Doe");
//! // ... remaining fields ...
//! let outcome = controller.submit(&transport, Instant::now())?;
//! ```

pub mod banner;
pub mod controller;
pub mod transport;

pub use banner::{Banner, BannerKind, BANNER_TTL};
pub use controller::{
    ControllerState, SubmissionController, SubmitControl, SubmitDecision, SubmitOutcome,
    DEFAULT_SUBMIT_LABEL, LOADING_LABEL, MSG_DEFAULT_ERROR, MSG_SENT,
};
pub use transport::HttpTransport;

// ── Tests ─────────────────────────────────────────────────────────────────────
