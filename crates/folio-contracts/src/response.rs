//! The JSON response schema shared by the intake endpoint and its clients.
//!
//! Every path through the intake handler produces an `IntakeResponse`, even
//! a wrong HTTP method.  `IntakeStatus` classifies the outcome so the HTTP
//! surface can choose a status code without inspecting message text.

use serde::{Deserialize, Serialize};

use crate::field::FieldErrors;

/// Returned for any method other than `POST`.
pub const MSG_INVALID_METHOD: &str = "Invalid request method.";

/// Returned alongside field errors when validation fails.
pub const MSG_CORRECT_ERRORS: &str = "Please correct the errors below.";

/// Returned when the message could not be appended to the store.
pub const MSG_STORE_FAILED: &str = "Failed to save message. Please try again.";

/// Returned when the message was stored.
pub const MSG_THANK_YOU: &str = "Thank you for your message! I will get back to you soon.";

/// The body of every intake response.
///
/// ```json
/// { "success": false, "message": "...", "errors": { "name": "..." } }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    /// Empty object when there are no field errors.
    #[serde(default)]
    pub errors: FieldErrors,
}

impl IntakeResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            errors: FieldErrors::new(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: FieldErrors::new(),
        }
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }
}

/// How an intake request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStatus {
    /// The message was appended to the store.
    Accepted,
    /// The request used a method other than `POST`.
    MethodNotAllowed,
    /// One or more fields failed validation.  Nothing was written.
    Invalid,
    /// The append failed.  The caller may retry.
    StoreFailed,
}

/// Outcome classification plus the body to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeReply {
    pub status: IntakeStatus,
    pub body: IntakeResponse,
}

impl IntakeReply {
    pub fn accepted() -> Self {
        Self {
            status: IntakeStatus::Accepted,
            body: IntakeResponse::success(MSG_THANK_YOU),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self {
            status: IntakeStatus::MethodNotAllowed,
            body: IntakeResponse::failure(MSG_INVALID_METHOD),
        }
    }

    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            status: IntakeStatus::Invalid,
            body: IntakeResponse::failure(MSG_CORRECT_ERRORS).with_errors(errors),
        }
    }

    pub fn store_failed() -> Self {
        Self {
            status: IntakeStatus::StoreFailed,
            body: IntakeResponse::failure(MSG_STORE_FAILED),
        }
    }
}
