//! The client-side submission controller.
//!
//! One controller owns one form.  It drives this state machine:
//!
//!   Idle → Validating → Submitting → (Success | Failed) → Idle
//!
//! `Validating`, `Success` and `Failed` are passed through within a single
//! call; between calls the controller is either `Idle` or `Submitting`.
//!
//! The controller performs no I/O of its own.  A caller that can block uses
//! [`SubmissionController::submit`]; a UI that must stay responsive calls
//! [`SubmissionController::begin_submit`], runs the network call elsewhere,
//! and hands the result to [`SubmissionController::complete_submit`].

use std::time::Instant;

use tracing::{debug, info, warn};

use folio_contracts::{
    error::{FolioError, FolioResult},
    field::{FieldErrors, FieldName},
    response::IntakeResponse,
    submission::ContactForm,
};
use folio_core::traits::SubmitTransport;
use folio_validate::{validate_field, validate_form};

use crate::banner::{Banner, BannerKind};

/// Submit label used when the caller does not supply one.
pub const DEFAULT_SUBMIT_LABEL: &str = "Send Message";

/// Label shown on the submit control while a request is in flight.
pub const LOADING_LABEL: &str = "Sending...";

/// Success banner text.
pub const MSG_SENT: &str = "Message sent successfully! Thank you for contacting me.";

/// Error banner text when the server gives no message or never answers.
pub const MSG_DEFAULT_ERROR: &str = "An error occurred. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

/// The submit button as the UI should render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    enabled: bool,
    label: String,
    original_label: String,
}

impl SubmitControl {
    fn new(label: String) -> Self {
        Self {
            enabled: true,
            label: label.clone(),
            original_label: label,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn set_loading(&mut self) {
        self.enabled = false;
        self.label = LOADING_LABEL.to_string();
    }

    fn restore(&mut self) {
        self.enabled = true;
        self.label = self.original_label.clone();
    }
}

/// What `begin_submit` decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Validation failed; the listed fields now show errors.  No network call.
    Blocked(FieldErrors),
    /// A request is already in flight; nothing changed.
    Busy,
    /// Send exactly this form, then call `complete_submit` with the result.
    Dispatch(ContactForm),
}

/// How a submission attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Blocked,
    Busy,
    Sent,
    Failed { message: String },
}

/// Owns the form values, error slots, submit control, and banners.
#[derive(Debug)]
pub struct SubmissionController {
    form: ContactForm,
    errors: FieldErrors,
    state: ControllerState,
    control: SubmitControl,
    success_banner: Option<Banner>,
    error_banner: Option<Banner>,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::with_submit_label(DEFAULT_SUBMIT_LABEL)
    }

    pub fn with_submit_label(label: impl Into<String>) -> Self {
        Self {
            form: ContactForm::default(),
            errors: FieldErrors::new(),
            state: ControllerState::Idle,
            control: SubmitControl::new(label.into()),
            success_banner: None,
            error_banner: None,
        }
    }

    // ── Field events ─────────────────────────────────────────────────────────

    /// Input changed: store the value and clear that field's displayed error.
    ///
    /// Does not re-validate; that happens on blur or submit.
    pub fn set_value(&mut self, field: FieldName, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.remove(field);
    }

    /// Field lost focus: validate it alone.  Returns whether it is valid.
    pub fn on_blur(&mut self, field: FieldName) -> bool {
        match validate_field(field, self.form.get(field)) {
            Ok(()) => {
                self.errors.remove(field);
                true
            }
            Err(message) => {
                debug!(field = %field, %message, "inline validation failed");
                self.errors.insert(field, message);
                false
            }
        }
    }

    // ── Submission ───────────────────────────────────────────────────────────

    /// Validate the whole form and, if valid, enter `Submitting`.
    pub fn begin_submit(&mut self) -> SubmitDecision {
        if self.state == ControllerState::Submitting {
            debug!("submit ignored: request already in flight");
            return SubmitDecision::Busy;
        }

        self.state = ControllerState::Validating;
        let errors = validate_form(&self.form);
        if !errors.is_empty() {
            debug!(fields = ?errors.fields(), "submit blocked by validation");
            // Slots reflect this pass only; fields that now pass are cleared.
            self.errors = errors.clone();
            self.state = ControllerState::Idle;
            return SubmitDecision::Blocked(errors);
        }

        self.errors.clear();
        self.control.set_loading();
        self.state = ControllerState::Submitting;
        SubmitDecision::Dispatch(self.form.clone())
    }

    /// Apply the result of the network call started by `begin_submit`.
    ///
    /// Returns `StateMachineError` if no submission is in flight.
    pub fn complete_submit(
        &mut self,
        result: FolioResult<IntakeResponse>,
        now: Instant,
    ) -> FolioResult<SubmitOutcome> {
        if self.state != ControllerState::Submitting {
            return Err(FolioError::StateMachineError {
                reason: format!("complete_submit called in state {:?}", self.state),
            });
        }

        let outcome = match result {
            Ok(response) if response.success => {
                self.state = ControllerState::Success;
                info!("contact message accepted");
                self.success_banner = Some(Banner::new(BannerKind::Success, MSG_SENT, now));
                self.form.clear();
                self.errors.clear();
                SubmitOutcome::Sent
            }
            Ok(response) => {
                self.state = ControllerState::Failed;
                let message = if response.message.trim().is_empty() {
                    MSG_DEFAULT_ERROR.to_string()
                } else {
                    response.message
                };
                warn!(%message, fields = ?response.errors.fields(), "contact message rejected");
                for (field, field_message) in response.errors.iter() {
                    self.errors.insert(field, field_message);
                }
                self.show_error(message.clone(), now);
                SubmitOutcome::Failed { message }
            }
            Err(e) => {
                self.state = ControllerState::Failed;
                warn!(error = %e, "contact submission did not complete");
                self.show_error(MSG_DEFAULT_ERROR.to_string(), now);
                SubmitOutcome::Failed {
                    message: MSG_DEFAULT_ERROR.to_string(),
                }
            }
        };

        self.control.restore();
        self.state = ControllerState::Idle;
        Ok(outcome)
    }

    /// Validate, send through `transport`, and apply the result in one call.
    pub fn submit<T: SubmitTransport + ?Sized>(
        &mut self,
        transport: &T,
        now: Instant,
    ) -> FolioResult<SubmitOutcome> {
        match self.begin_submit() {
            SubmitDecision::Blocked(_) => Ok(SubmitOutcome::Blocked),
            SubmitDecision::Busy => Ok(SubmitOutcome::Busy),
            SubmitDecision::Dispatch(form) => {
                let result = transport.submit(&form);
                self.complete_submit(result, now)
            }
        }
    }

    // ── Banners ──────────────────────────────────────────────────────────────

    /// Remove banners whose time is up.
    pub fn tick(&mut self, now: Instant) {
        if self.success_banner.as_ref().is_some_and(|b| b.is_expired(now)) {
            self.success_banner = None;
        }
        if self.error_banner.as_ref().is_some_and(|b| b.is_expired(now)) {
            self.error_banner = None;
        }
    }

    pub fn dismiss_success(&mut self) {
        self.success_banner = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error_banner = None;
    }

    fn show_error(&mut self, message: String, now: Instant) {
        self.error_banner = Some(Banner::new(BannerKind::Error, message, now));
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn value(&self, field: FieldName) -> &str {
        self.form.get(field)
    }

    /// The message in `field`'s error slot, if any.
    pub fn field_error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(field)
    }

    /// Whether `field` should be rendered as invalid.
    pub fn is_invalid(&self, field: FieldName) -> bool {
        self.errors.contains(field)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn submit_control(&self) -> &SubmitControl {
        &self.control
    }

    pub fn success_banner(&self) -> Option<&Banner> {
        self.success_banner.as_ref()
    }

    pub fn error_banner(&self) -> Option<&Banner> {
        self.error_banner.as_ref()
    }
}
