//! Seam traits for the folio contact intake.
//!
//! Two boundaries, one on each side of the network:
//!
//! - `MessageStore`: where the server appends accepted messages
//! - `SubmitTransport`: how the client controller reaches the server
//!
//! Both are synchronous.  Callers that must not block (the HTTP server, the
//! terminal UI) run them on a blocking pool or a worker thread.

use std::sync::Arc;

use folio_contracts::{
    error::FolioResult,
    response::IntakeResponse,
    submission::{ContactForm, ContactSubmission},
};

/// The durable, append-only home of accepted contact messages.
///
/// Implementations must treat `append` as a single atomic append: two
/// concurrent calls may land in either order but never interleave.  Records
/// written here are never modified or deleted.
pub trait MessageStore: Send + Sync {
    /// Append one submission.
    ///
    /// Returns `FolioError::StoreWriteFailed` on any I/O failure.  The
    /// intake handler logs the reason and shows the caller a generic message.
    fn append(&self, submission: &ContactSubmission) -> FolioResult<()>;
}

impl<T: MessageStore + ?Sized> MessageStore for Arc<T> {
    fn append(&self, submission: &ContactSubmission) -> FolioResult<()> {
        (**self).append(submission)
    }
}

impl<T: MessageStore + ?Sized> MessageStore for Box<T> {
    fn append(&self, submission: &ContactSubmission) -> FolioResult<()> {
        (**self).append(submission)
    }
}

/// One network exchange with the intake endpoint.
///
/// Returns the decoded response when the server answered with the response
/// schema, whatever its HTTP status.  Returns `FolioError::Transport` or
/// `FolioError::MalformedResponse` when there is no usable answer.
pub trait SubmitTransport {
    fn submit(&self, form: &ContactForm) -> FolioResult<IntakeResponse>;
}

impl<T: SubmitTransport + ?Sized> SubmitTransport for &T {
    fn submit(&self, form: &ContactForm) -> FolioResult<IntakeResponse> {
        (**self).submit(form)
    }
}
