//! # folio-core
//!
//! The server-side intake pipeline for the folio contact form, plus the two
//! seam traits the rest of the workspace plugs into.
//!
//! This crate provides:
//! - `MessageStore` and `SubmitTransport` (see [`traits`])
//! - `IntakeHandler`, which sanitizes, validates, and stores one submission
//!   and always answers with a well-formed `IntakeReply`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_core::{IntakeHandler, IntakeRequest};
//!
//! let handler = IntakeHandler::new(Box::new(store));
//! let reply = handler.handle(IntakeRequest::post(form));
//! ```

pub mod intake;
pub mod traits;

pub use intake::{IntakeHandler, IntakeRequest, INTAKE_METHOD};
pub use traits::{MessageStore, SubmitTransport};
