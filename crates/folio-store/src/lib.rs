//! # folio-store
//!
//! Append-only storage for accepted contact messages.
//!
//! ## Overview
//!
//! Each accepted submission is rendered as a fixed, human-readable block
//! (`LogRecord`) and appended to a plain-text log.  Records are never
//! updated or deleted; append order is the only ordering.
//!
//! - [`FileMessageStore`]: the production store, one exclusive lock per append
//! - [`InMemoryMessageStore`]: the same contract without touching disk
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_core::IntakeHandler;
//! use folio_store::FileMessageStore;
//!
//! let handler = IntakeHandler::new(Box::new(FileMessageStore::new("contact_messages.txt")));
//! ```

pub mod file;
pub mod memory;
pub mod record;

pub use file::FileMessageStore;
pub use memory::InMemoryMessageStore;
pub use record::{LogRecord, RECORD_FOOTER, RECORD_HEADER};

// ── Tests ─────────────────────────────────────────────────────────────────────
