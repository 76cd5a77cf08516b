//! In-memory implementation of `MessageStore`.
//!
//! Keeps rendered records in a `Vec` behind a `Mutex`.  Used by tests and by
//! `folio-server serve --dry-run`, where nothing should touch the disk.

use std::sync::{Arc, Mutex};

use folio_contracts::{
    error::{FolioError, FolioResult},
    submission::ContactSubmission,
};
use folio_core::traits::MessageStore;

use crate::record::LogRecord;

/// An append-only store that never leaves the process.
///
/// Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMessageStore {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records appended so far, in append order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The concatenated log text, as the file store would hold it.
    pub fn export_text(&self) -> String {
        self.records()
            .into_iter()
            .map(LogRecord::into_string)
            .collect()
    }
}

impl MessageStore for InMemoryMessageStore {
    fn append(&self, submission: &ContactSubmission) -> FolioResult<()> {
        let mut records = self.records.lock().map_err(|e| FolioError::StoreWriteFailed {
            reason: format!("message store lock poisoned: {}", e),
        })?;
        records.push(LogRecord::from_submission(submission));
        Ok(())
    }
}
