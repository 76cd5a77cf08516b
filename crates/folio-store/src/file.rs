//! File-backed implementation of `MessageStore`.
//!
//! Each append opens the log in append mode, takes an exclusive advisory
//! lock (`flock` on Unix, `LockFileEx` on Windows) for the whole write, and
//! releases it before returning.  Concurrent appends from threads or other
//! processes therefore land as whole blocks in some serial order.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use folio_contracts::{
    error::{FolioError, FolioResult},
    submission::ContactSubmission,
};
use folio_core::traits::MessageStore;

use crate::record::LogRecord;

/// An append-only text log on disk.
///
/// The file is created on first append.  Its parent directory must exist.
#[derive(Debug, Clone)]
pub struct FileMessageStore {
    path: PathBuf,
}

impl FileMessageStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an already-rendered block under the exclusive lock.
    pub fn append_record(&self, record: &LogRecord) -> FolioResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_failed("open", e))?;

        file.lock_exclusive()
            .map_err(|e| self.write_failed("lock", e))?;

        let written = write_block(&mut file, record);
        let unlocked = FileExt::unlock(&file);

        written.map_err(|e| self.write_failed("write", e))?;
        unlocked.map_err(|e| self.write_failed("unlock", e))?;

        debug!(
            path = %self.path.display(),
            bytes = record.as_bytes().len(),
            "appended contact record"
        );
        Ok(())
    }

    fn write_failed(&self, stage: &str, e: std::io::Error) -> FolioError {
        FolioError::StoreWriteFailed {
            reason: format!("{} '{}': {}", stage, self.path.display(), e),
        }
    }
}

fn write_block(file: &mut File, record: &LogRecord) -> std::io::Result<()> {
    file.write_all(record.as_bytes())?;
    file.flush()
}

impl MessageStore for FileMessageStore {
    fn append(&self, submission: &ContactSubmission) -> FolioResult<()> {
        self.append_record(&LogRecord::from_submission(submission))
    }
}
