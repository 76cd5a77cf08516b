//! The human-readable record block appended for each accepted message.
//!
//! Block layout (every line ends in `\n`, the block ends with a blank line):
//!
//! ```text
//! === NEW CONTACT MESSAGE ===
//! Timestamp: 2026-03-14 09:26:53
//! Name: Jane Doe
//! Email: jane@example.com
//! Phone: Not provided
//! Subject: Hello there
//! Message:
//! This is a test message.
//! IP Address: 203.0.113.9
//! User Agent: Unknown
//! =========================
//!
//! ```
//!
//! The `Message: ` label keeps its trailing space; the body starts on the
//! next line so multi-line messages stay readable.

use folio_contracts::submission::ContactSubmission;

/// First line of every block.
pub const RECORD_HEADER: &str = "=== NEW CONTACT MESSAGE ===";

/// Delimiter closing every block.
pub const RECORD_FOOTER: &str = "=========================";

/// `chrono` format of the `Timestamp:` line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NOT_PROVIDED: &str = "Not provided";
const UNKNOWN: &str = "Unknown";

/// One rendered record block, ready to append.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    text: String,
}

impl LogRecord {
    /// Render `submission` into the fixed block layout.
    pub fn from_submission(submission: &ContactSubmission) -> Self {
        let phone = if submission.phone.is_empty() {
            NOT_PROVIDED
        } else {
            submission.phone.as_str()
        };

        let text = format!(
            "{RECORD_HEADER}\n\
             Timestamp: {timestamp}\n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             Subject: {subject}\n\
             Message: \n\
             {message}\n\
             IP Address: {ip}\n\
             User Agent: {agent}\n\
             {RECORD_FOOTER}\n\
             \n",
            timestamp = submission.submitted_at.format(TIMESTAMP_FORMAT),
            name = submission.name,
            email = submission.email,
            subject = submission.subject,
            message = submission.message,
            ip = submission.source_ip.as_deref().unwrap_or(UNKNOWN),
            agent = submission.user_agent.as_deref().unwrap_or(UNKNOWN),
        );

        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}
