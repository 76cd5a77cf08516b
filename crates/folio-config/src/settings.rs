//! Configuration schema.
//!
//! A `FolioConfig` is deserialized from TOML.  Every key has a default, so
//! an empty document is a complete configuration.
//!
//! Example:
//! ```toml
//! [server]
//! bind = "0.0.0.0:8080"
//! intake_path = "/process_contact"
//! body_limit_bytes = 65536
//!
//! [store]
//! path = "/var/lib/folio/contact_messages.txt"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_INTAKE_PATH: &str = "/process_contact";
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 64 * 1024;
pub const DEFAULT_STORE_PATH: &str = "contact_messages.txt";

/// Path reserved for the liveness probe.
pub const HEALTH_PATH: &str = "/healthz";

/// The top-level structure deserialized from a TOML config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FolioConfig {
    pub server: ServerConfig,
    pub store: StoreConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. `"127.0.0.1:8080"`.
    pub bind: String,

    /// Path the contact form posts to.  Must start with `/`.
    pub intake_path: String,

    /// Largest request body the intake endpoint will read.
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            intake_path: DEFAULT_INTAKE_PATH.to_string(),
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

/// Where accepted messages are appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// The append-only text log.  Created on first write.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
        }
    }
}
