//! # folio-config
//!
//! TOML-driven configuration for the folio intake server.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use folio_config::FolioConfig;
//!
//! let config = FolioConfig::from_file(Path::new("folio.toml"))?;
//! let addr = config.bind_addr()?;
//! ```
//!
//! Every key is optional.  Unknown keys are rejected so a typo cannot
//! silently fall back to a default.

pub mod loader;
pub mod settings;

pub use settings::{FolioConfig, ServerConfig, StoreConfig, HEALTH_PATH};

// ── Tests ─────────────────────────────────────────────────────────────────────
