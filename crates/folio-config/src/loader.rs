//! Loading and checking a `FolioConfig`.
//!
//! Loading never applies a half-valid document: parse errors and semantic
//! errors both surface as `FolioError::ConfigError` before the server binds.

use std::net::SocketAddr;
use std::path::Path;

use tracing::debug;

use folio_contracts::error::{FolioError, FolioResult};

use crate::settings::{FolioConfig, HEALTH_PATH};

impl FolioConfig {
    /// Parse `s` as TOML and check the result.
    pub fn from_toml_str(s: &str) -> FolioResult<Self> {
        let config: FolioConfig = toml::from_str(s).map_err(|e| FolioError::ConfigError {
            reason: format!("failed to parse config TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as TOML configuration.
    pub fn from_file(path: &Path) -> FolioResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| FolioError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&contents)
    }

    /// Load from `path` when given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> FolioResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                debug!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check the semantic constraints TOML types cannot express.
    pub fn validate(&self) -> FolioResult<()> {
        self.bind_addr()?;

        let path = &self.server.intake_path;
        if !path.starts_with('/') {
            return Err(FolioError::ConfigError {
                reason: format!("server.intake_path '{}' must start with '/'", path),
            });
        }
        if path == HEALTH_PATH {
            return Err(FolioError::ConfigError {
                reason: format!("server.intake_path may not be '{}'", HEALTH_PATH),
            });
        }
        if self.server.body_limit_bytes == 0 {
            return Err(FolioError::ConfigError {
                reason: "server.body_limit_bytes must be greater than zero".to_string(),
            });
        }
        if self.store.path.as_os_str().is_empty() {
            return Err(FolioError::ConfigError {
                reason: "store.path must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The listener address.
    pub fn bind_addr(&self) -> FolioResult<SocketAddr> {
        self.server
            .bind
            .parse()
            .map_err(|e| FolioError::ConfigError {
                reason: format!("server.bind '{}' is not a socket address: {}", self.server.bind, e),
            })
    }

    /// Render the resolved configuration back to TOML.
    pub fn to_toml_string(&self) -> FolioResult<String> {
        toml::to_string_pretty(self).map_err(|e| FolioError::ConfigError {
            reason: format!("failed to render config TOML: {}", e),
        })
    }
}
