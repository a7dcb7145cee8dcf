//! Viewer configuration
//!
//! ```toml
//! # Decoded size above which content is offered for offload instead of display
//! threshold_bytes = 52428800
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use xzlog_core::{Error, Result};

/// Default offload threshold: 50 MiB
pub const DEFAULT_THRESHOLD_BYTES: u64 = 50 * 1024 * 1024;

/// Configuration for the decode pipeline
///
/// Missing fields take their default; unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Largest assembled size, in bytes, that is displayed inline
    pub threshold_bytes: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            threshold_bytes: DEFAULT_THRESHOLD_BYTES,
        }
    }
}

impl ViewerConfig {
    /// Create a config with the given threshold
    pub fn with_threshold(threshold_bytes: u64) -> Self {
        Self { threshold_bytes }
    }

    /// Parse a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Serialize to a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }
}
