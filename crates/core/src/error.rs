//! Error types for the decode pipeline
//!
//! Every component returns the most specific kind it can. Nothing above the
//! component that raised an error rewraps it into a different kind, so a
//! caller can always tell a corrupt compressed stream apart from a corrupt
//! container or a failed disk write.
//!
//! | Code | Raised by |
//! |------|-----------|
//! | Decompression | stream decoder: bad header, truncation, checksum mismatch |
//! | Extraction | tar reader: bad entry header, truncated body |
//! | Io | source read, offload write, display hand-off |
//! | UnsupportedSource | suffix classification |
//! | AlreadyOpen | binding registry: a decode of the same path is in flight |
//! | Config | configuration loading |
//!
//! User refusal of a consent prompt is not an error; see the pipeline's
//! `Outcome::Cancelled`.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// All errors surfaced by the decode pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// Input is not a well-formed compressed stream
    #[error("decompression failed: {reason}")]
    Decompression {
        /// Decoder message
        reason: String,
    },

    /// Decoded bytes do not parse as a tar container
    #[error("extraction failed: {reason}")]
    Extraction {
        /// Reader message
        reason: String,
    },

    /// I/O error reading the source or writing the offload target
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Path does not name a recognised compressed artifact
    #[error("unsupported source {}: {reason}", path.display())]
    UnsupportedSource {
        /// Offending path
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },

    /// A decode of the same source is already in flight
    #[error("{} is already being opened", path.display())]
    AlreadyOpen {
        /// Source path
        path: PathBuf,
    },

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for xzlog operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a decompression error
    pub fn decompression(reason: impl Into<String>) -> Self {
        Error::Decompression {
            reason: reason.into(),
        }
    }

    /// Create an extraction error
    pub fn extraction(reason: impl Into<String>) -> Self {
        Error::Extraction {
            reason: reason.into(),
        }
    }

    /// Create an unsupported-source error
    pub fn unsupported(path: &Path, reason: impl Into<String>) -> Self {
        Error::UnsupportedSource {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Check if this is a decompression error
    pub fn is_decompression(&self) -> bool {
        matches!(self, Error::Decompression { .. })
    }

    /// Check if this is an extraction error
    pub fn is_extraction(&self) -> bool {
        matches!(self, Error::Extraction { .. })
    }

    /// Check if this is an I/O error
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }

    /// Canonical error code, stable across releases
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Decompression { .. } => "Decompression",
            Error::Extraction { .. } => "Extraction",
            Error::Io(_) => "Io",
            Error::UnsupportedSource { .. } => "UnsupportedSource",
            Error::AlreadyOpen { .. } => "AlreadyOpen",
            Error::Config(_) => "Config",
        }
    }
}
