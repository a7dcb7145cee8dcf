//! Inline vs. offload decision
//!
//! Content at or below the threshold is displayed inline. Anything larger
//! must be confirmed by the user and is then written next to the source
//! instead of being displayed.

use std::path::PathBuf;
use xzlog_core::SourceArtifact;

const MIB: f64 = 1024.0 * 1024.0;

/// Outcome of the size check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterializationDecision {
    /// Small enough to hand to the display surface
    Inline,
    /// Too large to display; the user must be asked before writing to disk
    OffloadRequired {
        /// Assembled size in bytes, the figure compared with the threshold
        ///
        /// For a container this is the joined text. What is written on
        /// offload is the decoded tar stream, which is larger.
        byte_len: u64,
        /// Sibling path with the compression suffix removed
        output_path: PathBuf,
    },
}

impl MaterializationDecision {
    /// Check if the content is displayed inline
    pub fn is_inline(&self) -> bool {
        matches!(self, MaterializationDecision::Inline)
    }
}

/// Size gate between display and offload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterializationPolicy {
    threshold_bytes: u64,
}

impl MaterializationPolicy {
    /// Create a policy with the given threshold
    pub fn new(threshold_bytes: u64) -> Self {
        Self { threshold_bytes }
    }

    /// Configured threshold in bytes
    pub fn threshold_bytes(&self) -> u64 {
        self.threshold_bytes
    }

    /// Decide how content of `byte_len` bytes from `source` is materialized
    ///
    /// `byte_len == threshold` is still inline.
    pub fn decide(&self, source: &SourceArtifact, byte_len: u64) -> MaterializationDecision {
        if byte_len <= self.threshold_bytes {
            MaterializationDecision::Inline
        } else {
            MaterializationDecision::OffloadRequired {
                byte_len,
                output_path: source.output_path(),
            }
        }
    }
}

/// Size in whole MiB, rounded to nearest
pub fn size_in_mb(byte_len: u64) -> u64 {
    (byte_len as f64 / MIB).round() as u64
}
