//! Convenient imports for xzlog.
//!
//! ```ignore
//! use xzlog::prelude::*;
//!
//! let viewer = Viewer::builder().threshold_bytes(1 << 20).build()?;
//! ```

// Main entry point
pub use crate::viewer::{Viewer, ViewerBuilder};

// Error handling
pub use xzlog_core::{Error, Result};

// Core types
pub use xzlog_core::{ArchiveEntry, AssembledContent, Codec, SourceArtifact, SourceKind, ViewId};

// Host collaborators
pub use xzlog_engine::{
    BindingStatus, CancelReason, Consent, ConsentPrompt, ConsentSurface, DisplaySurface, Notice,
    Outcome, PromptKind, ViewBinding, ViewerConfig,
};
