//! Materialization engine for xzlog
//!
//! Drives one decode invocation from a source path to either an inline view
//! or a file written next to the source:
//!
//! ```text
//! Idle → Decompressing → [Extracting] → Assembled ─┬─► Inline → Displayed → Closed
//!                                                   └─► OffloadPending ─┬─► Offloaded → Closed
//!                                                                      └─► Refused → Closed
//! any state ──► Error → Closed
//! ```
//!
//! - [`config`]: threshold configuration, TOML loading
//! - [`policy`]: inline vs. offload decision
//! - [`binding`]: one live view per source path
//! - [`surface`]: host display and consent collaborators
//! - [`offload`]: overwrite-checked, no-clobber disk write
//! - [`pipeline`]: the async decode pipeline
//! - [`report`]: user-facing messages

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod binding;
pub mod config;
pub mod offload;
pub mod pipeline;
pub mod policy;
pub mod report;
pub mod surface;

pub use binding::{BindingGuard, BindingStatus, ViewBinding, ViewRegistry};
pub use config::{ViewerConfig, DEFAULT_THRESHOLD_BYTES};
pub use offload::{offload, OffloadOutcome};
pub use pipeline::{CancelReason, Outcome, Pipeline};
pub use policy::{MaterializationDecision, MaterializationPolicy};
pub use surface::{Consent, ConsentPrompt, ConsentSurface, DisplaySurface, Notice, PromptKind};
