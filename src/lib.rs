//! # xzlog
//!
//! Turns compressed log artifacts into readable text without letting a huge
//! payload flood the caller.
//!
//! A source is either a single compressed stream (`app.log.xz`,
//! `app.log.zst`) or a compressed tar container (`logs.tar.xz`,
//! `logs.tar.zst`). Its decoded content is displayed inline when it fits
//! under the configured threshold; otherwise the user is asked whether to
//! write it next to the source instead.
//!
//! ## Quick Start
//!
//! ```ignore
//! use xzlog::prelude::*;
//!
//! let viewer = Viewer::new();
//! let outcome = viewer.open("/var/log/app.log.xz", &display, &consent).await?;
//! ```
//!
//! ## Crates
//!
//! - [`xzlog_core`]: types and errors
//! - [`xzlog_archive`]: decompression, tar reading, assembly
//! - [`xzlog_engine`]: policy, bindings, offload, async pipeline

#![warn(missing_docs)]

mod viewer;

pub mod prelude;

// Re-export main entry points
pub use viewer::{Viewer, ViewerBuilder};
pub use xzlog_core::{source_path_for_view, Error, Result};

// Re-export component crates for advanced use
pub use xzlog_archive as archive;
pub use xzlog_engine as engine;
