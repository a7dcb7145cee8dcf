//! Core types for xzlog
//!
//! This crate defines the vocabulary shared by every other crate:
//! - [`SourceArtifact`] and its [`SourceKind`] / [`Codec`] classification
//! - [`ArchiveEntry`]: one named entry of a tar container
//! - [`AssembledContent`]: the decoded result handed to the policy layer
//! - [`ViewId`]: identifier of a materialized view
//! - [`Error`]: the error kinds surfaced by the decode pipeline

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    source_path_for_view, ArchiveEntry, AssembledContent, Codec, SourceArtifact, SourceKind,
    ViewId, VIEW_SCHEME, VIEW_SUFFIX,
};
