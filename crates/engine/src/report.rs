//! User-facing messages
//!
//! Formatting only: the error kind passed in is never changed, the message
//! just names the file and the operation.

use crate::policy::size_in_mb;
use std::path::Path;
use xzlog_core::{Error, SourceArtifact};

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Message for a failed decode of `path`
pub fn failure_message(path: &Path, err: &Error) -> String {
    match SourceArtifact::classify(path) {
        Ok(source) => format!(
            "Error processing {} file {}: {}",
            source.label(),
            path.display(),
            err
        ),
        Err(_) => format!("Error processing {}: {}", path.display(), err),
    }
}

/// Question asked before offloading `byte_len` bytes
pub fn offload_prompt(byte_len: u64) -> String {
    format!(
        "File is {}MB. Decompress to disk instead of opening?",
        size_in_mb(byte_len)
    )
}

/// Question asked before replacing `path`
pub fn overwrite_prompt(path: &Path) -> String {
    format!("{} already exists. Overwrite?", file_name(path))
}

/// Notice after a successful offload to `path`
pub fn offload_complete(path: &Path) -> String {
    format!("Decompressed to {}", file_name(path))
}
