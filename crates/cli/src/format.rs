//! Output formatting for the three invocation results.

use serde_json::json;
use std::path::Path;
use xzlog::prelude::*;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Document text on stdout, notices on stderr
    Human,
    /// One JSON object per file on stdout
    Json,
}

/// Format a finished invocation.
///
/// `text` is the displayed content, captured only in JSON mode.
pub fn format_outcome(
    path: &Path,
    outcome: &Outcome,
    text: Option<String>,
    mode: OutputMode,
) -> String {
    match mode {
        OutputMode::Human => match outcome {
            // Displayed text was already streamed to stdout
            Outcome::Displayed { .. } => String::new(),
            Outcome::Offloaded { .. } => String::new(),
            Outcome::Cancelled { reason } => {
                let what = match reason {
                    CancelReason::OffloadDeclined => "not decompressed",
                    CancelReason::OverwriteDeclined => "existing file kept",
                };
                format!("{}: cancelled, {}", path.display(), what)
            }
        },
        OutputMode::Json => {
            let mut value = serde_json::to_value(outcome).unwrap_or_else(|_| json!({}));
            if let Some(object) = value.as_object_mut() {
                object.insert("file".to_string(), json!(path.display().to_string()));
                if let Some(text) = text {
                    object.insert("content".to_string(), json!(text));
                }
            }
            value.to_string()
        }
    }
}

/// Format a failed invocation as JSON.
///
/// In human mode failures reach the terminal as error notices instead.
pub fn format_error_json(path: &Path, err: &Error) -> String {
    json!({
        "file": path.display().to_string(),
        "outcome": "failed",
        "code": err.error_code(),
        "error": err.to_string(),
    })
    .to_string()
}
