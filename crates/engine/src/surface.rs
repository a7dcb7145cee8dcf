//! Host collaborators
//!
//! The pipeline does not render documents or prompts itself. It hands text
//! to a [`DisplaySurface`] and asks a [`ConsentSurface`] before touching the
//! disk. Any answer other than [`Consent::Proceed`] is a cancellation.

use crate::binding::ViewBinding;
use std::future::Future;

/// User's answer to a consent prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consent {
    /// Go ahead
    Proceed,
    /// Stop without side effects
    Cancel,
}

/// What a consent prompt is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Decompress a large file to disk instead of displaying it
    Offload,
    /// Replace a file that already exists at the offload path
    Overwrite,
}

/// A question put to the user, offered as Proceed / Cancel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsentPrompt {
    /// Prompt kind
    pub kind: PromptKind,
    /// Message shown to the user
    pub message: String,
}

/// Asynchronous yes/no prompt provided by the host
pub trait ConsentSurface: Send + Sync {
    /// Ask the user and wait for the answer
    fn ask(&self, prompt: &ConsentPrompt) -> impl Future<Output = Consent> + Send;
}

/// Message for the user outside of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Informational (e.g. offload completed)
    Info(String),
    /// A failed decode
    Error(String),
}

/// Read-only document display provided by the host
pub trait DisplaySurface: Send + Sync {
    /// Render `text` as the content of `view`
    fn show(&self, view: &ViewBinding, text: String) -> std::io::Result<()>;

    /// Surface a notice to the user
    fn notify(&self, notice: Notice);
}
