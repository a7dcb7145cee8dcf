//! View bindings
//!
//! A binding ties a source path to the view being materialized for it. The
//! registry holds at most one live (non-closed) binding per file. A decode
//! that finds a live binding for its file is rejected with
//! [`Error::AlreadyOpen`] rather than racing the first one.
//!
//! Bindings are keyed on the canonical path, so `logs/a.xz` and
//! `logs/sub/../a.xz` are the same file. The binding itself keeps the path
//! as the caller spelled it for messages and view URIs.
//!
//! ## Lifecycle
//!
//! ```text
//! register() ──► Pending ──mark_open()──► Open
//!                   │                       │
//!                   └──── guard dropped ────┴──► Closed (removed)
//! ```
//!
//! Closing is tied to [`BindingGuard`]'s `Drop`, so every exit path of a
//! pipeline closes its binding, including `?` returns and panics.
//!
//! # Thread Safety
//!
//! Registration is an atomic check-and-insert on the path's DashMap shard.
//! Different paths never contend beyond sharing a shard.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use xzlog_core::{Error, Result, SourceArtifact, ViewId};

/// Lifecycle state of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingStatus {
    /// Decode in progress, nothing displayed yet
    Pending,
    /// Content handed to a display surface
    Open,
    /// Finished, cancelled or failed
    Closed,
}

/// Association between a source and its view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewBinding {
    /// Compressed source path
    pub source_path: PathBuf,
    /// Unique view id
    pub view_id: ViewId,
    /// View URI (`xz-view:<source>.xz-view`)
    pub view_uri: String,
    /// Current status
    pub status: BindingStatus,
}

/// Registry of live bindings keyed by source path
#[derive(Debug, Default)]
pub struct ViewRegistry {
    bindings: DashMap<PathBuf, ViewBinding>,
}

impl ViewRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pending binding for `source`, keyed on its path as given
    ///
    /// # Errors
    ///
    /// [`Error::AlreadyOpen`] if a live binding exists for the same path. The
    /// existing binding is left untouched.
    pub fn register(self: &Arc<Self>, source: &SourceArtifact) -> Result<BindingGuard> {
        self.register_at(source.path().to_path_buf(), source)
    }

    /// Register a pending binding for `source` under `key`
    ///
    /// `key` should be the canonical form of `source.path()`.
    pub fn register_at(
        self: &Arc<Self>,
        key: PathBuf,
        source: &SourceArtifact,
    ) -> Result<BindingGuard> {
        let binding = match self.bindings.entry(key.clone()) {
            Entry::Occupied(_) => {
                return Err(Error::AlreadyOpen {
                    path: source.path().to_path_buf(),
                })
            }
            Entry::Vacant(slot) => {
                let binding = ViewBinding {
                    source_path: source.path().to_path_buf(),
                    view_id: ViewId::new(),
                    view_uri: source.view_uri(),
                    status: BindingStatus::Pending,
                };
                slot.insert(binding.clone());
                binding
            }
        };

        debug!("Binding {} pending for {}", binding.view_id, key.display());
        Ok(BindingGuard {
            registry: Arc::clone(self),
            key,
            binding,
            closed: false,
        })
    }

    /// Status of the binding for `path`; `Closed` when none is live
    ///
    /// `path` may be any spelling of the file.
    pub fn status(&self, path: &Path) -> BindingStatus {
        self.get(path)
            .map(|b| b.status)
            .unwrap_or(BindingStatus::Closed)
    }

    /// Snapshot of the live binding for `path`
    pub fn get(&self, path: &Path) -> Option<ViewBinding> {
        if let Some(binding) = self.bindings.get(path) {
            return Some(binding.clone());
        }
        let canonical = std::fs::canonicalize(path).ok()?;
        self.bindings.get(&canonical).map(|b| b.clone())
    }

    /// Number of live bindings
    pub fn live_count(&self) -> usize {
        self.bindings.len()
    }

    fn set_status(&self, path: &Path, view_id: ViewId, status: BindingStatus) {
        if let Some(mut binding) = self.bindings.get_mut(path) {
            if binding.view_id == view_id {
                binding.status = status;
            }
        }
    }

    fn release(&self, path: &Path, view_id: ViewId) {
        // Only the owner of the binding may remove it
        if self
            .bindings
            .remove_if(path, |_, b| b.view_id == view_id)
            .is_some()
        {
            debug!("Binding {} closed for {}", view_id, path.display());
        }
    }
}

/// Owner of a live binding; closes it when dropped
#[derive(Debug)]
pub struct BindingGuard {
    registry: Arc<ViewRegistry>,
    key: PathBuf,
    binding: ViewBinding,
    closed: bool,
}

impl BindingGuard {
    /// The binding as last seen by this guard
    pub fn binding(&self) -> &ViewBinding {
        &self.binding
    }

    /// View id of the binding
    pub fn view_id(&self) -> ViewId {
        self.binding.view_id
    }

    /// Pending → Open: content is being handed to a display surface
    pub fn mark_open(&mut self) {
        self.binding.status = BindingStatus::Open;
        self.registry
            .set_status(&self.key, self.binding.view_id, BindingStatus::Open);
        debug!(
            "Binding {} open for {}",
            self.binding.view_id,
            self.binding.source_path.display()
        );
    }

    /// Close the binding now
    pub fn close(mut self) {
        self.close_inner();
    }

    fn close_inner(&mut self) {
        if !self.closed {
            self.closed = true;
            self.binding.status = BindingStatus::Closed;
            self.registry.release(&self.key, self.binding.view_id);
        }
    }
}

impl Drop for BindingGuard {
    fn drop(&mut self) {
        self.close_inner();
    }
}
