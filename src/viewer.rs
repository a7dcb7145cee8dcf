//! Main entry point for xzlog.
//!
//! This module provides the `Viewer` struct, a shareable handle around the
//! decode pipeline and its binding registry.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use xzlog_archive::ContentAssembler;
use xzlog_core::Result;
use xzlog_engine::{
    ConsentSurface, DisplaySurface, Outcome, Pipeline, ViewRegistry, ViewerConfig,
};

/// Compressed log viewer.
///
/// Create one with [`Viewer::new`] or [`Viewer::builder`]. Clones share the
/// same binding registry, so at most one decode per source path is in flight
/// across all clones.
///
/// # Example
///
/// ```ignore
/// use xzlog::prelude::*;
///
/// let viewer = Viewer::builder()
///     .config_file("/etc/xzlog.toml")
///     .threshold_bytes(10 * 1024 * 1024)
///     .build()?;
///
/// match viewer.open("/var/log/app.log.xz", &display, &consent).await? {
///     Outcome::Displayed { .. } => {}
///     Outcome::Offloaded { path, .. } => println!("wrote {}", path.display()),
///     Outcome::Cancelled { .. } => {}
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Viewer {
    pipeline: Arc<Pipeline>,
}

impl Viewer {
    /// Create a viewer with the default 50 MiB threshold.
    pub fn new() -> Self {
        Self::with_config(ViewerConfig::default())
    }

    /// Create a viewer from an explicit configuration.
    pub fn with_config(config: ViewerConfig) -> Self {
        Self {
            pipeline: Arc::new(Pipeline::new(config)),
        }
    }

    /// Create a builder for viewer configuration.
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Active configuration.
    pub fn config(&self) -> &ViewerConfig {
        self.pipeline.config()
    }

    /// Binding registry shared by all clones.
    pub fn registry(&self) -> &Arc<ViewRegistry> {
        self.pipeline.registry()
    }

    /// Decode `path`, then display it or offload it to disk.
    ///
    /// See [`Pipeline::open`].
    pub async fn open<D, C>(
        &self,
        path: impl AsRef<Path>,
        display: &D,
        consent: &C,
    ) -> Result<Outcome>
    where
        D: DisplaySurface,
        C: ConsentSurface,
    {
        self.pipeline.open(path, display, consent).await
    }

    /// Decode `path` to text without a size check or binding.
    ///
    /// Blocking. Intended for small files and scripting.
    pub fn read_text(path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let compressed = std::fs::read(path)?;
        Ok(ContentAssembler::assemble(path, &compressed)?.into_text())
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Viewer`].
///
/// Explicit setters win over values read from a config file.
#[derive(Debug, Clone, Default)]
pub struct ViewerBuilder {
    config_file: Option<PathBuf>,
    threshold_bytes: Option<u64>,
}

impl ViewerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file.
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the offload threshold in bytes.
    pub fn threshold_bytes(mut self, bytes: u64) -> Self {
        self.threshold_bytes = Some(bytes);
        self
    }

    /// Resolve the configuration without building a viewer.
    pub fn resolve(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config_file {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };
        if let Some(bytes) = self.threshold_bytes {
            config.threshold_bytes = bytes;
        }
        Ok(config)
    }

    /// Build the viewer.
    pub fn build(self) -> Result<Viewer> {
        let config = self.resolve()?;
        debug!("Viewer threshold: {} bytes", config.threshold_bytes);
        Ok(Viewer::with_config(config))
    }
}
