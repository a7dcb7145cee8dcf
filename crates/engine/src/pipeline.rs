//! Decode pipeline
//!
//! One call to [`Pipeline::open`] is one decode invocation. Its steps run in
//! sequence, suspending on the source read, the decode (moved to the
//! blocking pool), the consent prompts and the offload write. Invocations on
//! different files share nothing but the binding registry; an invocation on
//! a file that already has a live binding, under any spelling of its path,
//! fails with `AlreadyOpen`.
//!
//! Every exit path, including cancellation and errors, closes the
//! invocation's binding before `open` returns.

use crate::binding::{BindingGuard, ViewRegistry};
use crate::config::ViewerConfig;
use crate::offload::{offload, OffloadOutcome};
use crate::policy::{MaterializationDecision, MaterializationPolicy};
use crate::report::{failure_message, offload_complete, offload_prompt};
use crate::surface::{Consent, ConsentPrompt, ConsentSurface, DisplaySurface, Notice, PromptKind};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use xzlog_archive::{Assembled, ContentAssembler};
use xzlog_core::{Error, Result, SourceArtifact, ViewId};

/// Why an invocation stopped without displaying or writing anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    /// User declined to decompress a large file to disk
    OffloadDeclined,
    /// User declined to replace an existing file
    OverwriteDeclined,
}

/// Terminal state of a successful invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Content handed to the display surface
    Displayed {
        /// View that received the content
        view_id: ViewId,
        /// Assembled size in bytes
        bytes: u64,
    },
    /// Content written next to the source
    Offloaded {
        /// Written file
        path: PathBuf,
        /// Bytes written
        bytes: u64,
    },
    /// User cancelled at a consent prompt
    Cancelled {
        /// Which prompt was declined
        reason: CancelReason,
    },
}

/// Decode-and-materialize pipeline
///
/// Cheap to share: wrap it in an `Arc` to run invocations from several
/// tasks against one registry.
#[derive(Debug)]
pub struct Pipeline {
    config: ViewerConfig,
    registry: Arc<ViewRegistry>,
}

impl Pipeline {
    /// Create a pipeline with its own binding registry
    pub fn new(config: ViewerConfig) -> Self {
        Self::with_registry(config, Arc::new(ViewRegistry::new()))
    }

    /// Create a pipeline that shares `registry`
    pub fn with_registry(config: ViewerConfig, registry: Arc<ViewRegistry>) -> Self {
        Self { config, registry }
    }

    /// Active configuration
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Binding registry
    pub fn registry(&self) -> &Arc<ViewRegistry> {
        &self.registry
    }

    /// Decode `path` and display it or offload it
    ///
    /// Failures are reported to `display` as [`Notice::Error`] and returned
    /// unchanged. Cancellation is not a failure and produces no notice.
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
        let path = path.as_ref();
        info!("Opening: {}", path.display());

        let result = self.run(path, display, consent).await;
        match &result {
            Ok(outcome) => debug!("Finished {}: {:?}", path.display(), outcome),
            Err(e) => {
                let message = failure_message(path, e);
                warn!("{}", message);
                display.notify(Notice::Error(message));
            }
        }
        result
    }

    async fn run<D, C>(&self, path: &Path, display: &D, consent: &C) -> Result<Outcome>
    where
        D: DisplaySurface,
        C: ConsentSurface,
    {
        let source = SourceArtifact::classify(path)?;
        // Resolved inline so the lookup and the registration happen in the
        // same poll; a missing source fails here as Io.
        let key = std::fs::canonicalize(path)?;
        let mut binding = self.registry.register_at(key, &source)?;

        let assembled = decode(&source).await?;
        let policy = MaterializationPolicy::new(self.config.threshold_bytes);

        match policy.decide(&source, assembled.len() as u64) {
            MaterializationDecision::Inline => {
                let bytes = assembled.len() as u64;
                binding.mark_open();
                display.show(binding.binding(), assembled.into_text())?;
                let view_id = binding.view_id();
                binding.close();
                Ok(Outcome::Displayed { view_id, bytes })
            }
            MaterializationDecision::OffloadRequired {
                byte_len,
                output_path,
            } => {
                info!(
                    "{} decodes to {} bytes, above threshold {}",
                    source,
                    byte_len,
                    policy.threshold_bytes()
                );
                self.offload_with_consent(binding, assembled, output_path, display, consent)
                    .await
            }
        }
    }

    async fn offload_with_consent<D, C>(
        &self,
        binding: BindingGuard,
        assembled: Assembled,
        output_path: PathBuf,
        display: &D,
        consent: &C,
    ) -> Result<Outcome>
    where
        D: DisplaySurface,
        C: ConsentSurface,
    {
        // The user is asked about the bytes that will land on disk, which for
        // a container is the tar stream rather than the joined text
        let prompt = ConsentPrompt {
            kind: PromptKind::Offload,
            message: offload_prompt(assembled.offload_bytes().len() as u64),
        };
        if consent.ask(&prompt).await != Consent::Proceed {
            info!("Offload of {} declined", output_path.display());
            return Ok(Outcome::Cancelled {
                reason: CancelReason::OffloadDeclined,
            });
        }

        let outcome = offload(assembled, output_path, consent).await?;
        drop(binding);

        match outcome {
            OffloadOutcome::Written { path, bytes } => {
                display.notify(Notice::Info(offload_complete(&path)));
                Ok(Outcome::Offloaded { path, bytes })
            }
            OffloadOutcome::OverwriteDeclined => Ok(Outcome::Cancelled {
                reason: CancelReason::OverwriteDeclined,
            }),
        }
    }
}

/// Read and assemble `source` off the async executor
async fn decode(source: &SourceArtifact) -> Result<Assembled> {
    let compressed = tokio::fs::read(source.path()).await?;
    debug!("Read {} compressed bytes from {}", compressed.len(), source);

    let job = source.clone();
    tokio::task::spawn_blocking(move || ContentAssembler::assemble_source(&job, &compressed))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?
}
