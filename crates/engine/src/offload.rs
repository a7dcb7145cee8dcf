//! Offload execution
//!
//! Runs after the user accepted an `OffloadRequired` decision:
//!
//! 1. If the target exists, ask for overwrite consent; refusal stops here
//!    with nothing written.
//! 2. Write the bytes to a temporary file in the target's directory.
//! 3. Move it into place. Without overwrite consent the move refuses to
//!    replace a file, so a target created after step 1 is never clobbered.
//!
//! A failed write leaves the target as it was. Nothing is retried.

use crate::report::overwrite_prompt;
use crate::surface::{Consent, ConsentPrompt, ConsentSurface, PromptKind};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};
use xzlog_archive::Assembled;
use xzlog_core::{Error, Result};

/// Result of an offload attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OffloadOutcome {
    /// Bytes written to `path`
    Written {
        /// Target path
        path: PathBuf,
        /// Number of bytes written
        bytes: u64,
    },
    /// The target exists and the user declined to replace it
    OverwriteDeclined,
}

/// Persist `assembled` at `target`, asking before replacing a file
pub async fn offload<C: ConsentSurface>(
    assembled: Assembled,
    target: PathBuf,
    consent: &C,
) -> Result<OffloadOutcome> {
    let exists = tokio::fs::try_exists(&target).await?;
    if exists {
        let prompt = ConsentPrompt {
            kind: PromptKind::Overwrite,
            message: overwrite_prompt(&target),
        };
        if consent.ask(&prompt).await != Consent::Proceed {
            info!("Overwrite of {} declined", target.display());
            return Ok(OffloadOutcome::OverwriteDeclined);
        }
    }

    let path = target.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        write_file(&path, assembled.offload_bytes(), exists)
    })
    .await
    .map_err(|e| Error::Io(std::io::Error::other(e)))?
    .map_err(|e| {
        warn!("Offload to {} failed: {}", target.display(), e);
        Error::Io(e)
    })?;

    info!("Wrote {} bytes to {}", bytes, target.display());
    Ok(OffloadOutcome::Written {
        path: target,
        bytes,
    })
}

fn write_file(target: &Path, bytes: &[u8], replace: bool) -> std::io::Result<u64> {
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    if replace {
        tmp.persist(target).map_err(|e| e.error)?;
    } else {
        tmp.persist_noclobber(target).map_err(|e| e.error)?;
    }
    Ok(bytes.len() as u64)
}
