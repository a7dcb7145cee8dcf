//! Shared fixtures for integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use xzlog::engine::ViewRegistry;
use xzlog::prelude::*;

// =============================================================================
// Encoders
// =============================================================================

pub fn xz(data: &[u8]) -> Vec<u8> {
    let mut encoder = xz2::write::XzEncoder::new(Vec::new(), 6);
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn zst(data: &[u8]) -> Vec<u8> {
    zstd::encode_all(data, 3).unwrap()
}

/// Uncompressed tar stream with entries in the given order
pub fn tar(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, content) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, name, *content).unwrap();
    }
    builder.into_inner().unwrap()
}

pub fn write(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

// =============================================================================
// Surfaces
// =============================================================================

/// Display surface that records everything it receives
#[derive(Default)]
pub struct Recorder {
    pub shown: Mutex<Vec<(ViewBinding, String)>>,
    pub notices: Mutex<Vec<Notice>>,
}

impl Recorder {
    pub fn texts(&self) -> Vec<String> {
        self.shown.lock().iter().map(|(_, t)| t.clone()).collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .filter_map(|n| match n {
                Notice::Error(m) => Some(m.clone()),
                Notice::Info(_) => None,
            })
            .collect()
    }

    pub fn infos(&self) -> Vec<String> {
        self.notices
            .lock()
            .iter()
            .filter_map(|n| match n {
                Notice::Info(m) => Some(m.clone()),
                Notice::Error(_) => None,
            })
            .collect()
    }
}

impl DisplaySurface for Recorder {
    fn show(&self, view: &ViewBinding, text: String) -> std::io::Result<()> {
        self.shown.lock().push((view.clone(), text));
        Ok(())
    }

    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

/// Consent surface that answers from a script and records each prompt
///
/// Runs out of answers → Cancel.
pub struct Scripted {
    answers: Mutex<VecDeque<Consent>>,
    pub prompts: Mutex<Vec<ConsentPrompt>>,
    watch: Option<(Arc<ViewRegistry>, PathBuf)>,
    pub seen_status: Mutex<Vec<BindingStatus>>,
}

impl Scripted {
    pub fn new(answers: &[Consent]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().copied().collect()),
            prompts: Mutex::new(Vec::new()),
            watch: None,
            seen_status: Mutex::new(Vec::new()),
        }
    }

    /// Record the binding status of `path` each time a prompt is shown
    pub fn watching(mut self, registry: &Arc<ViewRegistry>, path: &Path) -> Self {
        self.watch = Some((Arc::clone(registry), path.to_path_buf()));
        self
    }

    pub fn kinds(&self) -> Vec<PromptKind> {
        self.prompts.lock().iter().map(|p| p.kind).collect()
    }
}

impl ConsentSurface for Scripted {
    async fn ask(&self, prompt: &ConsentPrompt) -> Consent {
        self.prompts.lock().push(prompt.clone());
        if let Some((registry, path)) = &self.watch {
            self.seen_status.lock().push(registry.status(path));
        }
        tokio::task::yield_now().await;
        self.answers.lock().pop_front().unwrap_or(Consent::Cancel)
    }
}
