//! Terminal implementations of the display and consent surfaces.

use parking_lot::Mutex;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};
use xzlog::prelude::*;

use crate::format::OutputMode;

/// Writes displayed documents to stdout and notices to stderr.
///
/// In JSON mode the document is held back so it can be embedded in the
/// file's JSON line, and notices are dropped.
pub struct TerminalDisplay {
    mode: OutputMode,
    captured: Mutex<Option<String>>,
}

impl TerminalDisplay {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            captured: Mutex::new(None),
        }
    }

    /// Take the text captured by the last `show` in JSON mode.
    pub fn take_captured(&self) -> Option<String> {
        self.captured.lock().take()
    }
}

impl DisplaySurface for TerminalDisplay {
    fn show(&self, _view: &ViewBinding, text: String) -> io::Result<()> {
        match self.mode {
            OutputMode::Human => {
                let mut out = io::stdout().lock();
                out.write_all(text.as_bytes())?;
                if !text.ends_with('\n') {
                    out.write_all(b"\n")?;
                }
                out.flush()
            }
            OutputMode::Json => {
                *self.captured.lock() = Some(text);
                Ok(())
            }
        }
    }

    fn notify(&self, notice: Notice) {
        if self.mode == OutputMode::Json {
            return;
        }
        match notice {
            Notice::Info(message) => eprintln!("{}", message),
            Notice::Error(message) => eprintln!("(error) {}", message),
        }
    }
}

/// Yes/no prompt on the controlling terminal.
pub struct TerminalConsent {
    assume_yes: bool,
    interactive: bool,
}

impl TerminalConsent {
    pub fn new(assume_yes: bool, interactive: bool) -> Self {
        Self {
            assume_yes,
            interactive,
        }
    }
}

impl ConsentSurface for TerminalConsent {
    async fn ask(&self, prompt: &ConsentPrompt) -> Consent {
        if self.assume_yes {
            return Consent::Proceed;
        }
        if !self.interactive {
            tracing::debug!("No terminal, answering Cancel to: {}", prompt.message);
            return Consent::Cancel;
        }

        let message = prompt.message.clone();
        tokio::task::spawn_blocking(move || read_answer(&message))
            .await
            .unwrap_or(Consent::Cancel)
    }
}

fn read_answer(message: &str) -> Consent {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            tracing::warn!("Cannot open prompt: {}", e);
            return Consent::Cancel;
        }
    };

    match editor.readline(&format!("{} [y/N] ", message)) {
        Ok(line) => parse_answer(&line),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Consent::Cancel,
        Err(e) => {
            tracing::warn!("Prompt failed: {}", e);
            Consent::Cancel
        }
    }
}

/// Only an explicit yes proceeds; empty input takes the default.
pub fn parse_answer(line: &str) -> Consent {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Consent::Proceed,
        _ => Consent::Cancel,
    }
}
