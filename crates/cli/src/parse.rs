//! ArgMatches → CliOptions conversion.

use clap::ArgMatches;
use std::path::PathBuf;
use xzlog::prelude::*;

use crate::format::OutputMode;

/// Everything `main` needs from the command line.
#[derive(Debug)]
pub struct CliOptions {
    pub files: Vec<PathBuf>,
    pub threshold: Option<u64>,
    pub config: Option<PathBuf>,
    pub assume_yes: bool,
    pub output_mode: OutputMode,
}

impl CliOptions {
    /// Viewer builder with the file and flag settings applied.
    pub fn viewer_builder(&self) -> ViewerBuilder {
        let mut builder = Viewer::builder();
        if let Some(path) = &self.config {
            builder = builder.config_file(path);
        }
        if let Some(bytes) = self.threshold {
            builder = builder.threshold_bytes(bytes);
        }
        builder
    }
}

/// Convert clap ArgMatches into CliOptions.
pub fn matches_to_options(matches: &ArgMatches) -> CliOptions {
    let files = matches
        .get_many::<PathBuf>("files")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    CliOptions {
        files,
        threshold: matches.get_one::<u64>("threshold").copied(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        assume_yes: matches.get_flag("yes"),
        output_mode,
    }
}
