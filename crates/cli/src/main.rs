//! xzlog CLI: decode compressed logs to the terminal.
//!
//! `xzlog [OPTIONS] <FILE>...` decodes each file in order. Small files are
//! printed to stdout; files above the threshold are decompressed next to the
//! source after a confirmation prompt. Without a terminal on stdin every
//! prompt is answered no unless `--yes` is given.
//!
//! Exits 1 if any file failed, 0 otherwise.

mod commands;
mod format;
mod parse;
mod terminal;

use std::io::IsTerminal;
use std::process;

use tracing_subscriber::EnvFilter;
use xzlog::prelude::*;

use commands::build_cli;
use format::{format_error_json, format_outcome, OutputMode};
use parse::{matches_to_options, CliOptions};
use terminal::{TerminalConsent, TerminalDisplay};

fn main() {
    let matches = build_cli().get_matches();
    let options = matches_to_options(&matches);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let viewer = match options.viewer_builder().build() {
        Ok(viewer) => viewer,
        Err(e) => {
            eprintln!("(error) {}", e);
            process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("(error) Failed to start runtime: {}", e);
            process::exit(1);
        }
    };

    let exit_code = runtime.block_on(run(&viewer, &options));
    process::exit(exit_code);
}

async fn run(viewer: &Viewer, options: &CliOptions) -> i32 {
    let mode = options.output_mode;
    let display = TerminalDisplay::new(mode);
    let consent = TerminalConsent::new(options.assume_yes, std::io::stdin().is_terminal());

    let mut exit_code = 0;
    for path in &options.files {
        match viewer.open(path, &display, &consent).await {
            Ok(outcome) => {
                let formatted = format_outcome(path, &outcome, display.take_captured(), mode);
                if formatted.is_empty() {
                    continue;
                }
                match mode {
                    OutputMode::Json => println!("{}", formatted),
                    OutputMode::Human => eprintln!("{}", formatted),
                }
            }
            Err(e) => {
                // Human mode already got the error notice
                if mode == OutputMode::Json {
                    println!("{}", format_error_json(path, &e));
                }
                exit_code = 1;
            }
        }
    }
    exit_code
}
