//! Command-line definition.

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Build the `xzlog` command.
pub fn build_cli() -> Command {
    Command::new("xzlog")
        .about("View xz/zstd compressed logs and tar bundles")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .help("Compressed files (.xz, .tar.xz, .zst, .tar.zst)")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .value_name("BYTES")
                .help("Largest decoded size shown inline (default 52428800)")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("TOML config file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Answer yes to every prompt")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print one JSON object per file")
                .action(ArgAction::SetTrue),
        )
}
