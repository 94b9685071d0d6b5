use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_POLL_FILE: &str = "polling_data.csv";

/// Directory relative input files resolve against, fixed at build time.
pub const DEFAULT_BASE_DIR: &str = env!("CARGO_MANIFEST_DIR");

#[derive(Parser, Debug)]
#[command(
    name = "poll-analyzer",
    version,
    about = "Summarize a two-candidate election polling CSV"
)]
pub struct Cli {
    #[arg(
        default_value = DEFAULT_POLL_FILE,
        help = "Polling CSV, relative to --base-dir unless absolute"
    )]
    pub file: PathBuf,
    #[arg(
        long,
        env = "POLL_ANALYZER_BASE_DIR",
        default_value = DEFAULT_BASE_DIR,
        help = "Directory that relative input paths are resolved against"
    )]
    pub base_dir: PathBuf,
    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        default_value = "warn",
        help = "Log filter used when RUST_LOG is unset"
    )]
    pub log_level: String,
}
