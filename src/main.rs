//! Poll Analyzer - command line driver
//!
//! Loads a polling CSV and prints the highest polling candidate, the
//! likely-voter averages and the polling history change.

use anyhow::{Context, Result};
use clap::Parser;
use poll_analyzer::cli::Cli;
use poll_analyzer::data::DataLoader;
use poll_analyzer::report::PollReport;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report.
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let loader = DataLoader::new(&cli.base_dir);
    info!(base_dir = %loader.base_dir().display(), file = %cli.file.display(), "startup");

    let table = loader
        .load_csv(&cli.file)
        .with_context(|| format!("loading {}", loader.resolve(&cli.file).display()))?;
    let report = PollReport::compute(&table).context("computing polling statistics")?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
    }
    Ok(())
}
