//! CLI entry point for reftool.

use anyhow::Result;
use clap::Parser;
use reftool::{RunConfig, TlsPolicy};
use tracing::debug;

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries only results and diagnostics.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let mut config = RunConfig::new(&args.email, &args.reference);
    config.fetch_bibtex = args.wants_bibtex();
    config.fetch_download = args.wants_download();
    config.tls = TlsPolicy {
        accept_invalid_certs: !args.verify_tls,
    };

    let report = reftool::run(&config).await;
    for line in &report.lines {
        println!("{line}");
    }

    // Every completed run exits 0; recovered failures are report lines,
    // not process errors.
    Ok(())
}
