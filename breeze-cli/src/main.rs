//! Binary crate for the `breeze` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive prompt session and configuration
//! - Human-friendly output formatting

use clap::Parser;

mod cli;
mod configure;
mod render;
mod session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
