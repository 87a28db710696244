// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Diagnostics go to stderr; stdout carries the command output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify {
            status_file,
            nested,
            source,
            parallel,
            explain,
        } => commands::cmd_classify(&status_file, nested, &source, parallel, explain),
        Commands::Inspect { pack, source } => commands::cmd_inspect(&pack, &source),
        Commands::Parse { specs, config } => commands::cmd_parse(&specs, config.as_deref()),
    }
}
