// src/cli/mod.rs
//! CLI definitions for packdeps
//!
//! This module contains the command-line interface definitions using clap.
//! The command implementations live in the `commands` module.
//!
//! - `classify` - Sort the dependencies of freshly installed packs
//! - `inspect` - Show an installed pack's version and dependencies
//! - `parse` - Break dependency specs into their parts

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "packdeps")]
#[command(author = "packdeps Contributors")]
#[command(version)]
#[command(about = "Classify pack dependencies after an installation round", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that read installed packs
#[derive(Args, Debug, Clone, Default)]
pub struct PackSourceArgs {
    /// Path to the configuration file (default: /etc/packdeps/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pack base directory, overrides the configured list (repeatable)
    #[arg(short = 'p', long = "packs-path", value_name = "DIR")]
    pub packs_paths: Vec<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify the dependencies of packs from one installation round
    ///
    /// Reads a JSON object mapping each pack to its installation status and
    /// prints the dependencies still to install, the conflicting ones and the
    /// remaining nesting budget as JSON.
    Classify {
        /// JSON status file, or '-' for stdin
        #[arg(default_value = "-")]
        status_file: String,

        /// Remaining nesting budget for this round
        #[arg(short, long, allow_negative_numbers = true)]
        nested: i64,

        #[command(flatten)]
        source: PackSourceArgs,

        /// Look up packs in parallel
        #[arg(long)]
        parallel: bool,

        /// Describe each conflict on stderr
        #[arg(long)]
        explain: bool,
    },

    /// Show an installed pack's version and declared dependencies
    Inspect {
        /// Pack name
        pack: String,

        #[command(flatten)]
        source: PackSourceArgs,
    },

    /// Show how dependency specs are interpreted
    Parse {
        /// Dependency specs, e.g. aws=v1.2.0
        #[arg(required = true)]
        specs: Vec<String>,

        /// Path to the configuration file (default: /etc/packdeps/config.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
