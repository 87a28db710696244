// src/commands/classify.rs
//! Classify command

use anyhow::{Context, Result};
use packdeps::{Classifier, PackOutcomes};
use std::fs::File;
use std::io::{self, BufReader};
use tracing::info;

use super::load_settings;
use crate::cli::PackSourceArgs;

/// Read installation outcomes from a file, or stdin for `-`
fn read_outcomes(status_file: &str) -> packdeps::Result<PackOutcomes> {
    if status_file == "-" {
        return PackOutcomes::read_from(io::stdin().lock());
    }
    let file = File::open(status_file)?;
    PackOutcomes::read_from(BufReader::new(file))
}

pub fn cmd_classify(
    status_file: &str,
    nested: i64,
    source: &PackSourceArgs,
    parallel: bool,
    explain: bool,
) -> Result<()> {
    let config = load_settings(source)?;
    let outcomes = read_outcomes(status_file)
        .with_context(|| format!("Failed to read pack status from '{}'", status_file))?;
    info!(
        "Classifying {} pack outcomes with nesting budget {}",
        outcomes.len(),
        nested
    );

    let classifier = Classifier::from_config(&config);
    let result = if parallel || config.classifier.parallel {
        classifier.classify_parallel(&outcomes, nested)
    } else {
        classifier.classify(&outcomes, nested)
    };

    if explain {
        for conflict in &result.conflicts {
            eprintln!(
                "{} ({})",
                conflict,
                conflict.change(&config.syntax.version_marker)
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
