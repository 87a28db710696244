// src/commands/inspect.rs
//! Inspect command

use anyhow::{Context, Result};
use packdeps::version::with_marker;
use packdeps::{Classifier, DependencySpec, PackMetadataStore};

use super::load_settings;
use crate::cli::PackSourceArgs;

pub fn cmd_inspect(pack: &str, source: &PackSourceArgs) -> Result<()> {
    let config = load_settings(source)?;
    let classifier = Classifier::from_config(&config);
    let store = classifier.store();
    let marker = &config.syntax.version_marker;

    let dir = store
        .pack_dir(pack)
        .map_err(packdeps::Error::from)
        .with_context(|| format!("Cannot inspect pack '{}'", pack))?;
    let metadata = store
        .metadata(pack)
        .map_err(packdeps::Error::from)
        .with_context(|| format!("Cannot inspect pack '{}'", pack))?;

    println!("Pack: {}", metadata.reference().unwrap_or(pack));
    println!("  Path: {}", dir.display());
    match metadata.version.as_deref().filter(|v| !v.is_empty()) {
        Some(version) => println!("  Version: {}", with_marker(version, marker)),
        None => println!("  Version: (none)"),
    }
    if let Some(description) = &metadata.description {
        println!("  Description: {}", description);
    }

    if metadata.dependencies.is_empty() {
        println!("  No dependencies");
        return Ok(());
    }

    println!("  Dependencies:");
    for raw in &metadata.dependencies {
        let spec = DependencySpec::parse(raw, &config.syntax);
        if spec.is_blank() {
            continue;
        }
        let state = match classifier.installed_version(&spec) {
            Some((found_as, version)) if found_as != spec.pack_name() => {
                format!("installed {} as {}", with_marker(&version, marker), found_as)
            }
            Some((_, version)) => format!("installed {}", with_marker(&version, marker)),
            None => "not installed".to_string(),
        };
        println!("    {} [{}]", spec, state);
    }
    Ok(())
}
