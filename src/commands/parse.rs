// src/commands/parse.rs
//! Parse command

use anyhow::Result;
use packdeps::{DependencySpec, load_config};
use std::path::Path;

pub fn cmd_parse(specs: &[String], config: Option<&Path>) -> Result<()> {
    let config = load_config(config).map_err(packdeps::Error::from)?;
    let syntax = &config.syntax;

    for raw in specs {
        let spec = DependencySpec::parse(raw, syntax);
        println!("{}", spec);
        if spec.is_blank() {
            println!("  (blank, ignored)");
            continue;
        }
        println!("  Locator: {}", spec.locator());
        println!("  Version: {}", spec.version().unwrap_or("(any)"));
        println!("  Pack: {}", spec.pack_name());
        if let Some(alias) = spec.unprefixed_name(syntax) {
            println!("  Alias: {}", alias);
        }
        let kind = if spec.is_source_locator() { "source locator" } else { "pack name" };
        println!("  Kind: {}", kind);
    }
    Ok(())
}
