// src/commands/mod.rs
//! Command handlers for the packdeps CLI

mod classify;
mod inspect;
mod parse;

pub use classify::cmd_classify;
pub use inspect::cmd_inspect;
pub use parse::cmd_parse;

use packdeps::config::DEFAULT_CONFIG_PATH;
use packdeps::{ResolverConfig, load_config};
use std::path::Path;
use tracing::debug;

use crate::cli::PackSourceArgs;

/// Load the configuration, letting `--packs-path` replace the base paths
pub(crate) fn load_settings(source: &PackSourceArgs) -> packdeps::Result<ResolverConfig> {
    let mut config = load_config(source.config.as_deref())?;
    if !source.packs_paths.is_empty() {
        debug!("Pack base paths overridden: {:?}", source.packs_paths);
        config.packs.base_paths = source.packs_paths.clone();
    }
    debug!(
        "Using config {} with base paths {:?}",
        source
            .config
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_CONFIG_PATH))
            .display(),
        config.packs.base_paths
    );
    Ok(config)
}
