// src/config.rs

//! Configuration for pack lookups and dependency-spec syntax
//!
//! Every section is optional; omitted values fall back to the conventions
//! used by StackStorm pack metadata.
//!
//! # Example config.toml
//!
//! ```toml
//! [packs]
//! base_paths = ["/opt/stackstorm/packs", "/usr/share/stackstorm/packs"]
//!
//! [syntax]
//! version_separator = "="
//! vcs_suffix = ".git"
//! namespace_prefix = "stackstorm-"
//! version_marker = "v"
//! success_marker = "success"
//!
//! [classifier]
//! parallel = false
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default path for the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "/etc/packdeps/config.toml";

/// Default directory holding installed packs
pub const DEFAULT_PACKS_BASE_PATH: &str = "/opt/stackstorm/packs";

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub packs: PacksConfig,
    pub syntax: SpecSyntax,
    pub classifier: ClassifierConfig,
}

/// Where installed packs live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacksConfig {
    /// Pack base directories, searched in order
    pub base_paths: Vec<PathBuf>,
}

impl Default for PacksConfig {
    fn default() -> Self {
        Self {
            base_paths: vec![PathBuf::from(DEFAULT_PACKS_BASE_PATH)],
        }
    }
}

/// Reserved tokens of the dependency-spec and status grammar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecSyntax {
    /// Separates the name-or-locator from the version tag
    pub version_separator: String,
    /// Marks a git source locator (`https://host/org/pack.git`)
    pub vcs_suffix: String,
    /// Namespace alias some packs are published under
    pub namespace_prefix: String,
    /// Prefix carried by version tags but not by `pack.yaml` versions
    pub version_marker: String,
    /// Substring of a status text meaning the pack was installed
    pub success_marker: String,
}

impl Default for SpecSyntax {
    fn default() -> Self {
        Self {
            version_separator: "=".to_string(),
            vcs_suffix: ".git".to_string(),
            namespace_prefix: "stackstorm-".to_string(),
            version_marker: "v".to_string(),
            success_marker: "success".to_string(),
        }
    }
}

/// Classifier behaviour switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Look up packs on a thread pool
    pub parallel: bool,
}

impl ResolverConfig {
    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.packs.base_paths.is_empty() {
            return Err(ConfigError::Invalid(
                "packs.base_paths must list at least one directory".to_string(),
            ));
        }
        if self.syntax.version_separator.is_empty() {
            return Err(ConfigError::Invalid(
                "syntax.version_separator must not be empty".to_string(),
            ));
        }
        if self.syntax.success_marker.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "syntax.success_marker must not be empty".to_string(),
            ));
        }
        if self.syntax.version_separator.contains('/') {
            return Err(ConfigError::Invalid(
                "syntax.version_separator must not contain '/'".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from the default or specified path
///
/// A missing file at the default location yields the defaults; a missing
/// explicitly requested file is an error.
pub fn load_config(path: Option<&Path>) -> ConfigResult<ResolverConfig> {
    match path {
        Some(path) => parse_config_file(path),
        None => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            if default.exists() {
                parse_config_file(default)
            } else {
                Ok(ResolverConfig::default())
            }
        }
    }
}

/// Parse a configuration file
pub fn parse_config_file(path: &Path) -> ConfigResult<ResolverConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config_string(&content)
}

/// Parse configuration from a TOML string
pub fn parse_config_string(content: &str) -> ConfigResult<ResolverConfig> {
    let config: ResolverConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
