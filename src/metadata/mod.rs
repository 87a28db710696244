// src/metadata/mod.rs

//! Installed pack metadata
//!
//! The classifier never touches the filesystem directly; it asks a
//! [`PackMetadataStore`] for a pack's version and declared dependencies.
//! [`FsPackStore`] reads `pack.yaml` from the pack base directories and
//! [`MemoryPackStore`] serves fixed metadata from memory.

mod fs;
mod memory;

pub use fs::{FsPackStore, PACK_METADATA_FILE};
pub use memory::MemoryPackStore;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from a metadata lookup
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Pack '{0}' is not installed")]
    NotFound(String),

    #[error("Invalid pack name {0:?}")]
    InvalidName(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Result type for metadata lookups
pub type LookupResult<T> = Result<T, LookupError>;

/// The parts of `pack.yaml` relevant to dependency resolution
///
/// Unknown keys are ignored; pack.yaml carries many more fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackMetadata {
    /// Pack reference, when it differs from the directory name
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub pack_ref: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Bare version (`1.2.0`); YAML numbers such as `1.5` are accepted
    #[serde(
        default,
        deserialize_with = "version_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Declared dependency specs, in declaration order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dependencies: Vec<String>,
}

impl PackMetadata {
    /// Create metadata with a version and dependencies
    pub fn new(version: Option<&str>, dependencies: &[&str]) -> Self {
        Self {
            version: version.map(str::to_string),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Parse `pack.yaml` content
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// The identifier other packs use to refer to this one
    pub fn reference(&self) -> Option<&str> {
        self.pack_ref.as_deref().or(self.name.as_deref())
    }
}

fn version_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_yaml::Value>::deserialize(deserializer)? {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(serde_yaml::Value::String(s)) => Ok(Some(s)),
        Some(serde_yaml::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "unsupported version value: {other:?}"
        ))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Lookup of installed pack metadata by pack name
pub trait PackMetadataStore: Send + Sync {
    /// Read a pack's metadata
    fn metadata(&self, name: &str) -> LookupResult<PackMetadata>;

    /// Installed version of a pack, `None` if the pack declares none
    fn version_of(&self, name: &str) -> LookupResult<Option<String>> {
        Ok(self
            .metadata(name)?
            .version
            .filter(|v| !v.trim().is_empty()))
    }

    /// Declared dependency specs of a pack
    fn dependencies_of(&self, name: &str) -> LookupResult<Vec<String>> {
        Ok(self.metadata(name)?.dependencies)
    }
}

impl<S: PackMetadataStore + ?Sized> PackMetadataStore for &S {
    fn metadata(&self, name: &str) -> LookupResult<PackMetadata> {
        (**self).metadata(name)
    }

    fn version_of(&self, name: &str) -> LookupResult<Option<String>> {
        (**self).version_of(name)
    }

    fn dependencies_of(&self, name: &str) -> LookupResult<Vec<String>> {
        (**self).dependencies_of(name)
    }
}

/// Collapse a lookup failure to "absent"
///
/// A missing pack is expected and logged at debug level. Unreadable or
/// malformed metadata is logged as a warning; the pack is still treated
/// as absent so one broken pack cannot abort classification of the rest.
pub(crate) fn absent_on_failure<T>(pack: &str, result: LookupResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e @ (LookupError::NotFound(_) | LookupError::InvalidName(_))) => {
            debug!("No metadata for pack {}: {}", pack, e);
            None
        }
        Err(e @ (LookupError::Io { .. } | LookupError::Parse { .. })) => {
            warn!("Ignoring unusable metadata for pack {}: {}", pack, e);
            None
        }
    }
}
