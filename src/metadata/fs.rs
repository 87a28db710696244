// src/metadata/fs.rs

//! Pack metadata read from pack directories on disk

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{debug, trace};
use walkdir::WalkDir;

use super::{LookupError, LookupResult, PackMetadata, PackMetadataStore};
use crate::config::PacksConfig;

/// Metadata file inside every pack directory
pub const PACK_METADATA_FILE: &str = "pack.yaml";

/// Reads `<base>/<pack>/pack.yaml` from an ordered list of base directories
///
/// Packs whose directory is not named after their ref are found through an
/// index of every `pack.yaml`, built on the first such lookup and kept until
/// [`FsPackStore::rescan`].
#[derive(Debug, Clone)]
pub struct FsPackStore {
    base_paths: Vec<PathBuf>,
    ref_index: OnceLock<HashMap<String, PathBuf>>,
}

impl FsPackStore {
    /// Create a store searching the given base directories in order
    pub fn new<I, P>(base_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            base_paths: base_paths.into_iter().map(Into::into).collect(),
            ref_index: OnceLock::new(),
        }
    }

    /// Create a store from the `[packs]` configuration section
    pub fn from_config(config: &PacksConfig) -> Self {
        Self::new(config.base_paths.iter().cloned())
    }

    pub fn base_paths(&self) -> &[PathBuf] {
        &self.base_paths
    }

    /// Drop the ref index so packs installed since the last scan are seen
    pub fn rescan(&mut self) {
        self.ref_index = OnceLock::new();
    }

    /// Locate the directory of an installed pack
    ///
    /// The first base directory holding `<name>/pack.yaml` wins; a directory
    /// without metadata does not shadow later bases. When no directory is
    /// named after the pack, the pack whose ref (or name) matches is used.
    pub fn pack_dir(&self, name: &str) -> LookupResult<PathBuf> {
        validate_pack_name(name)?;

        for base in &self.base_paths {
            let candidate = base.join(name);
            if candidate.join(PACK_METADATA_FILE).is_file() {
                trace!("Pack {} found at {}", name, candidate.display());
                return Ok(candidate);
            }
        }

        match self.ref_index().get(name) {
            Some(dir) => {
                debug!("Pack {} resolved by ref to directory {}", name, dir.display());
                Ok(dir.clone())
            }
            None => Err(LookupError::NotFound(name.to_string())),
        }
    }

    fn ref_index(&self) -> &HashMap<String, PathBuf> {
        self.ref_index.get_or_init(|| self.scan_references())
    }

    /// Map each pack ref to its directory; earlier bases and names win
    fn scan_references(&self) -> HashMap<String, PathBuf> {
        let mut index = HashMap::new();
        for base in &self.base_paths {
            let entries = WalkDir::new(base)
                .min_depth(2)
                .max_depth(2)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file() && e.file_name() == PACK_METADATA_FILE);

            for entry in entries {
                let Ok(meta) = read_metadata(entry.path()) else {
                    continue;
                };
                let (Some(reference), Some(dir)) = (meta.reference(), entry.path().parent()) else {
                    continue;
                };
                index
                    .entry(reference.to_string())
                    .or_insert_with(|| dir.to_path_buf());
            }
        }
        debug!("Indexed {} pack refs", index.len());
        index
    }
}

impl PackMetadataStore for FsPackStore {
    fn metadata(&self, name: &str) -> LookupResult<PackMetadata> {
        let dir = self.pack_dir(name)?;
        match read_metadata(&dir.join(PACK_METADATA_FILE)) {
            Err(LookupError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                Err(LookupError::NotFound(name.to_string()))
            }
            other => other,
        }
    }
}

/// Read and parse a `pack.yaml` file
pub(crate) fn read_metadata(path: &Path) -> LookupResult<PackMetadata> {
    let content = std::fs::read_to_string(path).map_err(|source| LookupError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    PackMetadata::from_yaml(&content).map_err(|source| LookupError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reject names that would escape the pack base directories
fn validate_pack_name(name: &str) -> LookupResult<()> {
    if name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.contains("..")
    {
        return Err(LookupError::InvalidName(name.to_string()));
    }
    Ok(())
}
