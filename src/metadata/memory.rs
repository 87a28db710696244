// src/metadata/memory.rs

//! In-memory pack metadata

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{LookupError, LookupResult, PackMetadata, PackMetadataStore};

/// Fixed set of installed packs held in memory
///
/// Counts every lookup so callers can assert that no metadata was read.
#[derive(Debug, Default)]
pub struct MemoryPackStore {
    packs: HashMap<String, PackMetadata>,
    unreadable: HashSet<String>,
    lookups: AtomicUsize,
}

impl MemoryPackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an installed pack
    pub fn with_pack(mut self, name: &str, version: Option<&str>, dependencies: &[&str]) -> Self {
        self.insert(name, PackMetadata::new(version, dependencies));
        self
    }

    /// Add a pack whose metadata exists but cannot be read
    pub fn with_unreadable_pack(mut self, name: &str) -> Self {
        self.unreadable.insert(name.to_string());
        self
    }

    pub fn insert(&mut self, name: &str, metadata: PackMetadata) {
        self.packs.insert(name.to_string(), metadata);
    }

    /// Number of metadata lookups served so far
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl PackMetadataStore for MemoryPackStore {
    fn metadata(&self, name: &str) -> LookupResult<PackMetadata> {
        self.lookups.fetch_add(1, Ordering::Relaxed);

        if self.unreadable.contains(name) {
            return Err(LookupError::Io {
                path: PathBuf::from(name),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "unreadable"),
            });
        }

        self.packs
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }
}
