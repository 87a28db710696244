// src/lib.rs

//! packdeps - pack dependency classification
//!
//! After a round of pack installations, decides which declared dependencies
//! of the freshly installed packs still need installing and which clash with
//! an already installed version.
//!
//! # Architecture
//!
//! - Injected metadata: all reads of installed packs go through a
//!   [`PackMetadataStore`] (`pack.yaml` on disk, or memory in tests)
//! - Single round: the caller drives further rounds with the returned
//!   nesting budget
//! - Best effort: unreadable metadata makes a pack absent, never an error

pub mod classifier;
pub mod config;
pub mod dependencies;
mod error;
pub mod metadata;
pub mod version;

pub use classifier::{ClassificationResult, Classifier, Conflict, PackOutcomes};
pub use config::{ResolverConfig, SpecSyntax, load_config};
pub use dependencies::DependencySpec;
pub use error::{Error, Result};
pub use metadata::{FsPackStore, LookupError, MemoryPackStore, PackMetadata, PackMetadataStore};
pub use version::{PackVersion, VersionChange};
