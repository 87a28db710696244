// src/version/mod.rs

//! Version handling for pack version tags
//!
//! `pack.yaml` stores bare versions (`1.2.0`) while dependency specs pin
//! tagged versions (`v1.2.0`). Conflict detection compares the tagged
//! strings exactly; the ordering here is only used to describe a conflict.

use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// Prefix an installed version with the version marker
///
/// Versions that already carry the marker are returned unchanged.
pub fn with_marker(version: &str, marker: &str) -> String {
    if marker.is_empty() || version.starts_with(marker) {
        version.to_string()
    } else {
        format!("{marker}{version}")
    }
}

/// A pack version tag parsed for ordering
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackVersion {
    /// The tag as written
    pub tag: String,
    semver: Version,
}

impl PackVersion {
    /// Parse a version tag, with or without the marker
    ///
    /// Format: [marker]major[.minor[.patch]][-pre][+build]
    /// Examples:
    /// - "v1.2.3" -> 1.2.3
    /// - "1.2" -> 1.2.0
    /// - "v2.0.0-rc1" -> 2.0.0-rc1
    ///
    /// Returns `None` when no leading numeric component can be found.
    pub fn parse(tag: &str, marker: &str) -> Option<Self> {
        let bare = tag.trim();
        let bare = if marker.is_empty() {
            bare
        } else {
            bare.strip_prefix(marker).unwrap_or(bare)
        };

        let semver = match Version::parse(bare) {
            Ok(v) => v,
            Err(_) => Self::lenient_semver(bare)?,
        };

        Some(Self {
            tag: tag.to_string(),
            semver,
        })
    }

    /// Extract major.minor.patch from versions semver rejects (`1.2`, `3`)
    fn lenient_semver(bare: &str) -> Option<Version> {
        let core = bare.split(['-', '+']).next().unwrap_or(bare);
        let mut parts = core.split('.');

        let major = parts.next()?.parse::<u64>().ok()?;
        let minor = parts.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(0);
        let patch = parts.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(0);

        Some(Version::new(major, minor, patch))
    }
}

impl Ord for PackVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semver.cmp(&other.semver)
    }
}

impl PartialOrd for PackVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PackVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)
    }
}

/// What satisfying a requested version would mean for an installed pack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChange {
    /// Requested version is newer than the installed one
    Upgrade,
    /// Requested version is older than the installed one
    Downgrade,
    /// Tags differ but denote the same version (`v1.0` vs `v1.0.0`)
    Equivalent,
    /// At least one side is not a recognisable version
    Incomparable,
}

impl VersionChange {
    /// Compare an installed tag with a requested tag
    pub fn between(installed: &str, requested: &str, marker: &str) -> Self {
        match (
            PackVersion::parse(installed, marker),
            PackVersion::parse(requested, marker),
        ) {
            (Some(installed), Some(requested)) => match requested.cmp(&installed) {
                Ordering::Greater => Self::Upgrade,
                Ordering::Less => Self::Downgrade,
                Ordering::Equal => Self::Equivalent,
            },
            _ => Self::Incomparable,
        }
    }
}

impl fmt::Display for VersionChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upgrade => write!(f, "upgrade"),
            Self::Downgrade => write!(f, "downgrade"),
            Self::Equivalent => write!(f, "equivalent"),
            Self::Incomparable => write!(f, "incomparable"),
        }
    }
}
