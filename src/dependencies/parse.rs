// src/dependencies/parse.rs

//! Parsing of dependency spec strings
//!
//! All string heuristics of the spec grammar live here so the classifier
//! only deals with already-split names and versions.

use std::fmt;

use crate::config::SpecSyntax;

/// One declared dependency of a pack
///
/// Format: `<name-or-locator>[<separator><version-tag>]`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencySpec {
    /// The declaration exactly as written in `pack.yaml`
    raw: String,
    /// Everything before the version separator
    locator: String,
    /// Requested version tag, if pinned
    version: Option<String>,
    /// Pack name derived from the locator
    pack_name: String,
}

impl DependencySpec {
    /// Parse a dependency spec
    ///
    /// Parsing never fails. The string is split once on the version
    /// separator; an empty version tag counts as unpinned. The pack name is
    /// the locator itself when it has no `/`, otherwise its last path
    /// segment, cut at the first delimiter when the segment carries the VCS
    /// suffix (`https://host/org/aws.git` -> `aws`).
    pub fn parse(raw: &str, syntax: &SpecSyntax) -> Self {
        let (locator, version) = match raw.split_once(syntax.version_separator.as_str()) {
            Some((locator, version)) if !syntax.version_separator.is_empty() => {
                (locator, Some(version).filter(|v| !v.is_empty()))
            }
            _ => (raw, None),
        };

        let pack_name = bare_pack_name(locator, &syntax.vcs_suffix).to_string();

        Self {
            raw: raw.to_string(),
            locator: locator.to_string(),
            version: version.map(str::to_string),
            pack_name,
        }
    }

    /// The declaration exactly as written
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Name or source locator part
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Requested version tag
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Bare pack name used for installed-pack lookups
    pub fn pack_name(&self) -> &str {
        &self.pack_name
    }

    /// True if the locator points at a source (path or URL) rather than a name
    pub fn is_source_locator(&self) -> bool {
        self.locator.contains('/')
    }

    /// True for declarations with nothing to resolve
    pub fn is_blank(&self) -> bool {
        self.raw.trim().is_empty()
    }

    /// Pack name with the namespace prefix removed
    ///
    /// Returns `None` unless the name contains the prefix (ASCII
    /// case-insensitive). The alias is whatever follows the last occurrence
    /// of the prefix: `stackstorm-aws` -> `aws`.
    pub fn unprefixed_name(&self, syntax: &SpecSyntax) -> Option<&str> {
        strip_namespace_prefix(&self.pack_name, &syntax.namespace_prefix)
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Reduce a name-or-locator to a bare pack name
pub(crate) fn bare_pack_name<'a>(locator: &'a str, vcs_suffix: &str) -> &'a str {
    let Some((_, segment)) = locator.rsplit_once('/') else {
        return locator;
    };

    match vcs_suffix.chars().next() {
        Some(delimiter) if segment.contains(vcs_suffix) => segment
            .split(delimiter)
            .next()
            .unwrap_or(segment),
        _ => segment,
    }
}

/// Strip a namespace prefix, ASCII case-insensitively
pub(crate) fn strip_namespace_prefix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }

    // ASCII lowercasing keeps byte offsets valid for slicing `name`
    let lowered = name.to_ascii_lowercase();
    let needle = prefix.to_ascii_lowercase();
    let pos = lowered.rfind(&needle)?;
    let alias = &name[pos + needle.len()..];

    if alias.is_empty() { None } else { Some(alias) }
}
