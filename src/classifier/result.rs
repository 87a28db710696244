// src/classifier/result.rs

//! Classification result types

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::dependencies::DependencySpec;
use crate::version::VersionChange;

/// Outcome of one classification round
///
/// Serializes to `{"dependency_list": [...], "conflict_list": [...], "nested": n}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    /// Declared dependencies with no installed pack, in first-seen order
    pub dependency_list: Vec<String>,
    /// Declared dependencies installed at a different version, in first-seen order
    pub conflict_list: Vec<String>,
    /// Remaining nesting budget (input budget - 1)
    pub nested: i64,
    /// Installed and requested versions behind each `conflict_list` entry
    #[serde(skip)]
    pub conflicts: Vec<Conflict>,
}

impl ClassificationResult {
    /// Result of a round that examined nothing
    pub fn exhausted(nested: i64) -> Self {
        Self {
            nested: nested.saturating_sub(1),
            ..Self::default()
        }
    }

    /// True if nothing is left to install or reconcile
    pub fn is_settled(&self) -> bool {
        self.dependency_list.is_empty() && self.conflict_list.is_empty()
    }
}

/// A dependency installed at a version other than the requested one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// The dependency spec as declared
    pub spec: String,
    /// Name under which the installed pack was found
    pub pack: String,
    pub requested: String,
    /// Installed version, with the version marker
    pub installed: String,
}

impl Conflict {
    /// Whether honouring the request would move the pack up or down
    pub fn change(&self, marker: &str) -> VersionChange {
        VersionChange::between(&self.installed, &self.requested, marker)
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pack {} is installed at {} but {} requests {}",
            self.pack, self.installed, self.spec, self.requested
        )
    }
}

/// How a single declared dependency was classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Verdict {
    Satisfied,
    Missing,
    Conflict(Conflict),
}

/// Accumulates verdicts, keeping the first occurrence of each spec
#[derive(Debug, Default)]
pub(crate) struct Collector {
    dependencies: Vec<String>,
    conflicts: Vec<Conflict>,
    seen_dependencies: HashSet<String>,
    seen_conflicts: HashSet<String>,
}

impl Collector {
    pub(crate) fn record(&mut self, spec: &DependencySpec, verdict: Verdict) {
        match verdict {
            Verdict::Satisfied => {}
            Verdict::Missing => {
                if self.seen_conflicts.contains(spec.raw()) {
                    return;
                }
                if self.seen_dependencies.insert(spec.raw().to_string()) {
                    self.dependencies.push(spec.raw().to_string());
                }
            }
            Verdict::Conflict(conflict) => {
                if !self.seen_conflicts.insert(conflict.spec.clone()) {
                    return;
                }
                // A conflict supersedes an earlier "missing" verdict
                if self.seen_dependencies.remove(&conflict.spec) {
                    self.dependencies.retain(|d| *d != conflict.spec);
                }
                self.conflicts.push(conflict);
            }
        }
    }

    pub(crate) fn finish(self, nested: i64) -> ClassificationResult {
        ClassificationResult {
            dependency_list: self.dependencies,
            conflict_list: self.conflicts.iter().map(|c| c.spec.clone()).collect(),
            nested: nested.saturating_sub(1),
            conflicts: self.conflicts,
        }
    }
}
