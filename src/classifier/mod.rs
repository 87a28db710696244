// src/classifier/mod.rs

//! Pack dependency classification
//!
//! After an installation round, every pack that installed successfully may
//! declare further dependencies. One classification round sorts each
//! declared dependency into one of three buckets:
//! - satisfied: installed at the requested version (or no version requested)
//! - conflicting: installed, but at a different version than requested
//! - missing: not installed; the caller installs these in the next round
//!
//! The caller repeats rounds until nothing is missing or the nesting budget
//! runs out. A round is a single pass: there is no graph, no backtracking
//! and no cycle detection.

mod outcomes;
mod result;

pub use outcomes::PackOutcomes;
pub use result::{ClassificationResult, Conflict};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{ResolverConfig, SpecSyntax};
use crate::dependencies::{DependencySpec, bare_pack_name, strip_namespace_prefix};
use crate::metadata::{FsPackStore, PackMetadataStore, absent_on_failure};
use crate::version::with_marker;
use result::{Collector, Verdict};

/// Classifies declared dependencies of installed packs against a metadata store
#[derive(Debug, Clone)]
pub struct Classifier<S> {
    store: S,
    syntax: SpecSyntax,
}

impl<S: PackMetadataStore> Classifier<S> {
    /// Create a classifier using the default spec syntax
    pub fn new(store: S) -> Self {
        Self::with_syntax(store, SpecSyntax::default())
    }

    pub fn with_syntax(store: S, syntax: SpecSyntax) -> Self {
        Self { store, syntax }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn syntax(&self) -> &SpecSyntax {
        &self.syntax
    }

    /// Run one classification round
    ///
    /// A budget of zero or less, or an empty outcome set, returns an empty
    /// result without touching the store. The returned budget is always
    /// `nested - 1`.
    pub fn classify(&self, outcomes: &PackOutcomes, nested: i64) -> ClassificationResult {
        if let Some(result) = short_circuit(outcomes, nested) {
            return result;
        }

        let mut collector = Collector::default();
        for pack in outcomes.installed(&self.syntax.success_marker) {
            for (spec, verdict) in self.classify_pack(pack) {
                collector.record(&spec, verdict);
            }
        }

        self.finish(collector, nested)
    }

    /// Run one classification round, looking up packs on the rayon pool
    ///
    /// Produces exactly the result of [`Classifier::classify`]: per-pack
    /// verdicts are merged back in input order.
    pub fn classify_parallel(&self, outcomes: &PackOutcomes, nested: i64) -> ClassificationResult {
        if let Some(result) = short_circuit(outcomes, nested) {
            return result;
        }

        let installed: Vec<&str> = outcomes.installed(&self.syntax.success_marker).collect();
        let per_pack: Vec<Vec<(DependencySpec, Verdict)>> = installed
            .par_iter()
            .map(|pack| self.classify_pack(pack))
            .collect();

        let mut collector = Collector::default();
        for (spec, verdict) in per_pack.into_iter().flatten() {
            collector.record(&spec, verdict);
        }

        self.finish(collector, nested)
    }

    /// Classify every dependency declared by one installed pack
    fn classify_pack(&self, pack_id: &str) -> Vec<(DependencySpec, Verdict)> {
        let bare = bare_pack_name(pack_id, &self.syntax.vcs_suffix);
        let Some((name, declared)) = self.lookup_with_alias(bare, |name| {
            absent_on_failure(name, self.store.dependencies_of(name))
        }) else {
            return Vec::new();
        };
        if declared.is_empty() {
            debug!("Pack {} declares no dependencies", name);
            return Vec::new();
        }

        declared
            .iter()
            .filter_map(|raw| {
                let spec = DependencySpec::parse(raw, &self.syntax);
                if spec.is_blank() {
                    warn!("Pack {} declares a blank dependency, skipping", name);
                    return None;
                }
                let verdict = self.verdict(&spec);
                Some((spec, verdict))
            })
            .collect()
    }

    fn verdict(&self, spec: &DependencySpec) -> Verdict {
        let Some((found_as, installed)) = self.installed_version(spec) else {
            debug!("Dependency {} is not installed", spec);
            return Verdict::Missing;
        };

        let installed = with_marker(&installed, &self.syntax.version_marker);
        match spec.version() {
            Some(requested) if requested != installed => Verdict::Conflict(Conflict {
                spec: spec.raw().to_string(),
                pack: found_as,
                requested: requested.to_string(),
                installed,
            }),
            _ => {
                debug!("Dependency {} satisfied by {} {}", spec, found_as, installed);
                Verdict::Satisfied
            }
        }
    }

    /// Installed version of a dependency and the name it was found under
    ///
    /// A name carrying the namespace prefix (`stackstorm-aws`) that is not
    /// installed is retried under its alias (`aws`). The version is returned
    /// as stored, without the version marker.
    pub fn installed_version(&self, spec: &DependencySpec) -> Option<(String, String)> {
        self.lookup_with_alias(spec.pack_name(), |name| {
            absent_on_failure(name, self.store.version_of(name)).flatten()
        })
        .map(|(name, version)| (name.to_string(), version))
    }

    fn lookup_with_alias<'n, T>(
        &self,
        name: &'n str,
        lookup: impl Fn(&str) -> Option<T>,
    ) -> Option<(&'n str, T)> {
        if let Some(found) = lookup(name) {
            return Some((name, found));
        }
        let alias = strip_namespace_prefix(name, &self.syntax.namespace_prefix)?;
        debug!("Retrying {} as {}", name, alias);
        lookup(alias).map(|found| (alias, found))
    }

    fn finish(&self, collector: Collector, nested: i64) -> ClassificationResult {
        let result = collector.finish(nested);
        info!(
            "Classified dependencies: {} missing, {} conflicting, {} rounds left",
            result.dependency_list.len(),
            result.conflict_list.len(),
            result.nested
        );
        result
    }
}

impl Classifier<FsPackStore> {
    /// Create a classifier reading packs from the configured base paths
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::with_syntax(
            FsPackStore::from_config(&config.packs),
            config.syntax.clone(),
        )
    }
}

fn short_circuit(outcomes: &PackOutcomes, nested: i64) -> Option<ClassificationResult> {
    if nested <= 0 {
        debug!("Nesting budget {} exhausted, skipping classification", nested);
        return Some(ClassificationResult::exhausted(nested));
    }
    if outcomes.is_empty() {
        debug!("No pack outcomes to classify");
        return Some(ClassificationResult::exhausted(nested));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MemoryPackStore;

    fn installed(packs: &[&str]) -> PackOutcomes {
        packs.iter().map(|p| (*p, "Success.")).collect()
    }

    #[test]
    fn test_zero_budget_performs_no_lookups() {
        let store = MemoryPackStore::new().with_pack("a", Some("1.0.0"), &["foo"]);
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&installed(&["a"]), 0);
        assert_eq!(result, ClassificationResult::exhausted(0));
        assert_eq!(result.nested, -1);
        assert_eq!(store.lookups(), 0);
    }

    #[test]
    fn test_negative_budget_behaves_like_zero() {
        let store = MemoryPackStore::new().with_pack("a", Some("1.0.0"), &["foo"]);
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&installed(&["a"]), -3);
        assert!(result.is_settled());
        assert_eq!(result.nested, -4);
        assert_eq!(store.lookups(), 0);
    }

    #[test]
    fn test_empty_outcomes() {
        let store = MemoryPackStore::new();
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&PackOutcomes::new(), 5);
        assert!(result.is_settled());
        assert_eq!(result.nested, 4);
        assert_eq!(store.lookups(), 0);
    }

    #[test]
    fn test_missing_dependency() {
        let store = MemoryPackStore::new().with_pack("A", Some("0.1.0"), &["foo=v1.0.0"]);
        let classifier = Classifier::new(&store);

        let outcomes: PackOutcomes = [("A", "success")].into_iter().collect();
        let result = classifier.classify(&outcomes, 3);
        assert_eq!(result.dependency_list, vec!["foo=v1.0.0"]);
        assert!(result.conflict_list.is_empty());
        assert_eq!(result.nested, 2);
    }

    #[test]
    fn test_conflicting_dependency() {
        let store = MemoryPackStore::new()
            .with_pack("A", Some("0.1.0"), &["foo=v1.0.0"])
            .with_pack("foo", Some("2.0.0"), &[]);
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&installed(&["A"]), 3);
        assert!(result.dependency_list.is_empty());
        assert_eq!(result.conflict_list, vec!["foo=v1.0.0"]);
        assert_eq!(result.conflicts[0].installed, "v2.0.0");
        assert_eq!(result.conflicts[0].requested, "v1.0.0");
        assert_eq!(result.conflicts[0].pack, "foo");
    }

    #[test]
    fn test_matching_version_is_satisfied() {
        let store = MemoryPackStore::new()
            .with_pack("A", Some("0.1.0"), &["foo=v1.0.0", "bar"])
            .with_pack("foo", Some("1.0.0"), &[])
            .with_pack("bar", Some("9.9.9"), &[]);
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&installed(&["A"]), 1);
        assert!(result.is_settled());
        assert_eq!(result.nested, 0);
    }

    #[test]
    fn test_git_locator_resolves_to_bare_name() {
        let store = MemoryPackStore::new()
            .with_pack("A", None, &["https://example.com/org/foo.git=v1.0.0"])
            .with_pack("foo", Some("1.0.0"), &[]);
        let classifier = Classifier::new(&store);

        assert!(classifier.classify(&installed(&["A"]), 2).is_settled());
    }

    #[test]
    fn test_namespace_alias_fallback() {
        let store = MemoryPackStore::new()
            .with_pack("A", None, &["stackstorm-bar=v1.0.0", "stackstorm-baz=v1.0.0"])
            .with_pack("bar", Some("1.0.0"), &[])
            .with_pack("baz", Some("2.0.0"), &[]);
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&installed(&["A"]), 2);
        assert!(result.dependency_list.is_empty());
        assert_eq!(result.conflict_list, vec!["stackstorm-baz=v1.0.0"]);
        assert_eq!(result.conflicts[0].pack, "baz");
    }

    #[test]
    fn test_alias_fallback_is_one_directional() {
        // A dependency on "bar" never falls back to "stackstorm-bar"
        let store = MemoryPackStore::new()
            .with_pack("A", None, &["bar"])
            .with_pack("stackstorm-bar", Some("1.0.0"), &[]);
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&installed(&["A"]), 2);
        assert_eq!(result.dependency_list, vec!["bar"]);
    }

    #[test]
    fn test_failed_packs_contribute_nothing() {
        let store = MemoryPackStore::new().with_pack("A", None, &["foo"]);
        let classifier = Classifier::new(&store);

        let outcomes: PackOutcomes = [("A", "Failed: git clone error")].into_iter().collect();
        let result = classifier.classify(&outcomes, 2);
        assert!(result.is_settled());
        assert_eq!(store.lookups(), 0);
    }

    #[test]
    fn test_unreadable_metadata_is_skipped() {
        let store = MemoryPackStore::new()
            .with_unreadable_pack("broken")
            .with_pack("ok", None, &["foo"]);
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&installed(&["broken", "ok"]), 2);
        assert_eq!(result.dependency_list, vec!["foo"]);
    }

    #[test]
    fn test_unreadable_dependency_counts_as_missing() {
        let store = MemoryPackStore::new()
            .with_pack("A", None, &["locked=v1.0.0"])
            .with_unreadable_pack("locked");
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&installed(&["A"]), 2);
        assert_eq!(result.dependency_list, vec!["locked=v1.0.0"]);
    }

    #[test]
    fn test_installed_pack_without_version_is_missing() {
        let store = MemoryPackStore::new()
            .with_pack("A", None, &["foo=v1.0.0"])
            .with_pack("foo", None, &[]);
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&installed(&["A"]), 2);
        assert_eq!(result.dependency_list, vec!["foo=v1.0.0"]);
    }

    #[test]
    fn test_blank_dependencies_skipped() {
        let store = MemoryPackStore::new().with_pack("A", None, &["", "  ", "foo"]);
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&installed(&["A"]), 2);
        assert_eq!(result.dependency_list, vec!["foo"]);
    }

    #[test]
    fn test_order_and_dedup_across_packs() {
        let store = MemoryPackStore::new()
            .with_pack("A", None, &["z", "y=v1.0.0", "x"])
            .with_pack("B", None, &["x", "w", "z", "y=v1.0.0"])
            .with_pack("y", Some("0.9.0"), &[]);
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&installed(&["A", "B"]), 2);
        assert_eq!(result.dependency_list, vec!["z", "x", "w"]);
        assert_eq!(result.conflict_list, vec!["y=v1.0.0"]);
    }

    #[test]
    fn test_url_pack_id_resolves_metadata() {
        let store = MemoryPackStore::new().with_pack("foo", None, &["bar"]);
        let classifier = Classifier::new(&store);

        let outcomes: PackOutcomes = [("https://github.com/org/foo.git", "Success.")]
            .into_iter()
            .collect();
        let result = classifier.classify(&outcomes, 2);
        assert_eq!(result.dependency_list, vec!["bar"]);
    }

    #[test]
    fn test_prefixed_url_pack_id_falls_back_to_alias() {
        let store = MemoryPackStore::new().with_pack("aws", Some("1.0.0"), &["core"]);
        let classifier = Classifier::new(&store);

        let outcomes: PackOutcomes = [(
            "https://github.com/StackStorm-Exchange/stackstorm-aws.git",
            "Success.",
        )]
        .into_iter()
        .collect();
        let result = classifier.classify(&outcomes, 2);
        assert_eq!(result.dependency_list, vec!["core"]);
    }

    #[test]
    fn test_installed_version_reports_alias() {
        let store = MemoryPackStore::new().with_pack("bar", Some("1.0.0"), &[]);
        let classifier = Classifier::new(&store);
        let syntax = SpecSyntax::default();

        let spec = DependencySpec::parse("stackstorm-bar=v1.0.0", &syntax);
        let found = classifier.installed_version(&spec);
        assert_eq!(found, Some(("bar".to_string(), "1.0.0".to_string())));
        assert_eq!(
            classifier.installed_version(&DependencySpec::parse("ghost", &syntax)),
            None
        );
    }

    #[test]
    fn test_marker_prefixed_installed_version_not_doubled() {
        // pack.yaml written as "v1.0.0" compares as v1.0.0, not vv1.0.0
        let store = MemoryPackStore::new()
            .with_pack("A", None, &["foo=v1.0.0", "bar=v1.0.0"])
            .with_pack("foo", Some("v1.0.0"), &[])
            .with_pack("bar", Some("v2.0.0"), &[]);
        let classifier = Classifier::new(&store);

        let result = classifier.classify(&installed(&["A"]), 2);
        assert!(result.dependency_list.is_empty());
        assert_eq!(result.conflict_list, vec!["bar=v1.0.0"]);
        assert_eq!(result.conflicts[0].installed, "v2.0.0");
    }

    #[test]
    fn test_custom_syntax() {
        let syntax = SpecSyntax {
            version_separator: "@".to_string(),
            version_marker: String::new(),
            success_marker: "installed".to_string(),
            ..SpecSyntax::default()
        };
        let store = MemoryPackStore::new()
            .with_pack("A", None, &["foo@1.0.0", "bar@2.0.0"])
            .with_pack("foo", Some("1.0.0"), &[])
            .with_pack("bar", Some("3.0.0"), &[]);
        let classifier = Classifier::with_syntax(&store, syntax);

        let outcomes: PackOutcomes = [("A", "INSTALLED")].into_iter().collect();
        let result = classifier.classify(&outcomes, 1);
        assert!(result.dependency_list.is_empty());
        assert_eq!(result.conflict_list, vec!["bar@2.0.0"]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let store = MemoryPackStore::new()
            .with_pack("A", None, &["z", "y=v1.0.0", "x", "stackstorm-q=v1.0.0"])
            .with_pack("B", None, &["x", "w", "z", "y=v1.0.0"])
            .with_pack("C", None, &["v", "u=v3.0.0"])
            .with_pack("y", Some("0.9.0"), &[])
            .with_pack("q", Some("1.0.0"), &[])
            .with_pack("u", Some("3.0.0"), &[]);
        let classifier = Classifier::new(&store);

        let outcomes: PackOutcomes = [
            ("A", "success"),
            ("D", "failed"),
            ("B", "Success"),
            ("C", "SUCCESS"),
        ]
        .into_iter()
        .collect();

        let sequential = classifier.classify(&outcomes, 4);
        let parallel = classifier.classify_parallel(&outcomes, 4);
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.dependency_list, vec!["z", "x", "w", "v"]);
    }

    #[test]
    fn test_parallel_zero_budget_performs_no_lookups() {
        let store = MemoryPackStore::new().with_pack("a", None, &["foo"]);
        let classifier = Classifier::new(&store);

        let result = classifier.classify_parallel(&installed(&["a"]), 0);
        assert_eq!(result.nested, -1);
        assert_eq!(store.lookups(), 0);
    }
}
