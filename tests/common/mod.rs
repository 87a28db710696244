// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use packdeps::PackOutcomes;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create an empty pack base directory.
///
/// Returns (TempDir, base_path) - keep the TempDir alive to prevent cleanup.
pub fn setup_pack_base() -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().unwrap();
    let base = temp_dir.path().join("packs");
    fs::create_dir_all(&base).unwrap();
    (temp_dir, base)
}

/// Write a raw `pack.yaml` into `<base>/<dir_name>`.
pub fn write_pack_yaml(base: &Path, dir_name: &str, yaml: &str) -> PathBuf {
    let pack_dir = base.join(dir_name);
    fs::create_dir_all(&pack_dir).unwrap();
    fs::write(pack_dir.join("pack.yaml"), yaml).unwrap();
    pack_dir
}

/// Install a pack named `name` with an optional version and dependency list.
pub fn install_pack(base: &Path, name: &str, version: Option<&str>, dependencies: &[&str]) {
    let mut yaml = format!("ref: {}\nname: {}\n", name, name);
    if let Some(version) = version {
        yaml.push_str(&format!("version: \"{}\"\n", version));
    }
    if !dependencies.is_empty() {
        yaml.push_str("dependencies:\n");
        for dep in dependencies {
            yaml.push_str(&format!("  - \"{}\"\n", dep));
        }
    }
    write_pack_yaml(base, name, &yaml);
}

/// Outcomes where every listed pack installed successfully.
pub fn all_succeeded(packs: &[&str]) -> PackOutcomes {
    packs
        .iter()
        .map(|p| (*p, format!("Success. Moved to /opt/stackstorm/packs/{}", p)))
        .collect()
}
