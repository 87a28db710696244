// src/classifier/outcomes.rs

//! Per-pack installation outcomes

use serde_json::{Map, Value};
use std::io::Read;
use tracing::warn;

use crate::error::Result;

/// Status text reported for each pack of an installation round
///
/// Behaves like an insertion-ordered map: iteration follows first insertion
/// and re-inserting a pack replaces its status in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackOutcomes {
    entries: Vec<(String, String)>,
}

impl PackOutcomes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the status of a pack
    pub fn insert(&mut self, pack: impl Into<String>, status: impl Into<String>) {
        let pack = pack.into();
        let status = status.into();
        match self.entries.iter_mut().find(|(p, _)| *p == pack) {
            Some(entry) => entry.1 = status,
            None => self.entries.push((pack, status)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Packs and their status text, in input order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, s)| (p.as_str(), s.as_str()))
    }

    /// Packs whose status contains the success marker (case-insensitive)
    pub fn installed<'a>(&'a self, success_marker: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        let marker = success_marker.to_lowercase();
        self.entries
            .iter()
            .filter(move |(_, status)| status.to_lowercase().contains(&marker))
            .map(|(pack, _)| pack.as_str())
    }

    /// Parse a JSON object of pack -> status text
    ///
    /// Key order is preserved. Statuses that are not strings cannot carry
    /// the success marker and are recorded as empty.
    pub fn from_json_str(content: &str) -> serde_json::Result<Self> {
        let map: Map<String, Value> = serde_json::from_str(content)?;
        let mut outcomes = Self::new();
        for (pack, status) in map {
            match status {
                Value::String(s) => outcomes.insert(pack, s),
                other => {
                    warn!("Status of pack {} is not text ({}), treating as failed", pack, other);
                    outcomes.insert(pack, String::new());
                }
            }
        }
        Ok(outcomes)
    }

    /// Read a JSON status object from a file or stdin
    pub fn read_from(mut reader: impl Read) -> Result<Self> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Self::from_json_str(&content)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PackOutcomes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut outcomes = Self::new();
        for (pack, status) in iter {
            outcomes.insert(pack, status);
        }
        outcomes
    }
}
