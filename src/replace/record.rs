//! Per-prefix counters and the record of generated numbers.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Next number to assign for each prefix. Starts at 1 and only grows.
#[derive(Debug, Clone, Default)]
pub struct Counters {
    next: HashMap<String, u64>,
}

impl Counters {
    /// Create an empty counter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next number for `prefix`.
    pub fn advance(&mut self, prefix: &str) -> u64 {
        let slot = self.next.entry(prefix.to_string()).or_insert(1);
        let current = *slot;
        *slot += 1;
        current
    }

    /// The number `prefix` would receive next, without consuming it.
    pub fn peek(&self, prefix: &str) -> u64 {
        self.next.get(prefix).copied().unwrap_or(1)
    }
}

/// Generated numbers per prefix, in the order they were assigned.
///
/// Prefixes are kept in order of first assignment. A prefix that never
/// received a number is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    entries: Vec<(String, Vec<String>)>,
}

impl Replacements {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a formatted number for `prefix`.
    pub fn push(&mut self, prefix: &str, number: String) {
        match self.entries.iter_mut().find(|(p, _)| p == prefix) {
            Some((_, numbers)) => numbers.push(number),
            None => self.entries.push((prefix.to_string(), vec![number])),
        }
    }

    /// Numbers generated for `prefix`, if any.
    pub fn get(&self, prefix: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(p, _)| p == prefix)
            .map(|(_, numbers)| numbers.as_slice())
    }

    /// Iterate prefixes and their numbers.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(prefix, numbers)| (prefix.as_str(), numbers.as_slice()))
    }

    /// Prefixes that received at least one number.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(prefix, _)| prefix.as_str())
    }

    /// Number of distinct prefixes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing was replaced.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of substitutions across all prefixes.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, numbers)| numbers.len()).sum()
    }
}

impl Serialize for Replacements {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (prefix, numbers) in &self.entries {
            map.serialize_entry(prefix, numbers)?;
        }
        map.end()
    }
}
