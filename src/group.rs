//! Case-insensitive deduplication and first-letter bucketing.

use crate::loader::RawEntries;
use crate::normalize::{bucket_key, canonicalize, RULE_MARKER};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// Surviving entries bucketed by the first letter of their canonical key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    buckets: BTreeMap<String, Vec<String>>,

    /// Number of distinct canonical keys seen, the empty key included
    pub unique_keys: usize,

    /// Entries discarded because another entry had the same canonical key
    pub duplicates: usize,

    /// Entries dropped because their canonical key was empty
    pub dropped: usize,
}

impl Grouping {
    /// Returns the buckets in ascending key order.
    pub fn buckets(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.buckets
            .iter()
            .map(|(key, entries)| (key.as_str(), entries.as_slice()))
    }

    /// Returns the entries of one bucket.
    #[must_use]
    pub fn bucket(&self, key: &str) -> Option<&[String]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    /// Returns the number of buckets.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of bucketed entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Returns true if no entry survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Orders two spellings of the same domain; `Less` wins.
///
/// An entry already carrying the rule marker wins, then the shorter one,
/// then the byte-wise smaller one.
fn survivor_order(a: &str, b: &str) -> Ordering {
    b.starts_with(RULE_MARKER)
        .cmp(&a.starts_with(RULE_MARKER))
        .then_with(|| a.len().cmp(&b.len()))
        .then_with(|| a.cmp(b))
}

/// Collapses entries sharing a canonical key and buckets the survivors.
///
/// Exactly one entry survives per distinct canonical key, chosen the same way
/// regardless of set iteration order. Entries with an empty key are dropped.
#[must_use]
pub fn group_entries(entries: &RawEntries) -> Grouping {
    let mut survivors: HashMap<String, &str> = HashMap::with_capacity(entries.len());
    let mut duplicates = 0;

    for entry in entries.iter() {
        let key = canonicalize(entry);
        match survivors.get_mut(&key) {
            Some(current) => {
                duplicates += 1;
                if survivor_order(entry, *current) == Ordering::Less {
                    trace!("'{}' replaces '{}' for key '{}'", entry, current, key);
                    *current = entry;
                } else {
                    trace!("'{}' collapsed into '{}'", entry, current);
                }
            }
            None => {
                survivors.insert(key, entry);
            }
        }
    }

    let unique_keys = survivors.len();
    let mut dropped = 0;
    let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (key, entry) in survivors {
        match bucket_key(&key) {
            Some(letter) => buckets.entry(letter).or_default().push(entry.to_string()),
            None => {
                debug!("Dropping '{}': nothing left after removing markers", entry);
                dropped += 1;
            }
        }
    }

    debug!(
        "Grouped {} unique keys into {} buckets ({} duplicates, {} dropped)",
        unique_keys,
        buckets.len(),
        duplicates,
        dropped
    );

    Grouping {
        buckets,
        unique_keys,
        duplicates,
        dropped,
    }
}
