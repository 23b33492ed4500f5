// src/pipeline/diff.rs

//! Diff calculation between catalog states.
//!
//! Computes the difference between two entry collections to identify
//! added, updated, and removed urls, or derives the second collection
//! from a base state plus a change log.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{ChangeKind, ChangeRecord, Entry};
use crate::providers::EntrySource;

/// Computed difference between two catalog states.
///
/// A pure value, never persisted. Results are sorted by url so output is
/// deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DiffResult {
    /// Entries present in the new state only
    pub added: Vec<Entry>,
    /// Entries present in both states with differing fields
    pub updated: Vec<Entry>,
    /// Urls present in the old state only
    pub removed: Vec<String>,
}

impl DiffResult {
    /// Check if there are any changes.
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.updated.is_empty() || !self.removed.is_empty()
    }

    /// Get the total number of changes.
    pub fn change_count(&self) -> usize {
        self.added.len() + self.updated.len() + self.removed.len()
    }
}

/// Calculator for computing diffs between catalog states.
///
/// Field equality follows [`Entry::diff_eq`]: extension blocks (images,
/// videos, news) are not compared.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffCalculator;

impl DiffCalculator {
    /// Create a new diff calculator.
    pub fn new() -> Self {
        Self
    }

    /// Calculate the diff between old and new entry collections.
    ///
    /// Each side is keyed by url first; if a side contains duplicate urls,
    /// the last entry wins.
    pub fn calculate(&self, old: &[Entry], new: &[Entry]) -> DiffResult {
        let old_map: HashMap<&str, &Entry> = old.iter().map(|e| (e.url.as_str(), e)).collect();
        let new_map: HashMap<&str, &Entry> = new.iter().map(|e| (e.url.as_str(), e)).collect();

        let mut added = Vec::new();
        let mut updated = Vec::new();
        for (url, entry) in &new_map {
            match old_map.get(url) {
                None => added.push((*entry).clone()),
                Some(previous) if !previous.diff_eq(entry) => updated.push((*entry).clone()),
                Some(_) => {}
            }
        }

        let mut removed: Vec<String> = old_map
            .keys()
            .filter(|url| !new_map.contains_key(*url))
            .map(|url| url.to_string())
            .collect();

        added.sort_by(|a, b| a.url.cmp(&b.url));
        updated.sort_by(|a, b| a.url.cmp(&b.url));
        removed.sort();

        DiffResult {
            added,
            updated,
            removed,
        }
    }

    /// Calculate the diff between two lazy sources.
    ///
    /// Both sides are materialized into memory before diffing; there is no
    /// streaming diff.
    pub async fn calculate_sources(
        &self,
        old: EntrySource,
        new: EntrySource,
    ) -> Result<DiffResult> {
        let old = old.collect().await?;
        let new = new.collect().await?;
        Ok(self.calculate(&old, &new))
    }

    /// Derive a new state by replaying a change log onto `base`, then diff
    /// `base` against the derived state.
    ///
    /// Add and update records upsert the entry at their url; remove records
    /// delete the url. Removing a url absent from the base is a no-op. An
    /// add/update record without an entry payload violates the change-log
    /// contract and is skipped with a warning.
    pub fn calculate_from_changes(&self, base: &[Entry], changes: &[ChangeRecord]) -> DiffResult {
        let mut derived: HashMap<String, Entry> = base
            .iter()
            .map(|e| (e.url.clone(), e.clone()))
            .collect();

        for change in changes {
            match change.kind {
                ChangeKind::Add | ChangeKind::Update => match &change.entry {
                    Some(entry) => {
                        derived.insert(change.url.clone(), entry.clone());
                    }
                    None => {
                        log::warn!(
                            "Change record for {} has no entry payload, skipping",
                            change.url
                        );
                    }
                },
                ChangeKind::Remove => {
                    derived.remove(&change.url);
                }
            }
        }

        let derived: Vec<Entry> = derived.into_values().collect();
        self.calculate(base, &derived)
    }
}

/// Convenience function to calculate a diff.
pub fn calculate_diff(old: &[Entry], new: &[Entry]) -> DiffResult {
    DiffCalculator::new().calculate(old, new)
}
