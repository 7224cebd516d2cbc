// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: the lookup structures behind every query.
//!
//! One pass over the canonical records builds:
//! - **Exact-key index**: lowercased identifier → record. Last write wins.
//! - **Class buckets**: normalized registration class → records, input order.
//! - **Subject-line index**: subject key → line text → records, input order.
//! - **Enrolments**: lowercased identifier → every record of that student.
//!
//! Records are referred to by their position in the slice the index was built
//! from, the same way postings refer to documents by id. Indexes are never
//! patched in place; a reload builds new ones.
//!
//! # Invariants
//!
//! - Bucket order equals input order. Results render in this order, so
//!   grouping must be stable. That is why buckets live in a [`BucketMap`]
//!   and not a bare `HashMap`.
//! - Building twice from the same records yields equal indexes.

use crate::synonyms::subject_key;
use crate::types::CanonicalRecord;
use crate::utils::normalize;
use std::collections::HashMap;

/// Record position in the engine's record list.
pub type RecordId = usize;

/// Insertion-ordered map from text keys to values.
///
/// Iteration follows first-insertion order of keys. Lookups go through a
/// position table, so `get` stays O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketMap<V> {
    entries: Vec<(String, V)>,
    positions: HashMap<String, usize>,
}

impl<V> Default for BucketMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }
}

impl<V> BucketMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.positions.get(key).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Value for `key`, inserting `make()` at the end if the key is new.
    pub fn get_or_insert_with(&mut self, key: &str, make: impl FnOnce() -> V) -> &mut V {
        let pos = match self.positions.get(key) {
            Some(&pos) => pos,
            None => {
                self.entries.push((key.to_string(), make()));
                let pos = self.entries.len() - 1;
                self.positions.insert(key.to_string(), pos);
                pos
            }
        };
        &mut self.entries[pos].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Line text → records for one subject. `""` is the "no line" bucket.
pub type LineBuckets = BucketMap<Vec<RecordId>>;

/// All lookup structures for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Indexes {
    by_identifier: HashMap<String, RecordId>,
    by_class: BucketMap<Vec<RecordId>>,
    by_subject: BucketMap<LineBuckets>,
    enrolments: HashMap<String, Vec<RecordId>>,
}

impl Indexes {
    /// Exact identifier lookup, case-insensitive.
    pub fn exact(&self, identifier: &str) -> Option<RecordId> {
        self.by_identifier
            .get(identifier.trim().to_lowercase().as_str())
            .copied()
    }

    /// Records of one class. `key` must already be [`normalize`]d.
    pub fn class_bucket(&self, key: &str) -> Option<&[RecordId]> {
        self.by_class.get(key).map(Vec::as_slice)
    }

    pub fn classes(&self) -> &BucketMap<Vec<RecordId>> {
        &self.by_class
    }

    /// Line buckets of one subject. `key` is a [`subject_key`].
    pub fn subject_lines(&self, key: &str) -> Option<&LineBuckets> {
        self.by_subject.get(key)
    }

    pub fn subjects(&self) -> &BucketMap<LineBuckets> {
        &self.by_subject
    }

    /// Every record of one student, in input order.
    pub fn enrolment(&self, identifier: &str) -> &[RecordId] {
        self.enrolments
            .get(identifier.trim().to_lowercase().as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn identifier_count(&self) -> usize {
        self.by_identifier.len()
    }
}

/// Build every index in a single pass. O(n) time and space.
pub fn build_indexes(records: &[CanonicalRecord]) -> Indexes {
    let mut indexes = Indexes::default();

    for (id, record) in records.iter().enumerate() {
        let identifier = record.identifier.to_lowercase();
        if !identifier.is_empty() {
            // Duplicate identifiers: the later record replaces the earlier one.
            indexes.by_identifier.insert(identifier.clone(), id);
            indexes.enrolments.entry(identifier).or_default().push(id);
        }

        let class = normalize(&record.registration_class);
        if !class.is_empty() {
            indexes
                .by_class
                .get_or_insert_with(&class, Vec::new)
                .push(id);
        }

        let subject = subject_key(&record.subject);
        if !subject.is_empty() {
            indexes
                .by_subject
                .get_or_insert_with(&subject, LineBuckets::new)
                .get_or_insert_with(record.line.trim(), Vec::new)
                .push(id);
        }
    }

    indexes
}
