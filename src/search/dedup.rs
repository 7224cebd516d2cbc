// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result deduplication by composite key.
//!
//! A student appears once per subject in the grade files, and a class
//! search that unions several buckets, or a dataset loaded from two files,
//! can surface the same student-subject pair more than once. Deduplicating
//! by record id is not enough: two distinct records can describe the same
//! enrolment.
//!
//! **Invariant**: no two results share a [`dedup_key`]. The first occurrence
//! wins and keeps its position.
//!
//! **Verified by**:
//! - `prop_no_duplicate_composite_keys` (tests/property.rs)
//! - `test_union_of_buckets_is_deduplicated` (tests/search/deduplication.rs)

use crate::index::RecordId;
use crate::synonyms::subject_key;
use crate::types::CanonicalRecord;
use std::collections::HashSet;

/// Composite key of one enrolment.
pub type DedupKey = (String, String, String);

/// Who (identifier, or name when there is none), which subject, which line.
///
/// The line keeps a student who takes one subject on two lines visible
/// twice, as browsing the whole pool shows them.
pub fn dedup_key(record: &CanonicalRecord) -> DedupKey {
    let who = if record.identifier.is_empty() {
        record.name.to_lowercase()
    } else {
        record.identifier.to_lowercase()
    };
    (who, subject_key(&record.subject), record.line.trim().to_string())
}

/// Order-preserving merger that drops repeated composite keys.
///
/// ```ignore
/// let mut merger = ResultMerger::new(&records);
/// merger.extend(bucket_a.iter().copied());
/// merger.extend(bucket_b.iter().copied());
/// let ids = merger.into_ids();
/// ```
pub struct ResultMerger<'a> {
    records: &'a [CanonicalRecord],
    seen: HashSet<DedupKey>,
    merged: Vec<RecordId>,
}

impl<'a> ResultMerger<'a> {
    pub fn new(records: &'a [CanonicalRecord]) -> Self {
        Self {
            records,
            seen: HashSet::new(),
            merged: Vec::new(),
        }
    }

    /// Pre-allocate for roughly `capacity` unique results.
    pub fn with_capacity(records: &'a [CanonicalRecord], capacity: usize) -> Self {
        Self {
            records,
            seen: HashSet::with_capacity(capacity),
            merged: Vec::with_capacity(capacity),
        }
    }

    /// Add one record. Returns false when its key was already present.
    pub fn merge(&mut self, id: RecordId) -> bool {
        let Some(record) = self.records.get(id) else {
            return false;
        };
        if self.seen.insert(dedup_key(record)) {
            self.merged.push(id);
            true
        } else {
            false
        }
    }

    pub fn extend(&mut self, ids: impl IntoIterator<Item = RecordId>) {
        for id in ids {
            self.merge(id);
        }
    }

    pub fn len(&self) -> usize {
        self.merged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.merged.is_empty()
    }

    pub fn into_ids(self) -> Vec<RecordId> {
        self.merged
    }
}
