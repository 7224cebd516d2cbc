// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The lookup engine: one dataset, its indexes and its result cache.
//!
//! An engine is built per dataset scope (one grade, or every grade) and owns
//! everything a query touches. Callers only ever issue queries and hand in
//! replacement records; nothing inside is reachable for mutation.
//!
//! ```text
//! raw JSON ─▶ RecordNormalizer ─▶ Vec<CanonicalRecord> ─▶ build_indexes
//!                                         │                     │
//!            search(text, hint, filters)  ▼                     ▼
//!            ──────▶ parse_query ──▶ ResultCache ──miss──▶ TierResolver
//! ```
//!
//! Single-threaded: the cache sits in a `RefCell` so `search` can take
//! `&self` and hand out records borrowed from the engine.

use crate::cache::{ResultCache, DEFAULT_CAPACITY};
use crate::index::{build_indexes, Indexes, RecordId};
use crate::normalize::RecordNormalizer;
use crate::query::{parse_query, StructuredQuery};
use crate::search::{Resolution, TierResolver};
use crate::types::{CanonicalRecord, FieldHint, SearchFilters, SearchOutcome};
use crate::utils::normalize;
use serde_json::Value;
use std::cell::RefCell;

/// Cache key: hint, normalized text and active dropdowns.
///
/// Filters are part of the key because they change the pool a query runs in.
pub fn cache_key(raw_query: &str, hint: FieldHint, filters: &SearchFilters) -> String {
    format!(
        "{}|{}|{}",
        hint.as_str(),
        normalize(raw_query),
        filters.cache_fragment()
    )
}

#[derive(Debug)]
pub struct LookupEngine {
    records: Vec<CanonicalRecord>,
    indexes: Indexes,
    cache: RefCell<ResultCache>,
}

impl Default for LookupEngine {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl LookupEngine {
    pub fn new(records: Vec<CanonicalRecord>) -> Self {
        Self::with_capacity(records, DEFAULT_CAPACITY)
    }

    /// Engine with a result cache of `capacity` entries.
    pub fn with_capacity(records: Vec<CanonicalRecord>, capacity: usize) -> Self {
        let indexes = build_indexes(&records);
        log_build(&records, &indexes);
        Self {
            records,
            indexes,
            cache: RefCell::new(ResultCache::new(capacity)),
        }
    }

    /// Normalize a raw dataset and index it.
    pub fn from_value(value: &Value, normalizer: &RecordNormalizer) -> Self {
        Self::new(normalizer.normalize(value))
    }

    /// Swap in a new dataset. Indexes are rebuilt and every cached result dropped
    /// before this returns.
    pub fn reload(&mut self, records: Vec<CanonicalRecord>) {
        self.indexes = build_indexes(&records);
        self.records = records;
        self.cache.get_mut().clear();
        log_build(&self.records, &self.indexes);
    }

    /// Resolve free text under a field hint and dropdown filters.
    ///
    /// Zero matches is `Matches(vec![])`, never an error. `MissingGrade` is
    /// returned for an empty subject+line search without a grade filter.
    pub fn search(&self, raw_query: &str, hint: FieldHint, filters: &SearchFilters) -> SearchOutcome<'_> {
        let query = parse_query(raw_query, hint);
        if query.field == FieldHint::SubjectLine && query.is_empty() {
            return if filters.grade.is_none() {
                SearchOutcome::MissingGrade
            } else {
                SearchOutcome::Matches(Vec::new())
            };
        }

        let key = cache_key(raw_query, hint, filters);
        let cached = self
            .cache
            .borrow_mut()
            .get(&key)
            .map(<[RecordId]>::to_vec);
        if let Some(ids) = cached {
            tracing::debug!(%key, hits = ids.len(), "cache hit");
            return SearchOutcome::Matches(self.materialize(&ids));
        }

        let resolution = self.resolve(&query, filters);
        tracing::debug!(%key, hits = resolution.ids.len(), "cache miss");
        let hits = self.materialize(&resolution.ids);
        self.cache.borrow_mut().put(key, resolution.ids);
        SearchOutcome::Matches(hits)
    }

    /// Uncached resolution of an already parsed query.
    pub fn resolve(&self, query: &StructuredQuery, filters: &SearchFilters) -> Resolution {
        TierResolver::new(&self.records, &self.indexes, filters).resolve(query)
    }

    /// The record indexed under `identifier`, case-insensitive.
    pub fn lookup(&self, identifier: &str) -> Option<&CanonicalRecord> {
        self.indexes
            .exact(identifier)
            .and_then(|id| self.records.get(id))
    }

    /// Every record of one student, in input order.
    pub fn subjects_for(&self, identifier: &str) -> Vec<&CanonicalRecord> {
        self.materialize(self.indexes.enrolment(identifier))
    }

    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn indexes(&self) -> &Indexes {
        &self.indexes
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of queries currently cached.
    pub fn cached_queries(&self) -> usize {
        self.cache.borrow().len()
    }

    fn materialize(&self, ids: &[RecordId]) -> Vec<&CanonicalRecord> {
        ids.iter().filter_map(|&id| self.records.get(id)).collect()
    }
}

fn log_build(records: &[CanonicalRecord], indexes: &Indexes) {
    tracing::info!(
        records = records.len(),
        identifiers = indexes.identifier_count(),
        classes = indexes.classes().len(),
        subjects = indexes.subjects().len(),
        "indexes built"
    );
}
