// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The four-tier resolver: exact key → exact bucket → prefix → substring.
//!
//! Tier 1 (exact key) is a hash lookup on the identifier index. Tier 2
//! (exact bucket) returns a whole class or subject bucket when the term is
//! exactly a key. Tier 3 (prefix) widens to subject keys starting with the
//! term, so "mat" finds Mathematics and Mathematical Literacy. Tier 4
//! (substring) is the fallback: a scan over index keys or over the pool.
//!
//! Tiers do not accumulate. The first tier that yields at least one record
//! inside the prefiltered pool wins and the rest never run. Which tiers a
//! field may use is a fixed table, see [`strategy`].
//!
//! Dropdown filters define the pool before any text matching happens. Index
//! buckets are built over every record, so tier output is filtered against
//! the pool rather than the other way round.

use super::dedup::ResultMerger;
use crate::index::{Indexes, LineBuckets, RecordId};
use crate::query::StructuredQuery;
use crate::types::{CanonicalRecord, FieldHint, SearchFilters};
use crate::utils::{contains_normalized, is_all_digits};

/// One matching strategy, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTier {
    /// Identifier equality through the exact-key index.
    ExactKey,
    /// Term equals a class or subject key; the whole bucket matches.
    ExactBucket,
    /// Subject keys starting with the term.
    Prefix,
    /// Case-insensitive containment, keys or record fields.
    Substring,
}

impl MatchTier {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchTier::ExactKey => "exact-key",
            MatchTier::ExactBucket => "exact-bucket",
            MatchTier::Prefix => "prefix",
            MatchTier::Substring => "substring",
        }
    }
}

const IDENTIFIER_TIERS: &[MatchTier] = &[MatchTier::ExactKey, MatchTier::Substring];
const NAME_TIERS: &[MatchTier] = &[MatchTier::Substring];
const CLASS_TIERS: &[MatchTier] = &[MatchTier::ExactBucket, MatchTier::Substring];
const SUBJECT_TIERS: &[MatchTier] = &[
    MatchTier::ExactBucket,
    MatchTier::Prefix,
    MatchTier::Substring,
];
const AUTO_TIERS: &[MatchTier] = &[
    MatchTier::ExactKey,
    MatchTier::ExactBucket,
    MatchTier::Prefix,
    MatchTier::Substring,
];

/// Tiers a field is allowed to try, in order.
pub fn strategy(field: FieldHint) -> &'static [MatchTier] {
    match field {
        FieldHint::Identifier => IDENTIFIER_TIERS,
        FieldHint::Name => NAME_TIERS,
        FieldHint::Class => CLASS_TIERS,
        FieldHint::Subject | FieldHint::SubjectLine => SUBJECT_TIERS,
        FieldHint::Auto => AUTO_TIERS,
    }
}

/// Outcome of one resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Tier that produced the ids. `None` for the empty-query pool and for misses.
    pub tier: Option<MatchTier>,
    pub ids: Vec<RecordId>,
}

/// Runs a structured query against one dataset under fixed filters.
pub struct TierResolver<'a> {
    records: &'a [CanonicalRecord],
    indexes: &'a Indexes,
    /// Pool membership per record. `None` means every record is in the pool.
    pool: Option<Vec<bool>>,
}

impl<'a> TierResolver<'a> {
    pub fn new(records: &'a [CanonicalRecord], indexes: &'a Indexes, filters: &SearchFilters) -> Self {
        let pool = if filters.is_empty() {
            None
        } else {
            Some(records.iter().map(|r| filters.matches(r)).collect())
        };
        Self {
            records,
            indexes,
            pool,
        }
    }

    fn admits(&self, id: RecordId) -> bool {
        match &self.pool {
            None => id < self.records.len(),
            Some(mask) => mask.get(id).copied().unwrap_or(false),
        }
    }

    /// Ids of the prefiltered pool, in record order.
    pub fn pool(&self) -> Vec<RecordId> {
        (0..self.records.len()).filter(|&id| self.admits(id)).collect()
    }

    /// Resolve `query`. An empty query returns the pool untouched.
    pub fn resolve(&self, query: &StructuredQuery) -> Resolution {
        if query.is_empty() {
            return Resolution {
                tier: None,
                ids: self.pool(),
            };
        }

        for &tier in strategy(query.field) {
            let candidates = self.run_tier(tier, query);
            let mut merger = ResultMerger::with_capacity(self.records, candidates.len());
            merger.extend(candidates.into_iter().filter(|&id| self.admits(id)));
            if !merger.is_empty() {
                tracing::debug!(
                    tier = tier.as_str(),
                    field = %query.field,
                    hits = merger.len(),
                    "query resolved"
                );
                return Resolution {
                    tier: Some(tier),
                    ids: merger.into_ids(),
                };
            }
        }

        tracing::debug!(field = %query.field, term = %query.term, "no tier matched");
        Resolution::default()
    }

    fn run_tier(&self, tier: MatchTier, query: &StructuredQuery) -> Vec<RecordId> {
        match tier {
            MatchTier::ExactKey => self.exact_key(query),
            MatchTier::ExactBucket => self.exact_bucket(query),
            MatchTier::Prefix => self.prefix(query),
            MatchTier::Substring => self.substring(query),
        }
    }

    /// Tier 1. Auto only takes this path for all-digit terms.
    fn exact_key(&self, query: &StructuredQuery) -> Vec<RecordId> {
        let applies = match query.field {
            FieldHint::Identifier => true,
            FieldHint::Auto => is_all_digits(&query.term),
            _ => false,
        };
        if !applies {
            return Vec::new();
        }
        self.indexes.exact(&query.term).into_iter().collect()
    }

    /// Tier 2. Auto tries the class bucket before the subject bucket.
    fn exact_bucket(&self, query: &StructuredQuery) -> Vec<RecordId> {
        let class_hit = || {
            self.indexes
                .class_bucket(&query.term)
                .map(<[RecordId]>::to_vec)
                .unwrap_or_default()
        };
        let subject_hit = || {
            query
                .subject
                .as_deref()
                .and_then(|key| self.indexes.subject_lines(key))
                .map(|lines| narrow_to_line(lines, query.line.as_deref()))
                .unwrap_or_default()
        };

        match query.field {
            FieldHint::Class => class_hit(),
            FieldHint::Subject | FieldHint::SubjectLine => subject_hit(),
            FieldHint::Auto => {
                let ids = class_hit();
                if ids.is_empty() {
                    subject_hit()
                } else {
                    ids
                }
            }
            FieldHint::Identifier | FieldHint::Name => Vec::new(),
        }
    }

    /// Tier 3. Subject keys starting with the resolved subject term.
    ///
    /// Auto only prefix-matches compound queries ("mat 3"), so plain names
    /// fall through to the substring scan.
    fn prefix(&self, query: &StructuredQuery) -> Vec<RecordId> {
        if query.field == FieldHint::Auto && query.line.is_none() {
            return Vec::new();
        }
        let Some(term) = query.subject.as_deref() else {
            return Vec::new();
        };
        self.matching_subjects(query.line.as_deref(), |key| key.starts_with(term))
    }

    /// Tier 4. Keys or record fields containing the term.
    fn substring(&self, query: &StructuredQuery) -> Vec<RecordId> {
        let term = query.term.as_str();
        match query.field {
            FieldHint::Identifier => self.scan(|r| contains_normalized(&r.identifier, term)),
            FieldHint::Name => self.scan(|r| contains_normalized(&r.name, term)),
            FieldHint::Class => self
                .indexes
                .classes()
                .iter()
                .filter(|(key, _)| key.contains(term))
                .flat_map(|(_, ids)| ids.iter().copied())
                .collect(),
            FieldHint::Subject | FieldHint::SubjectLine => {
                let needle = query.subject.as_deref().unwrap_or(term);
                self.matching_subjects(query.line.as_deref(), |key| key.contains(needle))
            }
            FieldHint::Auto => self.scan(|r| {
                let plain = contains_normalized(&r.identifier, term)
                    || contains_normalized(&r.name, term)
                    || contains_normalized(&r.subject, term)
                    || contains_normalized(&r.line, term)
                    || contains_normalized(&r.teacher, term);
                plain || compound_hit(r, query)
            }),
        }
    }

    /// Union of subject buckets whose key satisfies `keep`, in key order.
    fn matching_subjects(&self, line: Option<&str>, keep: impl Fn(&str) -> bool) -> Vec<RecordId> {
        self.indexes
            .subjects()
            .iter()
            .filter(|(key, _)| keep(key))
            .flat_map(|(_, lines)| narrow_to_line(lines, line))
            .collect()
    }

    /// Pool records satisfying `hit`, in record order.
    fn scan(&self, hit: impl Fn(&CanonicalRecord) -> bool) -> Vec<RecordId> {
        self.records
            .iter()
            .enumerate()
            .filter(|&(id, record)| self.admits(id) && hit(record))
            .map(|(id, _)| id)
            .collect()
    }
}

/// Records of one subject, optionally restricted to one line.
///
/// With no line every bucket is returned in line-key order, including the
/// `""` bucket of records that have no line.
fn narrow_to_line(lines: &LineBuckets, line: Option<&str>) -> Vec<RecordId> {
    match line.map(str::trim).filter(|l| !l.is_empty()) {
        Some(line) => lines.get(line).cloned().unwrap_or_default(),
        None => lines.iter().flat_map(|(_, ids)| ids.iter().copied()).collect(),
    }
}

/// "mat 3" style containment: subject contains the phrase and the line matches.
fn compound_hit(record: &CanonicalRecord, query: &StructuredQuery) -> bool {
    match (query.subject.as_deref(), query.line.as_deref()) {
        (Some(subject), Some(line)) => {
            record.line.trim() == line && contains_normalized(&record.subject, subject)
        }
        _ => false,
    }
}
