// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a lookup: records, field hints, filters, outcomes.
//!
//! Every source file, whatever its field names, ends up as a list of
//! [`CanonicalRecord`]s. All attributes are plain strings and absent values
//! are empty strings, so matching code always has something to search.
//!
//! # Invariants
//!
//! - **CanonicalRecord**: `identifier` or `name` is non-empty. The normalizer
//!   drops records lacking both.
//! - **SearchOutcome**: `Matches` never holds the same composite key twice
//!   (see `search::dedup`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One student, or one student-subject-line association.
///
/// Serialized field names follow the source datasets (`student_number`,
/// `class`, `photo`) so exported CSV columns look like the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    #[serde(rename = "student_number")]
    pub identifier: String,
    pub name: String,
    #[serde(rename = "class")]
    pub registration_class: String,
    pub subject: String,
    /// Small positive integer as text. Empty means "no line".
    pub line: String,
    pub teacher: String,
    pub gender: String,
    /// Derived photo path. Not authoritative.
    #[serde(rename = "photo")]
    pub photo_reference: String,
    pub grade: String,
}

/// Which attribute a free-text query targets.
///
/// Closed set: anything unrecognized falls back to [`FieldHint::Auto`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldHint {
    #[default]
    Auto,
    Identifier,
    Class,
    Name,
    Subject,
    SubjectLine,
}

impl FieldHint {
    pub const ALL: [FieldHint; 6] = [
        FieldHint::Auto,
        FieldHint::Identifier,
        FieldHint::Class,
        FieldHint::Name,
        FieldHint::Subject,
        FieldHint::SubjectLine,
    ];

    /// Lenient parse. Unknown hints become `Auto` rather than an error.
    ///
    /// Accepts the legacy names used by the lookup pages (`admin`,
    /// `student_number`, `subject+line`).
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "identifier" | "id" | "admin" | "student_number" | "admission" => {
                FieldHint::Identifier
            }
            "class" | "cls" | "registration_class" => FieldHint::Class,
            "name" => FieldHint::Name,
            "subject" | "sub" => FieldHint::Subject,
            "subject_line" | "subject+line" | "subjectline" => FieldHint::SubjectLine,
            _ => FieldHint::Auto,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldHint::Auto => "auto",
            FieldHint::Identifier => "identifier",
            FieldHint::Class => "class",
            FieldHint::Name => "name",
            FieldHint::Subject => "subject",
            FieldHint::SubjectLine => "subject_line",
        }
    }
}

impl fmt::Display for FieldHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dropdown prefilters. Each set value is an exact-equality constraint and
/// all set values must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchFilters {
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub line: Option<String>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = non_blank(grade.into());
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = non_blank(subject.into());
        self
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.line = non_blank(line.into());
        self
    }

    /// True when no dropdown is set.
    pub fn is_empty(&self) -> bool {
        self.grade.is_none() && self.subject.is_none() && self.line.is_none()
    }

    /// AND of every set constraint. Line compares trimmed text.
    pub fn matches(&self, record: &CanonicalRecord) -> bool {
        self.grade.as_deref().map_or(true, |g| record.grade == g)
            && self.subject.as_deref().map_or(true, |s| record.subject == s)
            && self
                .line
                .as_deref()
                .map_or(true, |l| record.line.trim() == l.trim())
    }

    /// Stable text form used inside result-cache keys.
    pub(crate) fn cache_fragment(&self) -> String {
        format!(
            "g={}|s={}|l={}",
            self.grade.as_deref().unwrap_or(""),
            self.subject.as_deref().unwrap_or(""),
            self.line.as_deref().unwrap_or("")
        )
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// What a search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    /// Ordered, deduplicated matches. May be empty.
    Matches(Vec<&'a CanonicalRecord>),
    /// A subject+line search needs a grade and none was available.
    MissingGrade,
}

impl<'a> SearchOutcome<'a> {
    /// The matched records, or an empty slice when a precondition failed.
    pub fn records(&self) -> &[&'a CanonicalRecord] {
        match self {
            SearchOutcome::Matches(records) => records,
            SearchOutcome::MissingGrade => &[],
        }
    }

    pub fn into_records(self) -> Vec<&'a CanonicalRecord> {
        match self {
            SearchOutcome::Matches(records) => records,
            SearchOutcome::MissingGrade => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    pub fn is_missing_grade(&self) -> bool {
        matches!(self, SearchOutcome::MissingGrade)
    }

    /// Identifiers in result order. Handy for assertions and logs.
    pub fn identifiers(&self) -> Vec<&'a str> {
        self.records()
            .iter()
            .map(|r| r.identifier.as_str())
            .collect()
    }
}
