// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Record normalization: many source layouts in, one record shape out.
//!
//! The grade files were exported by different tools over the years. Some are a
//! flat list of learners, some group learners under a `subjects` array, some
//! are an object keyed by subject name. Field names drift too (`studentId`,
//! `admissionNo`, `ADMNR`...). This module recognizes the layout once, as a
//! [`RawDataset`] variant, then maps each entry through fixed per-attribute
//! key priority lists.
//!
//! Nothing here fails. Non-object entries are skipped, unknown top-level
//! values produce no records, and entries without an identifier or a name are
//! dropped.

use crate::types::CanonicalRecord;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use tracing::debug;

const IDENTIFIER_KEYS: &[&str] = &[
    "student_number",
    "studentNumber",
    "studentId",
    "id",
    "admissionNo",
    "adminNo",
    "ADMNR",
];
const CLASS_KEYS: &[&str] = &["registrationClass", "class", "Class", "group"];
const SUBJECT_KEYS: &[&str] = &["subject", "Subject"];
const LINE_KEYS: &[&str] = &["line", "Line"];
const TEACHER_KEYS: &[&str] = &["teacher", "teacher_raw", "teacherName"];
const GENDER_KEYS: &[&str] = &["gender", "Gender"];
const GRADE_KEYS: &[&str] = &["grade", "Grade"];

const GROUP_SUBJECT_KEYS: &[&str] = &["name", "subject", "title", "code"];
const GROUP_MEMBER_KEYS: &[&str] = &["students", "learners", "pupils"];
const UNKNOWN_SUBJECT: &str = "Unknown Subject";

static GRADE_IN_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bgrade\s+(\d+)").unwrap());

/// The three source layouts we know how to read.
#[derive(Debug, Clone, Copy)]
pub enum RawDataset<'a> {
    /// `[ {student...}, ... ]`
    Flat(&'a [Value]),
    /// `{ "subjects": [ { "name": "...", "students": [...] }, ... ] }`
    SubjectGrouped(&'a [Value]),
    /// `{ "Mathematics": [...], "Physics": { "students": [...] } }`
    CategoryGrouped(&'a Map<String, Value>),
}

/// Layout name without the borrowed payload, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetShape {
    Flat,
    SubjectGrouped,
    CategoryGrouped,
    Unrecognized,
}

impl<'a> RawDataset<'a> {
    /// Recognize the layout of a parsed document. `None` for scalars and null.
    pub fn classify(value: &'a Value) -> Option<Self> {
        match value {
            Value::Array(items) => Some(RawDataset::Flat(items)),
            Value::Object(map) => match map.get("subjects") {
                Some(Value::Array(entries)) => Some(RawDataset::SubjectGrouped(entries)),
                _ => Some(RawDataset::CategoryGrouped(map)),
            },
            _ => None,
        }
    }

    pub fn shape(&self) -> DatasetShape {
        match self {
            RawDataset::Flat(_) => DatasetShape::Flat,
            RawDataset::SubjectGrouped(_) => DatasetShape::SubjectGrouped,
            RawDataset::CategoryGrouped(_) => DatasetShape::CategoryGrouped,
        }
    }
}

impl DatasetShape {
    pub fn of(value: &Value) -> Self {
        RawDataset::classify(value).map_or(DatasetShape::Unrecognized, |d| d.shape())
    }
}

/// Photo path settings for derived `photo_reference` values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub photo_dir: String,
    pub photo_extension: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            photo_dir: "../photos/".to_string(),
            photo_extension: "webp".to_string(),
        }
    }
}

/// Maps raw documents to canonical records.
#[derive(Debug, Clone, Default)]
pub struct RecordNormalizer {
    options: NormalizeOptions,
}

impl RecordNormalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    /// Normalize any supported layout. Pure: same input, same output.
    pub fn normalize(&self, value: &Value) -> Vec<CanonicalRecord> {
        let Some(dataset) = RawDataset::classify(value) else {
            debug!("unrecognized dataset layout; no records");
            return Vec::new();
        };
        self.normalize_dataset(dataset)
    }

    pub fn normalize_dataset(&self, dataset: RawDataset<'_>) -> Vec<CanonicalRecord> {
        let mut out = Vec::new();
        let mut skipped = 0usize;

        match dataset {
            RawDataset::Flat(items) => {
                for item in items {
                    self.push_member(&mut out, &mut skipped, item, None);
                }
            }
            RawDataset::SubjectGrouped(entries) => {
                for entry in entries {
                    let Some(entry) = entry.as_object() else {
                        skipped += 1;
                        continue;
                    };
                    let subject = first_text(entry, GROUP_SUBJECT_KEYS)
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| UNKNOWN_SUBJECT.to_string());
                    for key in GROUP_MEMBER_KEYS {
                        for member in as_list(entry.get(*key)) {
                            self.push_member(&mut out, &mut skipped, member, Some(&subject));
                        }
                    }
                }
            }
            RawDataset::CategoryGrouped(map) => {
                for (category, value) in map {
                    match value {
                        Value::Array(members) => {
                            for member in members {
                                self.push_member(&mut out, &mut skipped, member, Some(category.as_str()));
                            }
                        }
                        Value::Object(group) => {
                            let subject = first_text(group, &["name", "subject"])
                                .filter(|s| !s.is_empty())
                                .unwrap_or_else(|| category.clone());
                            for member in as_list(group.get("students")) {
                                self.push_member(&mut out, &mut skipped, member, Some(&subject));
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        if skipped > 0 {
            debug!(skipped, kept = out.len(), "dropped malformed or anonymous entries");
        }
        out
    }

    fn push_member(
        &self,
        out: &mut Vec<CanonicalRecord>,
        skipped: &mut usize,
        item: &Value,
        group_subject: Option<&str>,
    ) {
        match item.as_object().and_then(|m| self.map_fields(m, group_subject)) {
            Some(record) => out.push(record),
            None => *skipped += 1,
        }
    }

    /// Map one source object. `None` when it has neither identifier nor name.
    fn map_fields(
        &self,
        item: &Map<String, Value>,
        group_subject: Option<&str>,
    ) -> Option<CanonicalRecord> {
        let identifier = first_text(item, IDENTIFIER_KEYS).unwrap_or_default();
        let name = match first_text(item, &["name"]) {
            Some(name) => name,
            None => [
                first_text(item, &["firstName"]),
                first_text(item, &["lastName"]),
            ]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        };

        if identifier.is_empty() && name.is_empty() {
            return None;
        }

        let registration_class = first_text(item, CLASS_KEYS).unwrap_or_default();
        let subject = first_text(item, SUBJECT_KEYS)
            .or_else(|| group_subject.map(str::to_string))
            .unwrap_or_default();
        let grade = first_text(item, GRADE_KEYS)
            .filter(|g| !g.is_empty())
            .or_else(|| grade_from_class(&registration_class))
            .unwrap_or_default();
        let photo_reference = self.photo_reference(&identifier, first_text(item, &["photo"]));

        Some(CanonicalRecord {
            identifier,
            name,
            registration_class,
            subject,
            line: first_text(item, LINE_KEYS).unwrap_or_default(),
            teacher: first_text(item, TEACHER_KEYS).unwrap_or_default(),
            gender: first_text(item, GENDER_KEYS).unwrap_or_default(),
            photo_reference,
            grade,
        })
    }

    fn photo_reference(&self, identifier: &str, photo: Option<String>) -> String {
        let dir = &self.options.photo_dir;
        match photo.filter(|p| !p.is_empty()) {
            Some(photo) => format!("{dir}{photo}"),
            None if identifier.is_empty() => String::new(),
            None => format!("{dir}{identifier}.{}", self.options.photo_extension),
        }
    }
}

/// Normalize with default photo settings.
pub fn normalize_records(value: &Value) -> Vec<CanonicalRecord> {
    RecordNormalizer::default().normalize(value)
}

/// First key present with a scalar, non-null value, rendered as trimmed text.
fn first_text(item: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| scalar_text(item.get(*key)?))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// A member container may be a list or a single object.
fn as_list(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(items)) => items,
        Some(single @ Value::Object(_)) => std::slice::from_ref(single),
        _ => &[],
    }
}

fn grade_from_class(class: &str) -> Option<String> {
    GRADE_IN_CLASS
        .captures(class)
        .map(|caps| caps[1].to_string())
}
