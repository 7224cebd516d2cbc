// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Subject aliases: "IT" means Information Technology.
//!
//! Teachers type abbreviations, timetables print them, and the grade files
//! spell subjects out in full, sometimes with a "(Gr 10)" qualifier stuck on
//! the end. Before anything is compared, a subject phrase is lowercased,
//! whitespace-collapsed, stripped of that qualifier and looked up in a fixed
//! alias table. A miss returns the normalized phrase itself, so the result is
//! a best-effort canonical name and may not exist in any index.

use crate::utils::normalize;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Alias phrase (lowercase) → canonical subject name. Many-to-one.
const SUBJECT_ALIASES: &[(&str, &str)] = &[
    ("egd", "Engineering Graphics and Design"),
    ("enghl", "English Home Language"),
    ("english hl", "English Home Language"),
    ("it", "Information Technology"),
    ("life sci", "Life Sciences"),
    ("life science", "Life Sciences"),
    ("life sciences", "Life Sciences"),
    ("ls", "Life Sciences"),
    ("ma", "Mathematics"),
    ("math", "Mathematics"),
    ("maths", "Mathematics"),
    ("mathematics", "Mathematics"),
    ("math lit", "Mathematical Literacy"),
    ("maths lit", "Mathematical Literacy"),
    ("mathematical literacy", "Mathematical Literacy"),
    ("mlit", "Mathematical Literacy"),
    ("va", "Visual Arts"),
];

static ALIAS_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| SUBJECT_ALIASES.iter().copied().collect());

static GRADE_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(gr\s*\d+\)\s*$").unwrap());

/// Lowercase, collapse whitespace, drop a trailing "(gr N)" qualifier.
pub fn normalize_subject(term: &str) -> String {
    let collapsed = normalize(term);
    GRADE_QUALIFIER.replace(&collapsed, "").trim().to_string()
}

/// Canonical subject name for `term`, or the normalized term on a miss.
///
/// ```ignore
/// assert_eq!(resolve_subject("IT"), "Information Technology");
/// assert_eq!(resolve_subject("Maths (Gr 10)"), "Mathematics");
/// assert_eq!(resolve_subject("Dance  Studies"), "dance studies");
/// ```
pub fn resolve_subject(term: &str) -> String {
    let normalized = normalize_subject(term);
    match ALIAS_TABLE.get(normalized.as_str()) {
        Some(canonical) => (*canonical).to_string(),
        None => normalized,
    }
}

/// Key used by the subject-line index: the resolved name, lowercased.
pub fn subject_key(term: &str) -> String {
    resolve_subject(term).to_lowercase()
}

/// Number of aliases in the static table.
pub fn alias_count() -> usize {
    ALIAS_TABLE.len()
}
