// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dropdown option lists derived from the loaded records.

use crate::types::CanonicalRecord;
use crate::utils::natural_cmp;
use std::collections::BTreeSet;

/// Distinct subjects offered for `grade` (every grade when `None`).
///
/// Sorted case-insensitively; spellings that differ only in case keep a
/// stable relative order.
pub fn subject_options(records: &[CanonicalRecord], grade: Option<&str>) -> Vec<String> {
    let distinct: BTreeSet<&str> = records
        .iter()
        .filter(|r| grade.map_or(true, |g| r.grade == g))
        .map(|r| r.subject.as_str())
        .filter(|s| !s.is_empty())
        .collect();

    let mut options: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    options.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));
    options
}

/// Distinct non-empty lines for `grade` and `subject`, in numeric order.
pub fn line_options(
    records: &[CanonicalRecord],
    grade: Option<&str>,
    subject: Option<&str>,
) -> Vec<String> {
    let distinct: BTreeSet<&str> = records
        .iter()
        .filter(|r| grade.map_or(true, |g| r.grade == g))
        .filter(|r| subject.map_or(true, |s| r.subject == s))
        .map(|r| r.line.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut options: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    options.sort_by(|a, b| natural_cmp(a, b));
    options
}

/// Keep a previously selected line only if it is still on offer.
pub fn retain_line(current: Option<&str>, options: &[String]) -> Option<String> {
    current
        .map(str::trim)
        .filter(|line| options.iter().any(|o| o == line))
        .map(str::to_string)
}
