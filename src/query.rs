// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing: free text plus a field hint in, a structured query out.
//!
//! The search box accepts a handful of informal conventions:
//!
//! - `class:10A`, `cls:10a` force a class search whatever the dropdown says.
//! - `subject:maths`, `sub:it` force a subject search.
//! - `maths line 3`, `line=3 maths` name a line explicitly.
//! - `maths 3` names a line by its trailing one or two digits.
//!
//! The trailing-digit rule is a heuristic. "Grade 10" reads as subject
//! "grade", line 10, and a subject whose name ends in digits loses them. The
//! explicit `line` marker always wins, and only `auto` and `subject_line`
//! searches fall back to the trailing digits.

use crate::synonyms::subject_key;
use crate::types::FieldHint;
use crate::utils::{is_all_digits, normalize};
use regex::Regex;
use std::sync::LazyLock;

static FIELD_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(class|cls|subject|sub)\s*:\s*").unwrap());
static LINE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)line\s*[:=]?\s*(\d{1,2})\b").unwrap());
static TRAILING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*\D)?(\d{1,2})\s*$").unwrap());

/// A query after prefix handling, line extraction and alias resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredQuery {
    /// Field the query targets after prefixes are applied.
    pub field: FieldHint,
    /// Trimmed query text with any field prefix removed, original case.
    pub raw: String,
    /// `raw`, lowercased and whitespace-collapsed.
    pub term: String,
    /// Subject index key (alias-resolved, lowercase), when the field involves subjects.
    pub subject: Option<String>,
    /// Line text, when one was named.
    pub line: Option<String>,
}

impl StructuredQuery {
    /// True when there is no text to match.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }
}

/// Subject phrase and line pulled out of compound text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectLine {
    /// Normalized subject phrase, not yet alias-resolved.
    pub subject: String,
    pub line: String,
}

/// Split "subject + line" text.
///
/// The explicit `line N` marker is searched anywhere in the text. Without
/// one, and only if `trailing_digits` is set, one or two digits at the end
/// are taken as the line. Either way an empty subject phrase means this is
/// not a subject+line query, so all-digit text never parses.
pub fn parse_subject_line(text: &str, trailing_digits: bool) -> Option<SubjectLine> {
    let low = normalize(text);
    if low.is_empty() {
        return None;
    }

    let (subject, line) = if let Some(caps) = LINE_MARKER.captures(&low) {
        let whole = caps.get(0)?;
        let line = caps[1].to_string();
        let rest = format!("{} {}", &low[..whole.start()], &low[whole.end()..]);
        (normalize(&rest), line)
    } else if trailing_digits {
        let caps = TRAILING_LINE.captures(&low)?;
        let subject = caps.get(1).map_or("", |m| m.as_str()).trim().to_string();
        (subject, caps[2].to_string())
    } else {
        return None;
    };

    if subject.is_empty() {
        return None;
    }
    Some(SubjectLine { subject, line })
}

/// Parse raw search-box text under a field hint.
pub fn parse_query(raw_query: &str, hint: FieldHint) -> StructuredQuery {
    let trimmed = raw_query.trim();

    let (field, raw) = match FIELD_PREFIX.captures(trimmed) {
        Some(caps) => {
            let prefix_len = caps.get(0).map_or(0, |m| m.end());
            let field = match caps[1].to_ascii_lowercase().as_str() {
                "class" | "cls" => FieldHint::Class,
                _ if hint == FieldHint::SubjectLine => FieldHint::SubjectLine,
                _ => FieldHint::Subject,
            };
            (field, trimmed[prefix_len..].trim())
        }
        None => (hint, trimmed),
    };

    let mut query = StructuredQuery {
        field,
        raw: raw.to_string(),
        term: normalize(raw),
        subject: None,
        line: None,
    };
    if query.is_empty() {
        return query;
    }

    match field {
        FieldHint::Identifier | FieldHint::Class | FieldHint::Name => {}
        FieldHint::Subject => match parse_subject_line(raw, false) {
            Some(compound) => {
                query.subject = Some(subject_key(&compound.subject));
                query.line = Some(compound.line);
            }
            None => query.subject = Some(subject_key(raw)),
        },
        FieldHint::SubjectLine => match parse_subject_line(raw, true) {
            Some(compound) => {
                query.subject = Some(subject_key(&compound.subject));
                query.line = Some(compound.line);
            }
            // Bare digits carry no subject phrase: treat as a plain term.
            None if is_all_digits(&query.term) => query.field = FieldHint::Auto,
            None => query.subject = Some(subject_key(raw)),
        },
        FieldHint::Auto => match parse_subject_line(raw, true) {
            Some(compound) => {
                query.subject = Some(subject_key(&compound.subject));
                query.line = Some(compound.line);
            }
            None => query.subject = Some(subject_key(raw)),
        },
    }

    query
}
