// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CSV export of result lists.
//!
//! Columns are derived from the rows themselves: a fixed preferred order,
//! restricted to columns that actually occur, then any other columns
//! alphabetically. Rows are plain JSON objects so raw source rows and
//! canonical records export the same way.
//!
//! Cell rules: strings are written as-is, null and missing keys are empty,
//! everything else is written as compact JSON. A cell containing a comma,
//! quote or newline is quoted, with inner quotes doubled.

use crate::error::Result;
use crate::types::CanonicalRecord;
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::io::Write;

/// One export row: column name → value.
pub type Row = Map<String, Value>;

/// Preferred column order. Absent columns are skipped.
pub const PREFERRED_COLUMNS: &[&str] = &[
    "photo",
    "student_number",
    "studentId",
    "id",
    "studentNumber",
    "admissionNo",
    "firstName",
    "lastName",
    "name",
    "gender",
    "class",
    "group",
    "subject",
    "line",
    "teacher",
    "grade",
];

const FALLBACK_COLUMN: &str = "name";

/// Column list for `rows`: preferred columns first, the rest sorted.
pub fn derive_columns(rows: &[Row]) -> Vec<String> {
    let present: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let mut columns: Vec<String> = PREFERRED_COLUMNS
        .iter()
        .filter(|c| present.contains(*c))
        .map(|c| c.to_string())
        .collect();
    columns.extend(
        present
            .iter()
            .copied()
            .filter(|c| !PREFERRED_COLUMNS.contains(c))
            .map(str::to_string),
    );

    if columns.is_empty() {
        columns.push(FALLBACK_COLUMN.to_string());
    }
    columns
}

/// Text of one cell before quoting.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Write a header and one line per row to `writer`, each ending in `\n`.
///
/// Nothing is written for empty input.
pub fn write_csv<W: Write>(writer: W, rows: &[Row]) -> Result<()> {
    if rows.is_empty() {
        return Ok(());
    }
    let columns = derive_columns(rows);

    let mut out = csv::WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    out.write_record(&columns)?;
    for row in rows {
        out.write_record(columns.iter().map(|c| cell_text(row.get(c))))?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Header plus one line per row, joined by `\n`. Empty input gives "".
pub fn to_csv(rows: &[Row]) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, rows)?;
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Canonical records as export rows, keyed by their serialized field names.
pub fn record_rows<'a>(records: impl IntoIterator<Item = &'a CanonicalRecord>) -> Vec<Row> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::to_value(record) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        })
        .collect()
}

/// Download name for an export made on `date`.
pub fn export_filename(date: NaiveDate) -> String {
    format!("StudentSearch-{}.csv", date.format("%Y%m%d"))
}
