//! Shared test utilities and fixtures.

#![allow(dead_code)]

use rollcall::{CanonicalRecord, FieldHint, LookupConfig, LookupEngine, SearchFilters};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Re-export canonical test utilities from rollcall::testing
pub use rollcall::testing::{make_enrolment, make_record, make_student, sample_enrolments};

// ============================================================================
// RAW DATASETS
// ============================================================================

/// Subject-grouped layout, the shape most grade files use.
pub fn grade10_grouped() -> Value {
    json!({
        "subjects": [
            {
                "name": "Mathematics",
                "students": [
                    {"student_number": "1001", "name": "Ann Lee", "class": "10A", "line": "3", "teacher": "Mr Dube"},
                    {"student_number": "1002", "name": "Bo Kim", "class": "10B", "line": "3", "teacher": "Mr Dube"}
                ]
            },
            {
                "name": "Information Technology (Gr 10)",
                "learners": [
                    {"student_number": "1001", "name": "Ann Lee", "class": "10A", "line": 5, "teacher": "Mrs Botha"}
                ]
            }
        ]
    })
}

/// Category-keyed layout.
pub fn grade11_categories() -> Value {
    json!({
        "Life Sciences": [
            {"studentId": "2001", "firstName": "Dee", "lastName": "Smith", "group": "11A", "line": "1"}
        ],
        "Mathematics": {
            "students": [
                {"studentId": "2002", "name": "Eli Jones", "group": "11B", "line": "4", "teacher": "Mr Dube"}
            ]
        }
    })
}

/// Flat identity-level layout.
pub fn grade12_flat() -> Value {
    json!([
        {"admissionNo": "3001", "name": "Fay Zulu", "registrationClass": "12C", "gender": "F"},
        {"admissionNo": "3002", "name": "Gus Moyo", "registrationClass": "12C", "gender": "M"},
        42,
        {"note": "no identifier, no name"}
    ])
}

// ============================================================================
// HELPERS
// ============================================================================

/// Identifiers of a search, in result order.
pub fn search_ids(engine: &LookupEngine, text: &str, hint: FieldHint) -> Vec<String> {
    search_ids_with(engine, text, hint, &SearchFilters::new())
}

pub fn search_ids_with(
    engine: &LookupEngine,
    text: &str,
    hint: FieldHint,
    filters: &SearchFilters,
) -> Vec<String> {
    engine
        .search(text, hint, filters)
        .identifiers()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Write the three grade files into a fresh directory.
pub fn write_grade_files(dir: &Path) {
    let files = [
        ("Subjects-Grade10.json", grade10_grouped()),
        ("Subjects-Grade11.json", grade11_categories()),
        ("Subjects-Grade12.json", grade12_flat()),
    ];
    for (name, value) in files {
        fs::write(dir.join(name), value.to_string()).expect("write grade file");
    }
}

/// Config that only looks inside `dir`.
pub fn config_in(dir: &TempDir) -> LookupConfig {
    LookupConfig {
        base_paths: vec![dir.path().to_path_buf()],
        ..LookupConfig::default()
    }
}

pub fn subjects(records: &[&CanonicalRecord]) -> Vec<String> {
    records.iter().map(|r| r.subject.clone()).collect()
}
