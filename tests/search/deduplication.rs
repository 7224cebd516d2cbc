//! No student-subject pair appears twice in one result list.

use super::common::{make_enrolment, search_ids};
use rollcall::search::dedup_key;
use rollcall::{CanonicalRecord, FieldHint, LookupEngine, SearchFilters};
use std::collections::HashSet;

fn in_class(mut record: CanonicalRecord, class: &str) -> CanonicalRecord {
    record.registration_class = class.to_string();
    record
}

#[test]
fn test_union_of_buckets_is_deduplicated() {
    let engine = LookupEngine::new(vec![
        in_class(make_enrolment("1001", "Ann", "Mathematics", "3", "Mr Dube", "10"), "10A"),
        in_class(make_enrolment("1001", "Ann", "Maths", "3", "Mr Dube", "10"), "10A Maths"),
        in_class(make_enrolment("1002", "Bo", "Mathematics", "3", "Mr Dube", "10"), "10B"),
    ]);

    let outcome = engine.search("class:10", FieldHint::Auto, &SearchFilters::new());
    assert_eq!(outcome.identifiers(), vec!["1001", "1002"]);
    // First occurrence kept.
    assert_eq!(outcome.records()[0].registration_class, "10A");
}

#[test]
fn test_same_subject_on_two_lines_matches_browse() {
    let engine = LookupEngine::new(vec![
        make_enrolment("1001", "Ann", "Mathematics", "3", "Mr Dube", "10"),
        make_enrolment("1001", "Ann", "Mathematics", "4", "Ms Naidoo", "10"),
    ]);
    let outcome = engine.search("maths", FieldHint::Subject, &SearchFilters::new());
    let rows: Vec<_> = outcome
        .records()
        .iter()
        .map(|r| (r.line.as_str(), r.teacher.as_str()))
        .collect();
    assert_eq!(rows, vec![("3", "Mr Dube"), ("4", "Ms Naidoo")]);

    let browse = engine.search("", FieldHint::Auto, &SearchFilters::new());
    assert_eq!(browse.len(), outcome.len());
}

#[test]
fn test_alias_spellings_on_one_line_collapse() {
    let engine = LookupEngine::new(vec![
        make_enrolment("1001", "Ann", "Mathematics", "3", "Mr Dube", "10"),
        make_enrolment("1001", "Ann", "MATHS", "3", "Mr Dube", "10"),
    ]);
    let outcome = engine.search("maths", FieldHint::Subject, &SearchFilters::new());
    assert_eq!(outcome.len(), 1);
    assert_eq!(outcome.records()[0].subject, "Mathematics");
}

#[test]
fn test_different_subjects_of_one_student_are_kept() {
    let engine = LookupEngine::new(vec![
        make_enrolment("1001", "Ann", "Mathematics", "3", "Mr Dube", "10"),
        make_enrolment("1001", "Ann", "Physics", "2", "Mr Dube", "10"),
    ]);
    assert_eq!(search_ids(&engine, "dube", FieldHint::Auto), vec!["1001", "1001"]);
}

#[test]
fn test_duplicate_files_do_not_double_results() {
    let mut records = vec![
        make_enrolment("1001", "Ann", "Mathematics", "3", "Mr Dube", "10"),
        make_enrolment("1002", "Bo", "Mathematics", "3", "Mr Dube", "10"),
    ];
    records.extend(records.clone());
    let engine = LookupEngine::new(records);

    for (text, hint) in [
        ("dube", FieldHint::Auto),
        ("maths 3", FieldHint::SubjectLine),
        ("mat", FieldHint::Subject),
        ("100", FieldHint::Identifier),
    ] {
        let outcome = engine.search(text, hint, &SearchFilters::new());
        let keys: HashSet<_> = outcome.records().iter().map(|r| dedup_key(r)).collect();
        assert_eq!(keys.len(), outcome.len(), "{} ({})", text, hint);
        assert_eq!(outcome.len(), 2, "{} ({})", text, hint);
    }
}
