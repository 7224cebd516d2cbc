//! Worked examples of the lookup contract.

use super::common::{make_record, make_student, sample_enrolments, search_ids, search_ids_with};
use rollcall::{FieldHint, LookupEngine, SearchFilters};

#[test]
fn test_math_3_subject_line() {
    let engine = LookupEngine::new(vec![
        make_record("1001", "Mathematics", "3"),
        make_record("1002", "Mathematics", "3"),
    ]);
    assert_eq!(
        search_ids(&engine, "math 3", FieldHint::SubjectLine),
        vec!["1001", "1002"]
    );
}

#[test]
fn test_empty_dataset_never_fails() {
    let engine = LookupEngine::new(Vec::new());
    for hint in FieldHint::ALL {
        for text in ["1001", "class:10A", "maths 3", "ann"] {
            let outcome = engine.search(text, hint, &SearchFilters::new());
            assert!(outcome.is_empty(), "{} / {}", text, hint);
            assert!(!outcome.is_missing_grade());
        }
    }
}

#[test]
fn test_grade_filter_with_empty_query_browses() {
    let engine = LookupEngine::new(sample_enrolments());
    let filters = SearchFilters::new().grade("11");
    assert_eq!(
        search_ids_with(&engine, "", FieldHint::Auto, &filters),
        vec!["2001", "2002"]
    );
}

#[test]
fn test_class_prefix_selector() {
    let engine = LookupEngine::new(vec![
        make_student("1", "Ann", "10A"),
        make_student("2", "Bo", "11B"),
        make_student("3", "Cy", "10B"),
    ]);
    assert_eq!(search_ids(&engine, "class:10A", FieldHint::Auto), vec!["1"]);
    assert_eq!(search_ids(&engine, "class:10", FieldHint::Name), vec!["1", "3"]);
    assert_eq!(search_ids(&engine, "cls:11b", FieldHint::Subject), vec!["2"]);
}

#[test]
fn test_subject_alias_hits_canonical_bucket() {
    let engine = LookupEngine::new(sample_enrolments());
    let by_alias = search_ids(&engine, "IT", FieldHint::Subject);
    let by_name = search_ids(&engine, "Information Technology", FieldHint::Subject);
    assert_eq!(by_alias, vec!["1001"]);
    assert_eq!(by_alias, by_name);
}

#[test]
fn test_subject_line_precondition() {
    let engine = LookupEngine::new(sample_enrolments());
    assert!(engine
        .search("", FieldHint::SubjectLine, &SearchFilters::new())
        .is_missing_grade());
    // A non-empty query resolves without a grade.
    assert!(!engine
        .search("maths 3", FieldHint::SubjectLine, &SearchFilters::new())
        .is_missing_grade());
}

#[test]
fn test_unknown_hint_falls_back_to_auto() {
    let engine = LookupEngine::new(sample_enrolments());
    let hint = FieldHint::parse("teacher");
    assert_eq!(hint, FieldHint::Auto);
    assert_eq!(search_ids(&engine, "dube", hint), vec!["1001", "1002", "2002"]);
}

#[test]
fn test_class_with_irregular_spacing_matches_exactly() {
    let engine = LookupEngine::new(vec![
        make_student("1001", "Ann Lee", "10  A"),
        make_student("1002", "Bo Kim", "10 AB"),
    ]);
    assert_eq!(search_ids(&engine, "class:10 a", FieldHint::Auto), vec!["1001"]);
}
