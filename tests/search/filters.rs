//! Dropdown prefilters: exact-equality AND, applied before text matching.

use super::common::{make_enrolment, sample_enrolments, search_ids_with};
use rollcall::{FieldHint, LookupEngine, SearchFilters};

#[test]
fn test_subject_filter_browses_exact_subject() {
    let engine = LookupEngine::new(sample_enrolments());
    let filters = SearchFilters::new().subject("Mathematics");
    assert_eq!(
        search_ids_with(&engine, "", FieldHint::Auto, &filters),
        vec!["1001", "1002", "2002"]
    );
}

#[test]
fn test_filters_combine_with_and() {
    let engine = LookupEngine::new(sample_enrolments());
    let filters = SearchFilters::new().grade("10").subject("Mathematics").line("3");
    assert_eq!(
        search_ids_with(&engine, "", FieldHint::Name, &filters),
        vec!["1001", "1002"]
    );

    let none = SearchFilters::new().grade("12").subject("Mathematics");
    assert!(search_ids_with(&engine, "", FieldHint::Auto, &none).is_empty());
}

#[test]
fn test_line_filter_compares_trimmed_text() {
    let engine = LookupEngine::new(vec![
        make_enrolment("1", "Ann", "IT", " 2 ", "T", "10"),
        make_enrolment("2", "Bo", "IT", "12", "T", "10"),
    ]);
    let filters = SearchFilters::new().line("2");
    assert_eq!(search_ids_with(&engine, "", FieldHint::Auto, &filters), vec!["1"]);
}

#[test]
fn test_exact_key_outside_pool_is_not_returned() {
    let engine = LookupEngine::new(sample_enrolments());
    let filters = SearchFilters::new().grade("11");
    assert!(search_ids_with(&engine, "1001", FieldHint::Auto, &filters).is_empty());
}

#[test]
fn test_text_match_runs_inside_pool() {
    let engine = LookupEngine::new(sample_enrolments());
    let filters = SearchFilters::new().grade("10");
    assert_eq!(
        search_ids_with(&engine, "dube", FieldHint::Auto, &filters),
        vec!["1001", "1002"]
    );
}

#[test]
fn test_blank_dropdowns_are_unset() {
    let filters = SearchFilters::new().grade("  ").subject("").line("3");
    assert_eq!(filters.grade, None);
    assert_eq!(filters.subject, None);
    assert_eq!(filters.line.as_deref(), Some("3"));
}

#[test]
fn test_browse_all_returns_pool_unmodified() {
    let engine = LookupEngine::new(sample_enrolments());
    let all = engine.search("", FieldHint::Auto, &SearchFilters::new());
    assert_eq!(all.len(), engine.len());
}
