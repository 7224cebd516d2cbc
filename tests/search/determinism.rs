//! Same records, same queries, same answers: content and order.

use super::common::{sample_enrolments, subjects};
use rollcall::{build_indexes, FieldHint, LookupEngine, SearchFilters};

const QUERIES: &[(&str, FieldHint)] = &[
    ("1001", FieldHint::Auto),
    ("dube", FieldHint::Auto),
    ("maths 3", FieldHint::SubjectLine),
    ("mat", FieldHint::Subject),
    ("life 1", FieldHint::Auto),
    ("ann", FieldHint::Name),
    ("", FieldHint::Auto),
];

#[test]
fn test_rebuilt_engines_agree() {
    let first = LookupEngine::new(sample_enrolments());
    let second = LookupEngine::new(sample_enrolments());

    for &(text, hint) in QUERIES {
        let a = first.search(text, hint, &SearchFilters::new());
        let b = second.search(text, hint, &SearchFilters::new());
        assert_eq!(a.identifiers(), b.identifiers(), "{} ({})", text, hint);
        assert_eq!(subjects(a.records()), subjects(b.records()), "{} ({})", text, hint);
    }
}

#[test]
fn test_cached_answer_matches_fresh_answer() {
    let engine = LookupEngine::new(sample_enrolments());
    for &(text, hint) in QUERIES {
        let cold = engine.search(text, hint, &SearchFilters::new());
        let warm = engine.search(text, hint, &SearchFilters::new());
        assert_eq!(cold, warm, "{} ({})", text, hint);
    }
}

#[test]
fn test_index_rebuild_is_idempotent() {
    let records = sample_enrolments();
    assert_eq!(build_indexes(&records), build_indexes(&records));
}

#[test]
fn test_reload_with_same_records_is_invisible() {
    let mut engine = LookupEngine::new(sample_enrolments());
    let before: Vec<Vec<String>> = QUERIES
        .iter()
        .map(|&(text, hint)| subjects(engine.search(text, hint, &SearchFilters::new()).records()))
        .collect();

    engine.reload(sample_enrolments());
    let after: Vec<Vec<String>> = QUERIES
        .iter()
        .map(|&(text, hint)| subjects(engine.search(text, hint, &SearchFilters::new()).records()))
        .collect();
    assert_eq!(before, after);
}
