//! Tier order: exact key → exact bucket → prefix → substring, first hit wins.

use super::common::{make_enrolment, make_record, make_student, sample_enrolments, search_ids};
use rollcall::{parse_query, FieldHint, LookupEngine, MatchTier, SearchFilters};

fn tier_of(engine: &LookupEngine, text: &str, hint: FieldHint) -> Option<MatchTier> {
    engine
        .resolve(&parse_query(text, hint), &SearchFilters::new())
        .tier
}

// ============================================================================
// TIER 1: EXACT KEY
// ============================================================================

#[test]
fn test_exact_identifier_hides_substring_matches() {
    let engine = LookupEngine::new(vec![
        make_record("1001", "IT", "1"),
        make_record("11001", "IT", "1"),
    ]);
    assert_eq!(search_ids(&engine, "1001", FieldHint::Auto), vec!["1001"]);
    assert_eq!(tier_of(&engine, "1001", FieldHint::Auto), Some(MatchTier::ExactKey));
}

#[test]
fn test_identifier_field_falls_back_to_substring() {
    let engine = LookupEngine::new(vec![
        make_record("1001", "IT", "1"),
        make_record("11001", "IT", "1"),
    ]);
    assert_eq!(search_ids(&engine, "100", FieldHint::Identifier), vec!["1001", "11001"]);
    assert_eq!(tier_of(&engine, "100", FieldHint::Identifier), Some(MatchTier::Substring));
}

#[test]
fn test_exact_identifier_ignores_case() {
    let engine = LookupEngine::new(vec![make_student("AB12", "Ann", "10A")]);
    assert_eq!(search_ids(&engine, "ab12", FieldHint::Identifier), vec!["AB12"]);
}

#[test]
fn test_non_digit_auto_query_skips_exact_key() {
    let engine = LookupEngine::new(vec![
        make_student("ann", "Someone Else", "10A"),
        make_student("7", "Ann Lee", "10A"),
    ]);
    // Substring over identifier and name, not the identifier index.
    assert_eq!(search_ids(&engine, "ann", FieldHint::Auto), vec!["ann", "7"]);
}

// ============================================================================
// TIER 2: EXACT BUCKET
// ============================================================================

#[test]
fn test_exact_class_bucket_beats_substring() {
    let engine = LookupEngine::new(vec![
        make_student("1", "Ann", "10A"),
        make_student("2", "Bo", "10AB"),
    ]);
    assert_eq!(search_ids(&engine, "10a", FieldHint::Class), vec!["1"]);
    assert_eq!(tier_of(&engine, "10a", FieldHint::Class), Some(MatchTier::ExactBucket));
}

#[test]
fn test_auto_prefers_class_bucket() {
    let engine = LookupEngine::new(vec![
        make_student("1", "Ann Lee", "10A"),
        make_student("2", "Bo Kim", "10A"),
        make_student("3", "Cy 10a Fan", "11B"),
    ]);
    assert_eq!(search_ids(&engine, "10A", FieldHint::Auto), vec!["1", "2"]);
}

#[test]
fn test_subject_without_line_returns_every_line() {
    let engine = LookupEngine::new(sample_enrolments());
    assert_eq!(
        search_ids(&engine, "Mathematics", FieldHint::Subject),
        vec!["1001", "1002", "2002"]
    );
    // Visual Arts only has the "no line" bucket.
    assert_eq!(search_ids(&engine, "va", FieldHint::Subject), vec!["3001"]);
}

// ============================================================================
// TIER 3: PREFIX
// ============================================================================

#[test]
fn test_subject_prefix_when_no_exact_key() {
    let engine = LookupEngine::new(vec![
        make_record("1", "Mathematics", "1"),
        make_record("2", "Mathematical Literacy", "1"),
        make_record("3", "Music", "1"),
    ]);
    assert_eq!(search_ids(&engine, "math", FieldHint::Subject), vec!["1"]);
    assert_eq!(search_ids(&engine, "mathe", FieldHint::Subject), vec!["1", "2"]);
    assert_eq!(tier_of(&engine, "mathe", FieldHint::Subject), Some(MatchTier::Prefix));
}

#[test]
fn test_auto_compound_uses_prefix() {
    let engine = LookupEngine::new(sample_enrolments());
    assert_eq!(search_ids(&engine, "life 1", FieldHint::Auto), vec!["2001"]);
    assert_eq!(tier_of(&engine, "life 1", FieldHint::Auto), Some(MatchTier::Prefix));
}

// ============================================================================
// TIER 4: SUBSTRING
// ============================================================================

#[test]
fn test_subject_substring_over_keys() {
    let engine = LookupEngine::new(vec![
        make_record("1", "Mathematics", "1"),
        make_record("2", "Mathematical Literacy", "1"),
    ]);
    assert_eq!(search_ids(&engine, "lit", FieldHint::Subject), vec!["2"]);
    assert_eq!(tier_of(&engine, "lit", FieldHint::Subject), Some(MatchTier::Substring));
}

#[test]
fn test_auto_compound_containment() {
    let engine = LookupEngine::new(sample_enrolments());
    assert_eq!(search_ids(&engine, "sciences 1", FieldHint::Auto), vec!["2001"]);
    assert_eq!(tier_of(&engine, "sciences 1", FieldHint::Auto), Some(MatchTier::Substring));
}

#[test]
fn test_auto_substring_covers_teacher_and_line() {
    let engine = LookupEngine::new(sample_enrolments());
    assert_eq!(search_ids(&engine, "botha", FieldHint::Auto), vec!["1001"]);
    assert_eq!(search_ids(&engine, "PILLAY", FieldHint::Auto), vec!["1003"]);
}

#[test]
fn test_name_field_only_reads_names() {
    let engine = LookupEngine::new(vec![make_enrolment(
        "1", "Ann Lee", "Annual Studies", "1", "Mr Annan", "10",
    )]);
    assert!(search_ids(&engine, "annual", FieldHint::Name).is_empty());
    assert_eq!(search_ids(&engine, "lee", FieldHint::Name), vec!["1"]);
}

#[test]
fn test_no_tier_matches() {
    let engine = LookupEngine::new(sample_enrolments());
    assert!(search_ids(&engine, "zzz", FieldHint::Auto).is_empty());
    assert_eq!(tier_of(&engine, "zzz", FieldHint::Auto), None);
}
