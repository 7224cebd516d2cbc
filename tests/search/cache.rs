//! Result cache behavior as seen through the engine.

use super::common::{make_record, sample_enrolments, search_ids};
use rollcall::{cache_key, FieldHint, LookupEngine, ResultCache, SearchFilters};

#[test]
fn test_fifty_one_keys_evict_the_first() {
    let mut cache = ResultCache::default();
    let keys: Vec<String> = (0..51)
        .map(|i| cache_key(&format!("student {}", i), FieldHint::Auto, &SearchFilters::new()))
        .collect();
    for key in &keys {
        cache.put(key.clone(), vec![]);
    }
    assert!(cache.get(&keys[0]).is_none());
    assert!(cache.get(&keys[50]).is_some());
}

#[test]
fn test_reaccess_prevents_eviction() {
    let mut cache = ResultCache::default();
    for i in 0..50 {
        cache.put(format!("k{}", i), vec![i]);
    }
    assert_eq!(cache.get("k0"), Some(&[0][..]));
    cache.put("k50".to_string(), vec![50]);
    assert!(cache.get("k0").is_some());
    assert!(cache.get("k1").is_none());
}

#[test]
fn test_engine_cache_is_bounded() {
    let engine = LookupEngine::with_capacity(sample_enrolments(), 2);
    for text in ["ann", "bo", "cy"] {
        engine.search(text, FieldHint::Name, &SearchFilters::new());
    }
    assert_eq!(engine.cached_queries(), 2);
}

#[test]
fn test_hint_is_part_of_the_key() {
    let engine = LookupEngine::new(vec![make_record("10", "Class Ten", "1")]);
    assert_eq!(search_ids(&engine, "10", FieldHint::Identifier), vec!["10"]);
    assert!(search_ids(&engine, "10", FieldHint::Subject).is_empty());
    assert_eq!(engine.cached_queries(), 2);
}

#[test]
fn test_reload_drops_stale_results() {
    let mut engine = LookupEngine::new(sample_enrolments());
    assert_eq!(search_ids(&engine, "1001", FieldHint::Auto), vec!["1001"]);

    engine.reload(vec![make_record("1001", "Physics", "2")]);
    assert_eq!(engine.cached_queries(), 0);
    let outcome = engine.search("1001", FieldHint::Auto, &SearchFilters::new());
    assert_eq!(outcome.records()[0].subject, "Physics");
}
