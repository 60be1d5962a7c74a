//! Integration tests for the credit listing: cache, query view and status presentation together.

mod fixtures;

use credit_desk::{
    can_analyze, records_from, CacheConfig, InMemoryStore, QueryState, QueryView, Record,
    RecordCache, SortDirection, StatusCode, StatusResolver, UserRole,
};
use fixtures::{first_batch, second_batch};
use serde_json::json;
use std::sync::{Arc, Mutex};

fn ids(records: &[Record]) -> Vec<i64> {
    records
        .iter()
        .filter_map(|r| r.get("id").and_then(|v| v.as_i64()))
        .collect()
}

#[test]
fn filter_then_present_status() {
    let cache = RecordCache::new();
    cache.add_many(records_from(json!([
        { "id": 1, "status": "EM_ANALISE" },
        { "id": 2, "status": "Aprovado" }
    ])));

    let view = QueryView::default();
    let result = view.apply(&cache.snapshot(), &QueryState::filtered("aprov"));
    assert_eq!(ids(&result.items), vec![2]);

    let resolver = StatusResolver::new();
    let raw = resolver.resolve(&result.items[0]);
    assert_eq!(raw, "Aprovado");

    let code = resolver.normalize(&raw);
    assert_eq!(code, StatusCode::Aprovado);
    assert_eq!(resolver.label(code), "Aprovado");
    assert_eq!(resolver.display_class(code), "status-aprovado");
}

#[test]
fn overlapping_pages_accumulate_distinct_credits() {
    let cache = RecordCache::new();
    assert_eq!(cache.add_many(first_batch()), 3);
    assert_eq!(cache.add_many(second_batch()), 2);

    let records = cache.snapshot();
    assert_eq!(ids(&records), vec![1, 2, 3, 4, 5]);

    // The first copy of credit 2 wins.
    let resolver = StatusResolver::new();
    assert_eq!(resolver.status_of(&records[1]), StatusCode::Aprovado);
}

#[test]
fn statuses_resolve_across_payload_shapes() {
    let cache = RecordCache::new();
    cache.add_many(first_batch());
    cache.add_many(second_batch());

    let resolver = StatusResolver::new();
    let codes: Vec<StatusCode> = cache
        .snapshot()
        .iter()
        .map(|record| resolver.status_of(record))
        .collect();

    assert_eq!(
        codes,
        vec![
            StatusCode::EmAnalise,
            StatusCode::Aprovado,
            StatusCode::Reprovado,
            StatusCode::Constituido,
            StatusCode::EmAnalise,
        ]
    );
}

#[test]
fn default_listing_is_newest_first() {
    let cache = RecordCache::new();
    cache.add_many(first_batch());
    cache.add_many(second_batch());

    let result = QueryView::default().apply(&cache.snapshot(), &QueryState::default());
    assert_eq!(ids(&result.items), vec![3, 1, 5, 2, 4]);
    assert_eq!(result.total_count, 5);
    assert_eq!(result.total_pages, 1);
}

#[test]
fn filtered_pages() {
    let cache = RecordCache::new();
    cache.add_many(first_batch());
    cache.add_many(second_batch());
    let view = QueryView::default();

    let mut state = QueryState {
        page_size: 2,
        ..QueryState::filtered("issqn")
    };
    state.toggle_sort("numeroCredito");
    state.toggle_sort("numeroCredito");
    assert_eq!(state.sort_direction, SortDirection::Ascending);

    let first = view.apply(&cache.snapshot(), &state);
    assert_eq!(first.total_count, 3);
    assert_eq!(first.total_pages, 2);
    assert_eq!(ids(&first.items), vec![1, 5]);

    assert!(state.go_to_page(1, first.total_pages));
    let second = view.apply(&cache.snapshot(), &state);
    assert_eq!(ids(&second.items), vec![3]);

    state.page = 9;
    let beyond = view.apply(&cache.snapshot(), &state);
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total_count, 3);
    assert_eq!(beyond.total_pages, 2);
}

#[test]
fn sort_by_tax_value_mixes_numbers_and_numeric_text() {
    let cache = RecordCache::new();
    cache.add_many(first_batch());
    cache.add_many(second_batch());

    let state = QueryState {
        sort_field: "valorIssqn".into(),
        sort_direction: SortDirection::Ascending,
        ..QueryState::default()
    };
    let result = QueryView::default().apply(&cache.snapshot(), &state);
    assert_eq!(ids(&result.items), vec![4, 3, 2, 5, 1]);
}

#[test]
fn cache_survives_restart_through_store() {
    let store = InMemoryStore::new();
    {
        let cache = RecordCache::with_store(CacheConfig::default(), store.clone());
        cache.add_many(first_batch());
        cache.add_many(second_batch());
    }

    let restored = RecordCache::with_store(CacheConfig::default(), store);
    assert_eq!(ids(&restored.snapshot()), vec![1, 2, 3, 4, 5]);
}

#[test]
fn screen_follows_cache_changes() {
    let cache = RecordCache::new();
    let view = QueryView::default();
    let rendered = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&rendered);
    cache.subscribe(move |snapshot| {
        let page = view.apply(snapshot, &QueryState::filtered("issqn"));
        sink.lock().unwrap().push(page.total_count);
    });

    cache.add_many(first_batch());
    cache.add_many(first_batch());
    cache.add_many(second_batch());
    cache.clear();

    assert_eq!(*rendered.lock().unwrap(), vec![0, 2, 3, 0]);
}

#[test]
fn only_pending_credits_are_offered_for_analysis() {
    let cache = RecordCache::new();
    cache.add_many(first_batch());
    cache.add_many(second_batch());
    let resolver = StatusResolver::new();

    let analysable: Vec<i64> = cache
        .snapshot()
        .iter()
        .filter(|record| can_analyze(UserRole::AdminFull, &resolver.resolve(*record)))
        .filter_map(|record| record["id"].as_i64())
        .collect();
    assert_eq!(analysable, vec![1, 5]);

    let none = cache
        .snapshot()
        .iter()
        .any(|record| can_analyze(UserRole::AdminConsulta, &resolver.resolve(record)));
    assert!(!none);
}
