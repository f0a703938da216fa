//! EventStore interface tests.
//!
//! These tests verify the fetch / persist contract of the EventStore trait.
//! Each blob backend runs them through a `BlobEventStore`.

#![allow(dead_code)]

use serde_json::json;
use uuid::Uuid;

use eventz_store::storage::EventStore;
use eventz_store::Event;

/// Create a test event with a numbered payload.
pub fn make_event(n: u32, event_type: &str) -> Event {
    Event::new(event_type, json!({ "n": n, "tag": format!("{}-{}", event_type, n) }))
}

/// Create multiple sequential events.
pub fn make_events(count: u32) -> Vec<Event> {
    (0..count)
        .map(|i| make_event(i, &format!("Event{}", i)))
        .collect()
}

/// Unique aggregate id so shared backends don't collide across tests.
pub fn aggregate_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

// =============================================================================
// EventStore::persist / fetch tests
// =============================================================================

pub async fn test_round_trip<S: EventStore + ?Sized>(store: &S) {
    let id = aggregate_id("test_round_trip");
    let events = make_events(5);

    store.persist(&id, &events).await.expect("persist should succeed");

    let fetched = store.fetch(&id).await.expect("fetch should succeed");
    assert_eq!(fetched, events, "fetched sequence should equal persisted");
}

pub async fn test_round_trip_empty<S: EventStore + ?Sized>(store: &S) {
    let id = aggregate_id("test_round_trip_empty");

    store.persist(&id, &[]).await.expect("persist should succeed");

    let fetched = store.fetch(&id).await.expect("fetch should succeed");
    assert!(fetched.is_empty(), "empty sequence should round-trip");
}

pub async fn test_fetch_before_persist<S: EventStore + ?Sized>(store: &S) {
    let id = aggregate_id("test_fetch_before_persist");

    let fetched = store.fetch(&id).await.expect("fetch should not error");
    assert!(fetched.is_empty(), "unknown aggregate should be empty");
}

pub async fn test_overwrite<S: EventStore + ?Sized>(store: &S) {
    let id = aggregate_id("test_overwrite");
    let first = make_events(3);
    let second = vec![make_event(99, "Replaced")];

    store.persist(&id, &first).await.expect("persist should succeed");
    store.persist(&id, &second).await.expect("persist should succeed");

    let fetched = store.fetch(&id).await.expect("fetch should succeed");
    assert_eq!(fetched, second, "second persist should replace, not merge");
}

pub async fn test_overwrite_with_empty<S: EventStore + ?Sized>(store: &S) {
    let id = aggregate_id("test_overwrite_with_empty");

    store.persist(&id, &make_events(2)).await.expect("persist should succeed");
    store.persist(&id, &[]).await.expect("persist should succeed");

    let fetched = store.fetch(&id).await.expect("fetch should succeed");
    assert!(fetched.is_empty(), "empty persist should clear the sequence");
}

pub async fn test_isolation_across_keys<S: EventStore + ?Sized>(store: &S) {
    let id1 = aggregate_id("test_isolation_a");
    let id2 = aggregate_id("test_isolation_b");
    let events2 = make_events(2);

    store.persist(&id2, &events2).await.expect("persist should succeed");
    store.persist(&id1, &make_events(4)).await.expect("persist should succeed");

    let fetched = store.fetch(&id2).await.expect("fetch should succeed");
    assert_eq!(fetched, events2, "writing id1 must not affect id2");
}

pub async fn test_preserves_order<S: EventStore + ?Sized>(store: &S) {
    let id = aggregate_id("test_preserves_order");
    let events = make_events(20);

    store.persist(&id, &events).await.expect("persist should succeed");

    let fetched = store.fetch(&id).await.expect("fetch should succeed");
    for (i, event) in fetched.iter().enumerate() {
        assert_eq!(event.event_type, format!("Event{}", i));
        assert_eq!(event.payload["n"], i as u32);
    }
}

pub async fn test_created_and_renamed<S: EventStore + ?Sized>(store: &S) {
    let id = aggregate_id("agg-1");
    let other = aggregate_id("agg-2");
    let events = vec![
        Event::new("Created", json!({"name": "x"})),
        Event::new("Renamed", json!({"name": "y"})),
    ];

    store.persist(&id, &events).await.expect("persist should succeed");

    let fetched = store.fetch(&id).await.expect("fetch should succeed");
    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[0].event_type, "Created");
    assert_eq!(fetched[0].payload, json!({"name": "x"}));
    assert_eq!(fetched[1].event_type, "Renamed");
    assert_eq!(fetched[1].payload, json!({"name": "y"}));

    let empty = store.fetch(&other).await.expect("fetch should succeed");
    assert!(empty.is_empty());
}

pub async fn test_key_with_path_characters<S: EventStore + ?Sized>(store: &S) {
    let id = format!("orders/{}/history:v1", Uuid::new_v4());
    let events = make_events(1);

    store.persist(&id, &events).await.expect("persist should succeed");

    let fetched = store.fetch(&id).await.expect("fetch should succeed");
    assert_eq!(fetched, events);
}

/// Ids from short to 1024 bytes, the longest key S3 accepts.
pub async fn test_long_aggregate_ids<S: EventStore + ?Sized>(store: &S) {
    for len in [110usize, 123, 255, 1024] {
        let prefix = aggregate_id("test_long");
        let id = format!("{}{}", prefix, "x".repeat(len - prefix.len()));
        assert_eq!(id.len(), len);

        let fetched = store.fetch(&id).await.expect("fetch should not error");
        assert!(fetched.is_empty(), "len={}: unknown aggregate should be empty", len);

        let events = make_events(2);
        store.persist(&id, &events).await.expect("persist should succeed");

        let fetched = store.fetch(&id).await.expect("fetch should succeed");
        assert_eq!(fetched, events, "len={}", len);
    }
}

pub async fn test_concurrent_distinct_aggregates<S: EventStore + ?Sized>(store: &S) {
    let ids: Vec<String> = (0..8)
        .map(|i| aggregate_id(&format!("test_concurrent_{}", i)))
        .collect();
    let sequences: Vec<Vec<Event>> = (0..8).map(|i| make_events(i + 1)).collect();

    futures::future::join_all(
        ids.iter()
            .zip(&sequences)
            .map(|(id, events)| store.persist(id, events)),
    )
    .await
    .into_iter()
    .for_each(|r| r.expect("persist should succeed"));

    for (id, events) in ids.iter().zip(&sequences) {
        let fetched = store.fetch(id).await.expect("fetch should succeed");
        assert_eq!(&fetched, events);
    }
}

// =============================================================================
// Test runner macro
// =============================================================================

/// Run all EventStore interface tests against a store implementation.
#[macro_export]
macro_rules! run_event_store_tests {
    ($store:expr) => {
        use $crate::storage::event_store_tests::*;

        test_round_trip($store).await;
        println!("  test_round_trip: PASSED");

        test_round_trip_empty($store).await;
        println!("  test_round_trip_empty: PASSED");

        test_fetch_before_persist($store).await;
        println!("  test_fetch_before_persist: PASSED");

        test_overwrite($store).await;
        println!("  test_overwrite: PASSED");

        test_overwrite_with_empty($store).await;
        println!("  test_overwrite_with_empty: PASSED");

        test_isolation_across_keys($store).await;
        println!("  test_isolation_across_keys: PASSED");

        test_preserves_order($store).await;
        println!("  test_preserves_order: PASSED");

        test_created_and_renamed($store).await;
        println!("  test_created_and_renamed: PASSED");

        test_key_with_path_characters($store).await;
        println!("  test_key_with_path_characters: PASSED");

        test_long_aggregate_ids($store).await;
        println!("  test_long_aggregate_ids: PASSED");

        test_concurrent_distinct_aggregates($store).await;
        println!("  test_concurrent_distinct_aggregates: PASSED");
    };
}
