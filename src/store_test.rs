use super::*;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: RecordId,
    label: String,
}

impl Record for Row {
    fn id(&self) -> RecordId {
        self.id
    }
}

fn row(id: RecordId, label: &str) -> Row {
    Row { id, label: label.into() }
}

fn seeded(rows: Vec<Row>) -> MemoryStore<Row> {
    MemoryStore::new(rows, Latency::none())
}

// =============================================================
// Latency
// =============================================================

#[test]
fn latency_default_window_matches_simulated_network() {
    let latency = Latency::default();
    assert_eq!(latency.min_ms(), 200);
    assert_eq!(latency.max_ms(), 400);
}

#[test]
fn latency_sample_stays_in_window() {
    let latency = Latency::new(200, 400);
    for _ in 0..200 {
        let ms = latency.sample().as_millis();
        assert!((200..=400).contains(&ms), "sample {ms} outside window");
    }
}

#[test]
fn latency_reversed_window_is_normalised() {
    let latency = Latency::new(50, 10);
    assert_eq!(latency.min_ms(), 10);
    assert_eq!(latency.max_ms(), 50);
}

#[test]
fn latency_none_is_zero() {
    assert!(Latency::none().sample().is_zero());
}

#[tokio::test]
async fn latency_pause_waits_at_least_the_minimum() {
    let latency = Latency::new(30, 30);
    let start = Instant::now();
    latency.pause().await;
    assert!(start.elapsed() >= Duration::from_millis(30));
}

#[tokio::test]
async fn store_operations_are_delayed() {
    let store = MemoryStore::new(vec![row(1, "a")], Latency::new(25, 25));
    let start = Instant::now();
    let _ = store.get_all().await;
    assert!(start.elapsed() >= Duration::from_millis(25));
}

// =============================================================
// Reads
// =============================================================

#[tokio::test]
async fn get_all_preserves_seed_order() {
    let store = seeded(vec![row(3, "c"), row(1, "a"), row(2, "b")]);
    let ids: Vec<RecordId> = store.get_all().await.iter().map(Record::id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[tokio::test]
async fn get_by_id_missing_returns_none() {
    let store = seeded(vec![row(1, "a")]);
    assert!(store.get_by_id(99).await.is_none());
    assert_eq!(store.get_by_id(1).await, Some(row(1, "a")));
}

#[tokio::test]
async fn filter_returns_matching_rows() {
    let store = seeded(vec![row(1, "keep"), row(2, "drop"), row(3, "keep")]);
    let kept = store.filter(|r| r.label == "keep").await;
    assert_eq!(kept, vec![row(1, "keep"), row(3, "keep")]);
}

#[tokio::test]
async fn returned_records_are_independent_copies() {
    let store = seeded(vec![row(1, "original")]);
    let mut copy = store.get_by_id(1).await.unwrap();
    copy.label = "mutated".into();
    assert_eq!(store.get_by_id(1).await.unwrap().label, "original");
}

// =============================================================
// Create
// =============================================================

#[tokio::test]
async fn create_after_one_and_two_yields_three() {
    let store = seeded(vec![row(1, "a"), row(2, "b")]);
    let created = store.create(|id| row(id, "c")).await;
    assert_eq!(created.id, 3);
    assert_eq!(store.get_all().await.len(), 3);
}

#[tokio::test]
async fn create_on_empty_store_starts_at_one() {
    let store = seeded(vec![]);
    assert_eq!(store.create(|id| row(id, "first")).await.id, 1);
}

#[tokio::test]
async fn create_uses_max_not_count() {
    let store = seeded(vec![row(7, "a"), row(2, "b")]);
    assert_eq!(store.create(|id| row(id, "c")).await.id, 8);
}

#[tokio::test]
async fn created_ids_strictly_increase() {
    let store = seeded(vec![row(4, "a")]);
    let mut previous = 4;
    for _ in 0..10 {
        let created = store.create(|id| row(id, "n")).await;
        assert!(created.id > previous);
        previous = created.id;
    }
}

#[tokio::test]
async fn create_appends_at_end() {
    let store = seeded(vec![row(5, "a"), row(1, "b")]);
    store.create(|id| row(id, "c")).await;
    let all = store.get_all().await;
    assert_eq!(all.last().unwrap(), &row(6, "c"));
}

// =============================================================
// Update / delete
// =============================================================

#[tokio::test]
async fn update_applies_change_and_returns_copy() {
    let store = seeded(vec![row(1, "a")]);
    let updated = store.update(1, |r| r.label = "z".into()).await.unwrap();
    assert_eq!(updated, row(1, "z"));
    assert_eq!(store.get_by_id(1).await.unwrap().label, "z");
}

#[tokio::test]
async fn update_missing_is_not_found_and_store_unchanged() {
    let store = seeded(vec![row(1, "a"), row(2, "b")]);
    let before = store.get_all().await;
    let err = store.update(9, |r| r.label = "z".into()).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound(9));
    assert_eq!(store.get_all().await, before);
}

#[tokio::test]
async fn delete_removes_and_keeps_order() {
    let store = seeded(vec![row(1, "a"), row(2, "b"), row(3, "c")]);
    store.delete(2).await.unwrap();
    assert_eq!(store.get_all().await, vec![row(1, "a"), row(3, "c")]);
}

#[tokio::test]
async fn delete_missing_is_not_found_and_store_unchanged() {
    let store = seeded(vec![row(1, "a")]);
    assert_eq!(store.delete(5).await.unwrap_err(), StoreError::NotFound(5));
    assert_eq!(store.get_all().await, vec![row(1, "first")]);
}

#[tokio::test]
async fn clones_share_state() {
    let store = seeded(vec![]);
    let other = store.clone();
    other.create(|id| row(id, "shared")).await;
    assert_eq!(store.get_all().await.len(), 1);
}

#[test]
fn fixed_clock_is_stable() {
    let at = time::macros::datetime!(2024-03-01 12:00 UTC);
    let clock = FixedClock(at);
    assert_eq!(clock.now(), at);
    assert_eq!(clock.now(), clock.now());
}
