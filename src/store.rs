//! In-memory record store with simulated network latency.
//!
//! DESIGN
//! ======
//! Every entity service sits on a `MemoryStore<T>`: an ordered `Vec<T>`
//! behind a `tokio::sync::RwLock`, seeded once at startup. Each operation
//! first sleeps for a jittered `Latency` sample, then takes the lock only
//! for the in-memory step. Records are handed out as clones so callers can
//! never mutate stored state by reference.
//!
//! Ids are assigned as `max(existing ids, 0) + 1` under the write lock, so
//! a created id is always strictly greater than every id present at the
//! time of the insert.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// Integer identity shared by every stored entity (`Id` on the wire).
pub type RecordId = i64;

// =============================================================================
// RECORD
// =============================================================================

/// A record that can live in a [`MemoryStore`].
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> RecordId;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("record not found: {0}")]
    NotFound(RecordId),
}

// =============================================================================
// CLOCK
// =============================================================================

/// Source of "now" for record timestamps. Injected so tests stay deterministic.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;
}

/// Wall-clock time in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Always returns the same instant.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

#[cfg(test)]
impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

// =============================================================================
// LATENCY
// =============================================================================

pub const DEFAULT_LATENCY_MIN_MS: u64 = 200;
pub const DEFAULT_LATENCY_MAX_MS: u64 = 400;

/// Artificial delay applied before every store operation resolves.
///
/// Each call samples uniformly from `min_ms..=max_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    min_ms: u64,
    max_ms: u64,
}

impl Latency {
    /// Build a latency window. A reversed window is normalised.
    #[must_use]
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self { min_ms: min_ms.min(max_ms), max_ms: min_ms.max(max_ms) }
    }

    /// No delay at all.
    #[must_use]
    pub const fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    #[must_use]
    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    #[must_use]
    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    /// Draw one delay from the window.
    #[must_use]
    pub fn sample(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        Duration::from_millis(rand::rng().random_range(self.min_ms..=self.max_ms))
    }

    /// Sleep for one sampled delay.
    pub async fn pause(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY_MIN_MS, DEFAULT_LATENCY_MAX_MS)
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Ordered, process-local record sequence. Cheap to clone; clones share state.
pub struct MemoryStore<T: Record> {
    records: Arc<RwLock<Vec<T>>>,
    latency: Latency,
}

impl<T: Record> Clone for MemoryStore<T> {
    fn clone(&self) -> Self {
        Self { records: Arc::clone(&self.records), latency: self.latency }
    }
}

impl<T: Record> MemoryStore<T> {
    #[must_use]
    pub fn new(seed: Vec<T>, latency: Latency) -> Self {
        Self { records: Arc::new(RwLock::new(seed)), latency }
    }

    /// All records in insertion order.
    pub async fn get_all(&self) -> Vec<T> {
        self.latency.pause().await;
        self.records.read().await.clone()
    }

    /// The record with `id`, if present.
    pub async fn get_by_id(&self, id: RecordId) -> Option<T> {
        self.latency.pause().await;
        self.records.read().await.iter().find(|r| r.id() == id).cloned()
    }

    /// All records matching `predicate`, in insertion order.
    pub async fn filter<P>(&self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        self.latency.pause().await;
        self.records
            .read()
            .await
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    /// Assign the next id, build the record from it, and append.
    ///
    /// The builder receives the assigned id so derived fields (share URLs,
    /// for example) can embed it.
    pub async fn create<F>(&self, build: F) -> T
    where
        F: FnOnce(RecordId) -> T,
    {
        self.latency.pause().await;
        let mut records = self.records.write().await;
        let id = next_id(&records);
        let record = build(id);
        records.push(record.clone());
        record
    }

    /// Apply `change` to the record with `id` and return the updated copy.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has `id`; the store is left untouched.
    pub async fn update<F>(&self, id: RecordId, change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut T),
    {
        self.latency.pause().await;
        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        change(record);
        Ok(record.clone())
    }

    /// Remove the record with `id`, preserving the order of the rest.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has `id`; the store is left untouched.
    pub async fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        self.latency.pause().await;
        let mut records = self.records.write().await;
        let index = records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        records.remove(index);
        Ok(())
    }
}

fn next_id<T: Record>(records: &[T]) -> RecordId {
    records.iter().map(Record::id).max().unwrap_or(0) + 1
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
