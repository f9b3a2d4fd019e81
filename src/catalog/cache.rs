//! Single-flight snapshot cache
//!
//! The cache owns one [`CatalogSource`] and memoizes its full listing. The
//! first caller to find the cache empty performs the fetch while holding the
//! slot lock; callers arriving during that fetch wait on the lock and then
//! read the stored snapshot, so overlapping calls cost one round-trip.

use crate::catalog::{CatalogSource, Entity, FetchOutcome};
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// An immutable listing taken from a source at one point in time
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Entities in source order
    pub entities: Vec<Entity>,

    /// Pages loaded to build this snapshot
    pub batches: usize,

    /// True when pagination stopped on an error
    pub possibly_incomplete: bool,

    /// When the fetch completed
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(outcome: FetchOutcome) -> Self {
        Self {
            entities: outcome.entities,
            batches: outcome.batches,
            possibly_incomplete: outcome.possibly_incomplete,
            fetched_at: Utc::now(),
        }
    }

    /// How long ago the snapshot was taken
    pub fn age(&self) -> Duration {
        Utc::now() - self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Memoizes the listing of a [`CatalogSource`] for the lifetime of the cache
///
/// Construct one per process or per request and share it by reference (or
/// `Arc`). Dropping the cache, or calling [`CatalogCache::invalidate`], ends
/// the snapshot's lifetime.
pub struct CatalogCache<S> {
    source: S,
    slot: Mutex<Option<Arc<Snapshot>>>,
    fetches: AtomicUsize,
}

impl<S: CatalogSource> CatalogCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            slot: Mutex::new(None),
            fetches: AtomicUsize::new(0),
        }
    }

    /// The underlying source, for direct lookups that bypass the snapshot
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the cached snapshot, fetching it on first use
    ///
    /// Concurrent callers issued before the first fetch lands all receive
    /// the same `Arc` and only one fetch reaches the source.
    pub async fn get_all(&self) -> Arc<Snapshot> {
        let mut slot = self.slot.lock().await;

        if let Some(snapshot) = slot.as_ref() {
            tracing::debug!(
                "Serving {} cached entities (age {}s)",
                snapshot.len(),
                snapshot.age().num_seconds()
            );
            return Arc::clone(snapshot);
        }

        tracing::debug!("Cache empty, fetching catalog");
        let outcome = self.source.fetch_all().await;
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let snapshot = Arc::new(Snapshot::new(outcome));
        if snapshot.possibly_incomplete {
            tracing::warn!(
                "Cached catalog is possibly incomplete ({} entities)",
                snapshot.len()
            );
        }
        *slot = Some(Arc::clone(&snapshot));
        snapshot
    }

    /// Drops the cached snapshot so the next [`get_all`](Self::get_all)
    /// refetches
    ///
    /// An invalidation issued during a fetch waits for that fetch to finish
    /// and then clears its result.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        if slot.take().is_some() {
            tracing::debug!("Catalog cache invalidated");
        }
    }

    /// Whether a snapshot is currently stored
    pub async fn is_cached(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    /// Number of fetches that reached the source
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}
