//! Time-expiring in-memory cache used for read-through lookups.
//!
//! Each entry expires a fixed time after it was written (`time_to_live`) or
//! after it has gone unread for `max_idle`, whichever comes first. Expired
//! entries are never returned; they are dropped lazily on access and in bulk
//! by [`start_eviction_sweeper`].
//!
//! The cache is not a source of truth and never stores absence.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::lesson_plan::LessonPlan;
use crate::types::DbId;

/// Default time-to-live and idle timeout for cached lesson plans.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Default interval between background eviction sweeps.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Expiry settings for a [`TtlCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum age of an entry, measured from its last write.
    pub time_to_live: Duration,
    /// Maximum time an entry may go unread.
    pub max_idle: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            time_to_live: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            max_idle: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

struct Entry<V> {
    value: V,
    written_at: Instant,
    last_read_at: Instant,
}

impl<V> Entry<V> {
    fn is_expired(&self, config: &CacheConfig, now: Instant) -> bool {
        now.duration_since(self.written_at) >= config.time_to_live
            || now.duration_since(self.last_read_at) >= config.max_idle
    }
}

/// Concurrent key/value cache with per-entry TTL and idle expiry.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across request handlers.
pub struct TtlCache<K, V> {
    config: CacheConfig,
    entries: RwLock<HashMap<K, Entry<V>>>,
}

/// Cache of fully hydrated lesson plans keyed by plan id.
pub type LessonPlanCache = TtlCache<DbId, LessonPlan>;

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> CacheConfig {
        self.config
    }

    /// Return a live entry and mark it as read.
    ///
    /// An expired entry is removed and reported as absent.
    pub async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        match entries.get_mut(key) {
            None => return None,
            Some(entry) if !entry.is_expired(&self.config, now) => {
                entry.last_read_at = now;
                return Some(entry.value.clone());
            }
            Some(_) => {}
        }
        entries.remove(key);
        None
    }

    /// Insert or overwrite an entry, restarting both expiry clocks.
    pub async fn put(&self, key: K, value: V) {
        let now = Instant::now();
        self.entries.write().await.insert(
            key,
            Entry {
                value,
                written_at: now,
                last_read_at: now,
            },
        );
    }

    /// Remove an entry. Returns `true` if a live entry was present.
    pub async fn remove(&self, key: &K) -> bool {
        let now = Instant::now();
        self.entries
            .write()
            .await
            .remove(key)
            .is_some_and(|entry| !entry.is_expired(&self.config, now))
    }

    /// Drop every expired entry. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(&self.config, now));
        before - entries.len()
    }

    /// Number of stored entries, including ones that have expired but not
    /// yet been purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

/// Spawn a background task that periodically purges expired entries.
///
/// Runs until aborted through the returned handle, which happens during
/// shutdown.
pub fn start_eviction_sweeper<K, V>(
    cache: Arc<TtlCache<K, V>>,
    interval: Duration,
) -> tokio::task::JoinHandle<()>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let evicted = cache.purge_expired().await;
            if evicted > 0 {
                tracing::debug!(evicted, "Evicted expired cache entries");
            }
        }
    })
}
