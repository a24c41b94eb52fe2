// ABOUTME: In-memory TTL namespace with passive expiry on read and a periodic active sweep
// ABOUTME: Tracks monotonically increasing hit and miss counters for cache status reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Comfort Index Contributors

use super::{CacheConfig, CacheKey, NamespaceStats};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};
use tokio::time::Instant;
use tracing::debug;

/// Furthest expiry an entry can get, for TTLs that would overflow the clock
const MAX_EXPIRY_SECS: u64 = 100 * 365 * 86_400;

/// In-memory cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            // Saturate instead of overflowing the clock
            expires_at: now
                .checked_add(ttl)
                .unwrap_or_else(|| now + Duration::from_secs(MAX_EXPIRY_SECS)),
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    fn remaining_ttl(&self) -> Option<Duration> {
        self.expires_at.checked_duration_since(Instant::now())
    }
}

type Store<V> = Arc<RwLock<HashMap<String, CacheEntry<V>>>>;

/// One cache namespace: TTL entries behind a single lock plus hit/miss counters
///
/// Every operation takes the store lock, so reads and writes on any key are
/// linearizable. Counters are bumped while the lock is held, keeping them
/// consistent with the lookups they describe. The store sits in an `Arc` because
/// the background sweep task needs shared ownership of it; the task stops when
/// the cache is dropped and its shutdown sender closes.
pub struct InMemoryCache<V> {
    store: Store<V>,
    hits: AtomicU64,
    misses: AtomicU64,
    ttl: Duration,
    _shutdown_tx: Option<mpsc::Sender<()>>,
}

impl<V> InMemoryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a namespace, spawning the sweep task when enabled
    ///
    /// The sweep task requires a running Tokio runtime.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let store: Store<V> = Arc::new(RwLock::new(HashMap::new()));

        let shutdown_tx = if config.enable_background_cleanup {
            let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
            let store_clone = Arc::clone(&store);
            let check_period = config.check_period;

            tokio::spawn(async move {
                let mut interval = tokio::time::interval(check_period);
                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            Self::remove_expired(&store_clone).await;
                        }
                        _ = shutdown_rx.recv() => {
                            debug!("Cache sweep task received shutdown signal");
                            break;
                        }
                    }
                }
            });

            Some(shutdown_tx)
        } else {
            None
        };

        Self {
            store,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            ttl: config.ttl,
            _shutdown_tx: shutdown_tx,
        }
    }

    async fn remove_expired(store: &Store<V>) -> usize {
        let mut store_guard = store.write().await;
        let before = store_guard.len();
        store_guard.retain(|_, entry| !entry.is_expired());
        let removed = before - store_guard.len();
        drop(store_guard);
        if removed > 0 {
            debug!("Swept {} expired cache entries", removed);
        }
        removed
    }

    /// Look up a live entry
    ///
    /// `None` means absent or expired; an expired entry is removed on the spot.
    pub async fn get(&self, key: &CacheKey) -> Option<V> {
        let key = key.to_string();
        let mut store = self.store.write().await;

        let value = match store.get(&key) {
            Some(entry) if !entry.is_expired() => Some(entry.value.clone()),
            Some(_) => {
                store.remove(&key);
                None
            }
            None => None,
        };

        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        drop(store);

        debug!(key = %key, hit = value.is_some(), "Cache lookup");
        value
    }

    /// Store `value`, replacing any entry under `key` and restarting its TTL
    pub async fn set(&self, key: &CacheKey, value: V) {
        let entry = CacheEntry::new(value, self.ttl);
        self.store.write().await.insert(key.to_string(), entry);
    }

    /// Remove one entry, returning whether a live entry was removed
    pub async fn remove(&self, key: &CacheKey) -> bool {
        self.store
            .write()
            .await
            .remove(&key.to_string())
            .is_some_and(|entry| !entry.is_expired())
    }

    /// Remaining lifetime of a live entry
    pub async fn ttl_remaining(&self, key: &CacheKey) -> Option<Duration> {
        let store = self.store.read().await;
        store
            .get(&key.to_string())
            .filter(|entry| !entry.is_expired())
            .and_then(CacheEntry::remaining_ttl)
    }

    /// Drop every entry; hit and miss counters are kept
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    /// Remove expired entries now, returning how many were removed
    pub async fn sweep_expired(&self) -> usize {
        Self::remove_expired(&self.store).await
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let store = self.store.read().await;
        store.values().filter(|entry| !entry.is_expired()).count()
    }

    /// Whether the namespace holds no live entries
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Configured TTL
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Snapshot of counters and live keys
    pub async fn stats(&self) -> NamespaceStats {
        let store = self.store.read().await;
        let mut keys: Vec<String> = store
            .iter()
            .filter(|(_, entry)| !entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        drop(store);

        keys.sort_unstable();
        NamespaceStats {
            hits,
            misses,
            keys_count: keys.len(),
            keys,
            ttl_seconds: self.ttl.as_secs(),
        }
    }
}
