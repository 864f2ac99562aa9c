//! Catalog loader with three-tier resolution.
//!
//! Order of operations for a load:
//! 1. in-memory cache (instant)
//! 2. persisted snapshot if within the TTL
//! 3. network fetch
//! 4. stale persisted snapshot when the fetch fails
//! 5. empty list when nothing is available
//!
//! The loader never surfaces an error to its caller: every failure is logged
//! and converted to the best available fallback value.

use crate::cache::{CatalogSnapshot, SnapshotStore};
use crate::config::CatalogConfig;
use crate::model::PluginRecord;
use crate::network::FetchCatalog;
use mini_moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const MEMORY_KEY: &str = "catalog";

/// Where the persisted snapshot stands relative to the TTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No snapshot stored.
    Absent,
    /// A refresh is in flight.
    Loading,
    /// Snapshot within the TTL.
    Fresh,
    /// Snapshot past the TTL; usable only as a fetch-failure fallback.
    Stale,
}

/// Callback invoked whenever the loader settles on a plugin list.
pub type OnUpdate<'a> = &'a (dyn Fn(&[PluginRecord]) + Send + Sync);

/// Loads the merged plugin list from cache or network.
pub struct CatalogLoader {
    /// In-memory tier, expiring on the same TTL as the snapshot.
    memory: Cache<String, Arc<Vec<PluginRecord>>>,
    store: Box<dyn SnapshotStore>,
    fetcher: Box<dyn FetchCatalog>,
    ttl: Duration,
    /// Serializes refreshes: overlapping loads issue a single fetch and the
    /// waiters pick up the refreshed memory value.
    fetch_lock: Mutex<()>,
}

impl CatalogLoader {
    pub fn new(store: Box<dyn SnapshotStore>, fetcher: Box<dyn FetchCatalog>) -> Self {
        Self::with_ttl(store, fetcher, CatalogConfig::CACHE_TTL)
    }

    pub fn with_ttl(
        store: Box<dyn SnapshotStore>,
        fetcher: Box<dyn FetchCatalog>,
        ttl: Duration,
    ) -> Self {
        Self {
            memory: Cache::builder().time_to_live(ttl).max_capacity(2).build(),
            store,
            fetcher,
            ttl,
            fetch_lock: Mutex::new(()),
        }
    }

    /// Classify the persisted snapshot relative to the TTL.
    pub fn cache_state(&self) -> CacheState {
        if self.fetch_lock.try_lock().is_err() {
            return CacheState::Loading;
        }
        match self.store.load() {
            None => CacheState::Absent,
            Some(snapshot) if snapshot.is_fresh(self.ttl) => CacheState::Fresh,
            Some(_) => CacheState::Stale,
        }
    }

    /// Load the merged plugin list.
    ///
    /// `on_update` is invoked with whatever list the load settles on,
    /// including the empty list when every path failed. `force_refresh`
    /// bypasses both cache tiers.
    pub async fn load(
        &self,
        on_update: Option<OnUpdate<'_>>,
        force_refresh: bool,
    ) -> Vec<PluginRecord> {
        if !force_refresh {
            if let Some(plugins) = self.from_memory() {
                debug!("Catalog cache hit (memory)");
                return self.deliver(plugins, on_update);
            }
            if let Some(snapshot) = self.store.load() {
                if snapshot.is_fresh(self.ttl) {
                    debug!("Catalog cache hit (disk, age {:?})", snapshot.age());
                    let plugins = self.remember(snapshot.plugins);
                    return self.deliver(plugins, on_update);
                }
            }
        }

        let _guard = self.fetch_lock.lock().await;

        // A concurrent load may have refreshed while we waited on the lock.
        if !force_refresh {
            if let Some(plugins) = self.from_memory() {
                debug!("Catalog refreshed by a concurrent load");
                return self.deliver(plugins, on_update);
            }
        }

        match self.fetcher.fetch().await {
            Ok(plugins) => {
                let snapshot = CatalogSnapshot::now(plugins);
                if let Err(e) = self.store.save(&snapshot) {
                    warn!("Failed to persist catalog snapshot: {}", e);
                }
                let plugins = self.remember(snapshot.plugins);
                self.deliver(plugins, on_update)
            }
            Err(e) => {
                warn!("Catalog fetch failed: {}", e);
                if let Some(snapshot) = self.store.load() {
                    warn!("Serving stale catalog snapshot (age {:?})", snapshot.age());
                    let plugins = self.remember(snapshot.plugins);
                    return self.deliver(plugins, on_update);
                }
                if let Some(cb) = on_update {
                    cb(&[]);
                }
                Vec::new()
            }
        }
    }

    /// Drop both cache tiers; the next load goes to the network.
    pub fn invalidate(&self) {
        self.memory.invalidate(&MEMORY_KEY.to_string());
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear catalog snapshot: {}", e);
        }
    }

    fn from_memory(&self) -> Option<Arc<Vec<PluginRecord>>> {
        self.memory.get(&MEMORY_KEY.to_string())
    }

    fn remember(&self, plugins: Vec<PluginRecord>) -> Arc<Vec<PluginRecord>> {
        let plugins = Arc::new(plugins);
        self.memory.insert(MEMORY_KEY.to_string(), plugins.clone());
        plugins
    }

    fn deliver(
        &self,
        plugins: Arc<Vec<PluginRecord>>,
        on_update: Option<OnUpdate<'_>>,
    ) -> Vec<PluginRecord> {
        if let Some(cb) = on_update {
            cb(&plugins);
        }
        (*plugins).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PlugdexError, Result};
    use crate::model::sample_record;
    use async_trait::async_trait;
    use chrono::{TimeDelta, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    struct StubFetcher {
        result: StdMutex<Result<Vec<PluginRecord>>>,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn ok(plugins: Vec<PluginRecord>) -> Self {
            Self {
                result: StdMutex::new(Ok(plugins)),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                result: StdMutex::new(Err(PlugdexError::Http {
                    status: 502,
                    url: "https://example.test/data.json".into(),
                })),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FetchCatalog for Arc<StubFetcher> {
        async fn fetch(&self) -> Result<Vec<PluginRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &*self.result.lock().unwrap() {
                Ok(plugins) => Ok(plugins.clone()),
                Err(_) => Err(PlugdexError::Http {
                    status: 502,
                    url: "https://example.test/data.json".into(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct MemStore {
        snapshot: StdMutex<Option<CatalogSnapshot>>,
    }

    impl MemStore {
        fn with_snapshot(snapshot: CatalogSnapshot) -> Self {
            Self {
                snapshot: StdMutex::new(Some(snapshot)),
            }
        }
    }

    impl SnapshotStore for MemStore {
        fn load(&self) -> Option<CatalogSnapshot> {
            self.snapshot.lock().unwrap().clone()
        }

        fn save(&self, snapshot: &CatalogSnapshot) -> Result<()> {
            *self.snapshot.lock().unwrap() = Some(snapshot.clone());
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            *self.snapshot.lock().unwrap() = None;
            Ok(())
        }
    }

    fn expired_snapshot(plugins: Vec<PluginRecord>) -> CatalogSnapshot {
        CatalogSnapshot {
            fetched_at: Utc::now() - TimeDelta::seconds(600),
            plugins,
        }
    }

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test]
    async fn test_fresh_snapshot_skips_network() {
        let fetcher = Arc::new(StubFetcher::ok(Vec::new()));
        let snapshot = CatalogSnapshot::now(vec![sample_record("org/pluginA")]);
        let loader = CatalogLoader::with_ttl(
            Box::new(MemStore::with_snapshot(snapshot.clone())),
            Box::new(fetcher.clone()),
            TTL,
        );

        let plugins = loader.load(None, false).await;

        assert_eq!(plugins, snapshot.plugins);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
        assert_eq!(loader.cache_state(), CacheState::Fresh);
    }

    #[tokio::test]
    async fn test_expired_snapshot_triggers_fetch() {
        let fresh = vec![sample_record("org/new")];
        let fetcher = Arc::new(StubFetcher::ok(fresh.clone()));
        let store = MemStore::with_snapshot(expired_snapshot(vec![sample_record("org/old")]));
        let loader = CatalogLoader::with_ttl(Box::new(store), Box::new(fetcher.clone()), TTL);

        assert_eq!(loader.cache_state(), CacheState::Stale);
        let plugins = loader.load(None, false).await;

        assert_eq!(plugins, fresh);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        // The refresh rewrote the snapshot.
        assert_eq!(loader.cache_state(), CacheState::Fresh);
    }

    #[tokio::test]
    async fn test_memory_short_circuits_second_load() {
        let fetcher = Arc::new(StubFetcher::ok(vec![sample_record("org/pluginA")]));
        let loader = CatalogLoader::with_ttl(
            Box::new(MemStore::default()),
            Box::new(fetcher.clone()),
            TTL,
        );

        loader.load(None, false).await;
        loader.load(None, false).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_force_refresh_bypasses_caches() {
        let fetcher = Arc::new(StubFetcher::ok(vec![sample_record("org/pluginA")]));
        let loader = CatalogLoader::with_ttl(
            Box::new(MemStore::default()),
            Box::new(fetcher.clone()),
            TTL,
        );

        loader.load(None, false).await;
        loader.load(None, true).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_stale_fallback_on_fetch_failure() {
        let stale = expired_snapshot(vec![sample_record("org/old")]);
        let loader = CatalogLoader::with_ttl(
            Box::new(MemStore::with_snapshot(stale.clone())),
            Box::new(Arc::new(StubFetcher::failing())),
            TTL,
        );

        let plugins = loader.load(None, false).await;
        assert_eq!(plugins, stale.plugins);
    }

    #[tokio::test]
    async fn test_empty_fallback_invokes_callback() {
        let loader = CatalogLoader::with_ttl(
            Box::new(MemStore::default()),
            Box::new(Arc::new(StubFetcher::failing())),
            TTL,
        );

        let seen = Arc::new(StdMutex::new(None));
        let seen_clone = seen.clone();
        let on_update = move |plugins: &[PluginRecord]| {
            *seen_clone.lock().unwrap() = Some(plugins.len());
        };

        let plugins = loader.load(Some(&on_update), false).await;

        assert!(plugins.is_empty());
        assert_eq!(*seen.lock().unwrap(), Some(0));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let fetcher = Arc::new(StubFetcher::ok(vec![sample_record("org/pluginA")]));
        let loader = CatalogLoader::with_ttl(
            Box::new(MemStore::default()),
            Box::new(fetcher.clone()),
            TTL,
        );

        loader.load(None, false).await;
        loader.invalidate();
        assert_eq!(loader.cache_state(), CacheState::Absent);

        loader.load(None, false).await;
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    }
}
