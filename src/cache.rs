//! Offline asset cache with single-generation versioning
//!
//! Models the service-worker caching contract: serve cached assets first,
//! fall back to the network, and fall back to the cached root document for
//! page requests when offline. Exactly one named generation is current at a
//! time; activation purges every other generation, so a version bump
//! invalidates stale assets wholesale.
//!
//! Storage here is in-memory; the browser binding (or any other host) sits
//! on the other side of the [`Fetcher`] trait and owns real persistence.

use std::collections::HashMap;
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::Result;

/// The root document URL used as the offline fallback for page requests.
pub const ROOT_DOCUMENT: &str = "/";

/// Network access as the cache sees it.
///
/// `Ok(None)` means the server answered but has nothing for the URL;
/// `Err` means the network itself failed, which triggers offline fallbacks.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Option<Vec<u8>>>;
}

/// Single-generation offline asset cache.
pub struct OfflineCache {
    generation: String,
    precache: Vec<String>,
    // generation name -> url -> body
    store: Mutex<HashMap<String, HashMap<String, Vec<u8>>>>,
}

impl OfflineCache {
    /// Create a cache for a generation name, with the URLs to precache.
    pub fn new(generation: impl Into<String>, precache: Vec<String>) -> Self {
        Self { generation: generation.into(), precache, store: Mutex::new(HashMap::new()) }
    }

    /// The current generation name.
    pub fn generation(&self) -> &str {
        &self.generation
    }

    /// Populate the precache set, best-effort.
    ///
    /// Individual fetch failures are logged and skipped; an app shell that is
    /// half-cached still beats one that refused to install.
    pub async fn install<F: Fetcher>(&self, fetcher: &F) {
        info!("Installing cache generation {:?}", self.generation);

        for url in &self.precache {
            match fetcher.fetch(url).await {
                Ok(Some(body)) => {
                    self.insert(url, body);
                }
                Ok(None) => warn!("Precache miss for {}", url),
                Err(e) => warn!("Precache fetch failed for {}: {}", url, e),
            }
        }
    }

    /// Purge every generation whose name differs from the current one.
    pub fn activate(&self) {
        let mut store = self.store.lock().expect("cache lock poisoned");
        let stale: Vec<String> =
            store.keys().filter(|name| **name != self.generation).cloned().collect();

        for name in stale {
            info!("Deleting old cache generation {:?}", name);
            store.remove(&name);
        }
    }

    /// Serve a URL: cache first, then network, then offline fallback.
    ///
    /// `is_document` marks page navigations, which fall back to the cached
    /// root document when the network is down. Never errors: a request that
    /// cannot be satisfied is `Ok(None)`, mirroring the resolver's
    /// data-absence convention.
    pub async fn serve<F: Fetcher>(
        &self,
        url: &str,
        is_document: bool,
        fetcher: &F,
    ) -> Result<Option<Vec<u8>>> {
        if let Some(body) = self.lookup(url) {
            debug!("Cache hit for {}", url);
            return Ok(Some(body));
        }

        match fetcher.fetch(url).await {
            Ok(found) => Ok(found),
            Err(e) => {
                debug!("Network unavailable for {}: {}", url, e);
                if is_document {
                    // Offline page navigation: serve the cached app shell.
                    return Ok(self.lookup(ROOT_DOCUMENT));
                }
                Ok(None)
            }
        }
    }

    /// Number of assets cached in the current generation.
    pub fn cached_count(&self) -> usize {
        self.store
            .lock()
            .expect("cache lock poisoned")
            .get(&self.generation)
            .map(|assets| assets.len())
            .unwrap_or(0)
    }

    fn insert(&self, url: &str, body: Vec<u8>) {
        let mut store = self.store.lock().expect("cache lock poisoned");
        store.entry(self.generation.clone()).or_default().insert(url.to_string(), body);
    }

    fn lookup(&self, url: &str) -> Option<Vec<u8>> {
        let store = self.store.lock().expect("cache lock poisoned");
        store.get(&self.generation).and_then(|assets| assets.get(url)).cloned()
    }

    #[cfg(test)]
    fn seed_generation(&self, generation: &str, url: &str, body: Vec<u8>) {
        let mut store = self.store.lock().expect("cache lock poisoned");
        store.entry(generation.to_string()).or_default().insert(url.to_string(), body);
    }
}
