//! Image source with an unbounded cache and single-flight deduplication.
//!
//! Loads are fetched through an [`ImageFetchPort`], decoded off the async
//! runtime, and retained for the lifetime of the source. Concurrent requests
//! for the same locator share one underlying load.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared, join_all};
use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};

use crate::domain::entities::{ImageHandle, ImageLocator};
use crate::domain::ports::{ImageFetchPort, LoadError, LoadResult};

/// Concurrency limit for foreground page preloads.
pub const FOREGROUND_CONCURRENCY: usize = 8;

/// Concurrency limit for speculative background prefetch, deliberately
/// narrower so warming the next page never competes with foreground work.
pub const BACKGROUND_CONCURRENCY: usize = 3;

type LoadFuture = Shared<BoxFuture<'static, LoadResult<ImageHandle>>>;

/// Loads catalog images and retains them indefinitely.
///
/// Cheap to clone; clones share the same cache and in-flight map. The cache
/// never evicts: growth is bounded only by the catalog size, and the whole
/// source is discarded together with the gallery that owns it.
#[derive(Clone)]
pub struct ImageSource {
    fetcher: Arc<dyn ImageFetchPort>,
    cache: Arc<Mutex<HashMap<ImageLocator, ImageHandle>>>,
    in_flight: Arc<Mutex<HashMap<ImageLocator, LoadFuture>>>,
}

impl std::fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageSource")
            .field("cached", &self.cache_size())
            .finish_non_exhaustive()
    }
}

impl ImageSource {
    /// Creates a source backed by the given fetcher.
    #[must_use]
    pub fn new(fetcher: Arc<dyn ImageFetchPort>) -> Self {
        Self {
            fetcher,
            cache: Arc::new(Mutex::new(HashMap::new())),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Synchronous cache lookup; never triggers a load.
    #[must_use]
    pub fn get_cached(&self, locator: &ImageLocator) -> Option<ImageHandle> {
        self.cache.lock().get(locator).cloned()
    }

    /// Loads one image, going through the cache and the in-flight map.
    ///
    /// Safe to call concurrently for the same locator: at most one underlying
    /// fetch is ever issued, and every caller observes the same outcome. A
    /// failed locator is not cached, so a later call retries from scratch.
    ///
    /// # Errors
    /// Returns a [`LoadError`] naming the locator if the fetch or decode fails.
    pub async fn load_one(&self, locator: &ImageLocator) -> LoadResult<ImageHandle> {
        let fut = {
            let mut in_flight = self.in_flight.lock();
            // Re-check the cache under the in-flight lock so a load that
            // settled between the two lookups is not reissued.
            if let Some(handle) = self.cache.lock().get(locator).cloned() {
                trace!(locator = %locator, "cache hit");
                return Ok(handle);
            }
            if let Some(existing) = in_flight.get(locator) {
                trace!(locator = %locator, "joining in-flight load");
                existing.clone()
            } else {
                let fut = self.spawn_load(locator.clone());
                in_flight.insert(locator.clone(), fut.clone());
                fut
            }
        };
        fut.await
    }

    /// Preloads `locators` with chunked-barrier concurrency.
    ///
    /// The list is split into consecutive chunks of `concurrency` locators.
    /// Chunks run strictly in order; within a chunk all loads are issued at
    /// once and every member settles before the next chunk starts, bounding
    /// peak network activity to `concurrency`.
    ///
    /// # Errors
    /// Fails with the first [`LoadError`] of the failing chunk. Entries
    /// cached by earlier chunks (and by successful members of the failing
    /// chunk) remain cached; there is no rollback.
    pub async fn preload(&self, locators: &[ImageLocator], concurrency: usize) -> LoadResult<()> {
        for chunk in locators.chunks(concurrency.max(1)) {
            let results = join_all(chunk.iter().map(|locator| self.load_one(locator))).await;
            for result in results {
                result?;
            }
        }
        Ok(())
    }

    /// Fire-and-forget warm-up of the given locators.
    ///
    /// Runs [`ImageSource::preload`] at the background concurrency limit on a
    /// detached task. Failures are swallowed: this is a non-critical
    /// optimization and must never affect foreground state.
    pub fn prefetch_speculatively(&self, locators: Vec<ImageLocator>) {
        if locators.is_empty() {
            return;
        }
        debug!(count = locators.len(), "speculative prefetch started");
        let source = self.clone();
        tokio::spawn(async move {
            if let Err(error) = source.preload(&locators, BACKGROUND_CONCURRENCY).await {
                debug!(error = %error, "speculative prefetch failed");
            }
        });
    }

    /// Number of cached images.
    #[must_use]
    pub fn cache_size(&self) -> usize {
        self.cache.lock().len()
    }

    /// Drops every cached image.
    pub fn clear_cache(&self) {
        let mut cache = self.cache.lock();
        let count = cache.len();
        cache.clear();
        info!(count, "cleared image cache");
    }

    /// Spawns the underlying load task and returns a shareable handle to it.
    ///
    /// The task is detached from its callers: dropping an awaiting future
    /// never cancels the fetch, and the result still lands in the cache.
    fn spawn_load(&self, locator: ImageLocator) -> LoadFuture {
        let fetcher = Arc::clone(&self.fetcher);
        let cache = Arc::clone(&self.cache);
        let in_flight = Arc::clone(&self.in_flight);
        let task_locator = locator.clone();

        let task = tokio::spawn(async move {
            let result = fetch_and_decode(fetcher.as_ref(), &task_locator).await;
            match &result {
                Ok(handle) => {
                    cache
                        .lock()
                        .insert(task_locator.clone(), Arc::clone(handle));
                }
                Err(error) => {
                    warn!(locator = %task_locator, error = %error, "image load failed");
                }
            }
            in_flight.lock().remove(&task_locator);
            result
        });

        async move {
            match task.await {
                Ok(result) => result,
                Err(error) => Err(LoadError::task(locator, error.to_string())),
            }
        }
        .boxed()
        .shared()
    }
}

async fn fetch_and_decode(
    fetcher: &dyn ImageFetchPort,
    locator: &ImageLocator,
) -> LoadResult<ImageHandle> {
    let bytes = fetcher
        .fetch(locator)
        .await
        .map_err(|error| LoadError::from_fetch(locator.clone(), error))?;

    debug!(locator = %locator, bytes = bytes.len(), "downloaded image");

    let decoded = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .map_err(|error| LoadError::task(locator.clone(), error.to_string()))?
        .map_err(|error| LoadError::decode(locator.clone(), error.to_string()))?;

    Ok(Arc::new(decoded))
}
