//! Image acquisition infrastructure.
//!
//! This module provides:
//! - Deterministic locator generation for the remote catalog
//! - An unbounded in-memory cache with single-flight deduplication
//! - Chunked-barrier preloading and speculative prefetch
//! - The HTTP fetch adapter

/// Locator generation and catalog constants.
pub mod catalog;
/// HTTP fetch adapter.
pub mod fetcher;
/// Cache and load orchestration.
pub mod source;

pub use catalog::{BASE_URL, TOTAL_COUNT, locators_for_range, page_locators, total_pages};
pub use fetcher::HttpImageFetcher;
pub use source::{BACKGROUND_CONCURRENCY, FOREGROUND_CONCURRENCY, ImageSource};

#[cfg(test)]
pub(crate) mod testing {
    //! Shared test doubles for the image layer.

    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use bytes::Bytes;
    use parking_lot::Mutex;
    use tokio::sync::Semaphore;

    use crate::domain::entities::ImageLocator;
    use crate::domain::ports::{FetchError, FetchResult, ImageFetchPort};

    /// Encodes a 1x1 image so the decode step sees real PNG bytes.
    pub(crate) fn tiny_png() -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(1, 1);
        let mut buf = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .expect("encoding a 1x1 png cannot fail");
        buf
    }

    /// Programmable fetcher that counts fetches and tracks peak concurrency.
    pub(crate) struct StubFetcher {
        payload: Bytes,
        delay: Duration,
        gate: Option<Semaphore>,
        fail_all: AtomicBool,
        fail_set: Mutex<HashSet<ImageLocator>>,
        fetches: AtomicUsize,
        active: AtomicUsize,
        max_active: AtomicUsize,
    }

    impl StubFetcher {
        pub(crate) fn new() -> Self {
            Self::with_payload(tiny_png())
        }

        pub(crate) fn with_payload(payload: Vec<u8>) -> Self {
            Self {
                payload: Bytes::from(payload),
                delay: Duration::ZERO,
                gate: None,
                fail_all: AtomicBool::new(false),
                fail_set: Mutex::new(HashSet::new()),
                fetches: AtomicUsize::new(0),
                active: AtomicUsize::new(0),
                max_active: AtomicUsize::new(0),
            }
        }

        pub(crate) fn with_delay(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::new()
            }
        }

        /// Fetches block until the test releases permits on the gate.
        pub(crate) fn gated() -> Self {
            Self {
                gate: Some(Semaphore::new(0)),
                ..Self::new()
            }
        }

        pub(crate) fn release(&self, permits: usize) {
            self.gate
                .as_ref()
                .expect("release on an ungated fetcher")
                .add_permits(permits);
        }

        pub(crate) fn set_fail_all(&self, fail: bool) {
            self.fail_all.store(fail, Ordering::SeqCst);
        }

        pub(crate) fn fail_locator(&self, locator: &ImageLocator) {
            self.fail_set.lock().insert(locator.clone());
        }

        pub(crate) fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }

        pub(crate) fn max_concurrency(&self) -> usize {
            self.max_active.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ImageFetchPort for StubFetcher {
        async fn fetch(&self, locator: &ImageLocator) -> FetchResult<Bytes> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            let current = self.active.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active.fetch_max(current, Ordering::SeqCst);

            if let Some(gate) = &self.gate {
                gate.acquire().await.expect("gate closed").forget();
            }
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            self.active.fetch_sub(1, Ordering::SeqCst);

            if self.fail_all.load(Ordering::SeqCst) || self.fail_set.lock().contains(locator) {
                return Err(FetchError::Http(404));
            }
            Ok(self.payload.clone())
        }
    }
}
