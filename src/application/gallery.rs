//! Paginated gallery controller.
//!
//! Owns the pagination state machine, drives the image source to preload a
//! page before rendering, degrades to per-cell lazy loading on failure, and
//! speculatively warms the next page after a successful transition.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tracing::{debug, info, warn};

use crate::domain::entities::{ImageHandle, ImageLocator, PaginationState};
use crate::domain::ports::{LoadResult, MetadataError, MetadataStorePort, SetOutcome};
use crate::infrastructure::config::AppSettings;
use crate::infrastructure::image::{FOREGROUND_CONCURRENCY, ImageSource, catalog};

/// Structural render model of one gallery page.
#[derive(Debug)]
pub struct PageView {
    /// The rendered page (1-based).
    pub page: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// One cell per locator, in catalog order.
    pub cells: Vec<GalleryCell>,
    /// True when the preload failed and every cell was rendered lazily.
    pub degraded: bool,
}

impl PageView {
    /// Human-readable page indicator.
    #[must_use]
    pub fn indicator(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }
}

/// One gallery cell: either rendered from cache or armed for lazy loading.
#[derive(Debug)]
pub enum GalleryCell {
    /// The image was preloaded and is ready to show.
    Ready {
        /// Locator of the cell's image.
        locator: ImageLocator,
        /// Decoded image handle, read from the cache.
        image: ImageHandle,
    },
    /// The image loads on demand once the cell becomes visible.
    Lazy(LazyImage),
}

impl GalleryCell {
    /// Locator of the cell's image.
    #[must_use]
    pub fn locator(&self) -> &ImageLocator {
        match self {
            Self::Ready { locator, .. } => locator,
            Self::Lazy(lazy) => lazy.locator(),
        }
    }

    /// Returns true if the cell already holds a decoded image.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }
}

/// A cell whose load is deferred until it enters the viewport.
///
/// The visibility trigger is one-shot: the first `enter_viewport` call
/// performs the load and disarms the cell, later signals are ignored.
pub struct LazyImage {
    locator: ImageLocator,
    source: ImageSource,
    armed: AtomicBool,
}

impl LazyImage {
    fn new(locator: ImageLocator, source: ImageSource) -> Self {
        Self {
            locator,
            source,
            armed: AtomicBool::new(true),
        }
    }

    /// Locator this cell will load.
    #[must_use]
    pub fn locator(&self) -> &ImageLocator {
        &self.locator
    }

    /// Returns true if the cell has not fired yet.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }

    /// Signals that the cell became visible.
    ///
    /// The first call loads the image and returns its outcome; every later
    /// call returns `None` without touching the source.
    pub async fn enter_viewport(&self) -> Option<LoadResult<ImageHandle>> {
        if !self.armed.swap(false, Ordering::SeqCst) {
            return None;
        }
        Some(self.source.load_one(&self.locator).await)
    }
}

impl std::fmt::Debug for LazyImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyImage")
            .field("locator", &self.locator)
            .field("armed", &self.is_armed())
            .finish_non_exhaustive()
    }
}

/// Outcome of selecting an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The locator was written to the active document; the gallery closed.
    Selected,
    /// No document is active; nothing was written and the gallery stays open.
    NoActiveDocument,
}

/// Drives the paginated gallery over the image source.
///
/// Page transitions are strictly serialized: a navigation request arriving
/// while another is in flight is dropped, never queued. Out-of-range
/// requests are silently ignored.
pub struct GalleryController {
    source: ImageSource,
    metadata: Arc<dyn MetadataStorePort>,
    metadata_key: String,
    page_size: usize,
    total_pages: usize,
    current_page: AtomicUsize,
    is_loading: AtomicBool,
    open: AtomicBool,
}

impl GalleryController {
    /// Creates a controller positioned on page 1.
    #[must_use]
    pub fn new(
        settings: &AppSettings,
        source: ImageSource,
        metadata: Arc<dyn MetadataStorePort>,
    ) -> Self {
        let page_size = settings.page_size.clamp(1, catalog::TOTAL_COUNT);
        Self {
            source,
            metadata,
            metadata_key: settings.metadata_key.clone(),
            page_size,
            total_pages: catalog::total_pages(page_size),
            current_page: AtomicUsize::new(1),
            is_loading: AtomicBool::new(false),
            open: AtomicBool::new(true),
        }
    }

    /// Loads the first page. Called once when the gallery opens.
    pub async fn open(&self) -> Option<PageView> {
        self.load_page(1).await
    }

    /// Navigates to the next page, if one exists.
    pub async fn next_page(&self) -> Option<PageView> {
        let page = self.current_page.load(Ordering::SeqCst);
        if page < self.total_pages {
            self.load_page(page + 1).await
        } else {
            None
        }
    }

    /// Navigates to the previous page, if one exists.
    pub async fn previous_page(&self) -> Option<PageView> {
        let page = self.current_page.load(Ordering::SeqCst);
        if page > 1 {
            self.load_page(page - 1).await
        } else {
            None
        }
    }

    /// Jumps to an arbitrary page.
    ///
    /// Out-of-range requests are ignored: no error, no state change.
    pub async fn jump_to_page(&self, page: usize) -> Option<PageView> {
        if (1..=self.total_pages).contains(&page) {
            self.load_page(page).await
        } else {
            debug!(page, total_pages = self.total_pages, "jump out of range ignored");
            None
        }
    }

    /// Loads a page, preloading its images before rendering.
    ///
    /// Returns `None` when another transition is already in flight. On
    /// preload failure the page is rendered with every cell in lazy mode
    /// instead of surfacing the error.
    async fn load_page(&self, page: usize) -> Option<PageView> {
        if self.is_loading.swap(true, Ordering::SeqCst) {
            debug!(page, "navigation dropped, page transition already in flight");
            return None;
        }

        self.current_page.store(page, Ordering::SeqCst);
        let locators = catalog::page_locators(page, self.page_size);

        let view = match self.source.preload(&locators, FOREGROUND_CONCURRENCY).await {
            Ok(()) => {
                let cells = locators
                    .iter()
                    .map(|locator| match self.source.get_cached(locator) {
                        Some(image) => GalleryCell::Ready {
                            locator: locator.clone(),
                            image,
                        },
                        // The cache holds every preloaded locator here; a
                        // missing entry degrades just that cell to lazy.
                        None => GalleryCell::Lazy(self.lazy_cell(locator.clone())),
                    })
                    .collect();
                PageView {
                    page,
                    total_pages: self.total_pages,
                    cells,
                    degraded: false,
                }
            }
            Err(error) => {
                warn!(page, error = %error, "page preload failed, rendering lazy cells");
                let cells = locators
                    .iter()
                    .map(|locator| GalleryCell::Lazy(self.lazy_cell(locator.clone())))
                    .collect();
                PageView {
                    page,
                    total_pages: self.total_pages,
                    cells,
                    degraded: true,
                }
            }
        };

        // Cleared on both exit paths so the state machine can never wedge
        // in Loading.
        self.is_loading.store(false, Ordering::SeqCst);

        if !view.degraded && page < self.total_pages {
            self.source
                .prefetch_speculatively(catalog::page_locators(page + 1, self.page_size));
        }

        Some(view)
    }

    fn lazy_cell(&self, locator: ImageLocator) -> LazyImage {
        LazyImage::new(locator, self.source.clone())
    }

    /// Writes the selected locator to the active document's metadata.
    ///
    /// On a successful write the gallery closes. Without an active document
    /// the activation is a no-op and the gallery stays open.
    ///
    /// # Errors
    /// Propagates [`MetadataError`] from the metadata store.
    pub async fn select(&self, locator: &ImageLocator) -> Result<SelectionOutcome, MetadataError> {
        match self
            .metadata
            .set_active_property(&self.metadata_key, locator.as_str())
            .await?
        {
            SetOutcome::Written => {
                info!(locator = %locator, key = %self.metadata_key, "selection written to document metadata");
                self.open.store(false, Ordering::SeqCst);
                Ok(SelectionOutcome::Selected)
            }
            SetOutcome::NoActiveDocument => {
                debug!(locator = %locator, "no active document, selection ignored");
                Ok(SelectionOutcome::NoActiveDocument)
            }
        }
    }

    /// Returns true until a selection closes the gallery.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Closes the gallery without selecting.
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    /// Snapshot of the pagination state.
    #[must_use]
    pub fn state(&self) -> PaginationState {
        PaginationState {
            current_page: self.current_page.load(Ordering::SeqCst),
            page_size: self.page_size,
            total_pages: self.total_pages,
            is_loading: self.is_loading.load(Ordering::SeqCst),
        }
    }
}

impl std::fmt::Debug for GalleryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GalleryController")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
