use crate::dataset::Dataset;
use crate::engine::filter::filter;
use crate::engine::histogram::DEFAULT_BINS;
use crate::engine::view::{recompute, ViewModel};
use crate::models::{FilterSelection, TransactionRecord};
use moka::future::Cache;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::spawn_blocking;
use tracing::debug;

pub const DEFAULT_CACHE_CAPACITY: u64 = 64;
pub const DEFAULT_CACHE_TIMEOUT: Duration = Duration::from_secs(600);

/// Serves view models for a loaded dataset, memoized per filter selection.
///
/// The dataset never changes after load, so a cached view is always identical
/// to a fresh recompute.
pub struct Dashboard {
    dataset: Arc<Dataset>,
    cache: Cache<FilterSelection, Arc<ViewModel>>,
    cache_capacity: u64,
    cache_timeout: Duration,
    bins: usize
}

impl Dashboard {
    /// Creates a new dashboard over the provided dataset.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self {
            dataset,
            cache: build_cache(DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TIMEOUT),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_timeout: DEFAULT_CACHE_TIMEOUT,
            bins: DEFAULT_BINS
        }
    }

    /// Loads the CSV at `path` off the async runtime and wraps it in a dashboard.
    pub async fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let dataset = spawn_blocking(move || Dataset::load(&path)).await??;

        Ok(Self::new(Arc::new(dataset)))
    }

    /// Maximum number of selections whose views are kept.
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self.cache = build_cache(self.cache_capacity, self.cache_timeout);
        self
    }

    /// How long an unused view stays cached.
    pub fn with_cache_timeout(mut self, timeout: Duration) -> Self {
        self.cache_timeout = timeout;
        self.cache = build_cache(self.cache_capacity, self.cache_timeout);
        self
    }

    /// Bucket count for both distribution histograms.
    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self.cache.invalidate_all();
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn default_selection(&self) -> FilterSelection {
        self.dataset.default_selection()
    }

    /// Returns the view for `selection`, computing it on a cache miss.
    pub async fn view(&self, selection: &FilterSelection) -> Arc<ViewModel> {
        let dataset = self.dataset.clone();
        let bins = self.bins;
        let key = selection.clone();

        self.cache.get_with(selection.clone(), async move {
            debug!("Recomputing view for {key:?}");
            Arc::new(recompute(dataset.records(), &key, bins))
        }).await
    }

    /// The filtered table for `selection`, in dataset order. Not memoized.
    pub fn table(&self, selection: &FilterSelection) -> Vec<&TransactionRecord> {
        filter(self.dataset.records(), selection)
    }

    /// Number of views currently memoized.
    pub async fn cached_views(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

fn build_cache(capacity: u64, timeout: Duration) -> Cache<FilterSelection, Arc<ViewModel>> {
    Cache::builder()
        .max_capacity(capacity)
        .time_to_idle(timeout)
        .build()
}
