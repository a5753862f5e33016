mod aggregations;
mod dashboard;
mod filter;
mod histogram;
mod kpi;
mod view;

pub use dashboard::{Dashboard, DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TIMEOUT};
pub use histogram::{Histogram, DEFAULT_BINS};
pub use kpi::KpiDisplay;
pub use view::ViewModel;
