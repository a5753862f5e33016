mod errors;
mod record;
mod selection;

pub use errors::DatasetLoadError;
pub use record::{RawRecord, TransactionRecord, REQUIRED_COLUMNS};
pub use selection::{Choice, DateRange, FilterSelection};
