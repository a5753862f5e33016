use crate::dataset::FilterOptions;
use crate::models::{DatasetLoadError, DateRange, FilterSelection, RawRecord, TransactionRecord, REQUIRED_COLUMNS};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// The in-memory transaction table plus everything derived from it at load time.
///
/// Records are shared behind an `Arc` and never mutated after construction.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[TransactionRecord]>,
    options: FilterOptions,
    bounds: Option<DateRange>
}

impl Dataset {
    /// Loads and types every row of the CSV file at `path`.
    ///
    /// # Errors
    /// Fails the whole load on the first unreadable file, missing column or
    /// malformed row. No partial dataset is ever returned.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetLoadError> {
        let path = path.as_ref();
        let file = File::open(path)?;

        debug!("Loading dataset from {}", path.display());

        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(input: R) -> Result<Self, DatasetLoadError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(input);

        let headers = reader.headers()?.clone();

        if let Some(missing) = REQUIRED_COLUMNS.iter().find(|column| !headers.iter().any(|header| header == **column)) {
            return Err(DatasetLoadError::MissingColumn(*missing));
        }

        let mut records = Vec::new();

        for (index, result) in reader.deserialize::<RawRecord>().enumerate() {
            let raw = result?;
            records.push(TransactionRecord::from_raw(raw, index + 1)?);
        }

        let dataset = Self::from_records(records);

        match dataset.bounds {
            Some(bounds) => info!("Loaded {} transactions spanning {} to {}", dataset.len(), bounds.start, bounds.end),
            None => info!("Loaded an empty dataset")
        }

        Ok(dataset)
    }

    /// Builds a dataset from already typed records, preserving their order.
    pub fn from_records(records: Vec<TransactionRecord>) -> Self {
        let options = FilterOptions::discover(&records);
        let bounds = date_bounds(&records);

        Self {
            records: records.into(),
            options,
            bounds
        }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Earliest and latest transaction day, `None` for an empty dataset.
    pub fn bounds(&self) -> Option<DateRange> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The selection a fresh session starts with: the full date span and no other constraint.
    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection::new(self.bounds.unwrap_or_else(DateRange::unbounded))
    }
}

fn date_bounds(records: &[TransactionRecord]) -> Option<DateRange> {
    let start = records.iter().map(|record| record.date).min()?;
    let end = records.iter().map(|record| record.date).max()?;

    Some(DateRange::new(start, end))
}
