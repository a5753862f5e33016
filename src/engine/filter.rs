use crate::models::{FilterSelection, TransactionRecord};

/// Returns the records matching `selection`, in their original order.
///
/// This is also the filtered table handed to the presentation layer.
pub fn filter<'a>(records: &'a [TransactionRecord], selection: &FilterSelection) -> Vec<&'a TransactionRecord> {
    records.iter()
        .filter(|record| selection.matches(record))
        .collect()
}
