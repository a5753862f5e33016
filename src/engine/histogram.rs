use serde::Serialize;

use crate::models::TransactionRecord;

pub const DEFAULT_BINS: usize = 30;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize
}

/// Equal-width buckets over `[min, max]` of the observed values.
///
/// Every bucket is half-open except the last, which also holds `max`, so the
/// counts always add up to the number of values binned.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>
}

impl Histogram {
    /// Bins the finite values of `values`. Non-finite values are skipped and an
    /// input with nothing left yields an empty histogram.
    pub fn build(values: impl IntoIterator<Item = f64>, bins: usize) -> Self {
        let values: Vec<f64> = values.into_iter().filter(|value| value.is_finite()).collect();

        if values.is_empty() {
            return Self::default();
        }

        let buckets = bins.max(1);
        let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        if min == max {
            min -= 0.5;
            max += 0.5;
        }

        let width = (max - min) / buckets as f64;
        let mut counts = vec![0usize; buckets];

        for value in &values {
            let index = ((value - min) / width) as usize;
            counts[index.min(buckets - 1)] += 1;
        }

        let bins = counts.into_iter()
            .enumerate()
            .map(|(index, count)| HistogramBin {
                lower: min + width * index as f64,
                upper: if index + 1 == buckets { max } else { min + width * (index + 1) as f64 },
                count
            })
            .collect();

        Self { bins }
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).sum()
    }
}

pub fn account_age_distribution(records: &[&TransactionRecord], bins: usize) -> Histogram {
    Histogram::build(records.iter().filter_map(|record| record.account_age_days), bins)
}

pub fn transactions_per_user_distribution(records: &[&TransactionRecord], bins: usize) -> Histogram {
    Histogram::build(records.iter().filter_map(|record| record.total_transactions_user), bins)
}
