use serde::Serialize;

use crate::engine::aggregations::rate;
use crate::models::TransactionRecord;
use crate::types::{format_currency, format_integer, format_percentage, Amount};

/// The four headline scalars over a filtered record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub transaction_count: usize,
    /// Sum of the non-null amounts.
    pub total_amount: Amount,
    /// Mean of the non-null amounts, zero when there are none.
    pub avg_amount: Amount,
    /// Share of fraudulent records, zero for an empty set.
    pub fraud_rate: f64
}

/// Display-ready renderings of `Kpis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiDisplay {
    pub transaction_count: String,
    pub total_amount: String,
    pub avg_amount: String,
    pub fraud_rate: String
}

impl Kpis {
    pub fn compute(records: &[&TransactionRecord]) -> Self {
        let mut total_amount = Amount::ZERO;
        let mut amounts = 0;
        let mut frauds = 0;

        for record in records {
            if let Some(amount) = record.amount {
                total_amount += amount;
                amounts += 1;
            }

            if record.is_fraud {
                frauds += 1;
            }
        }

        Self {
            transaction_count: records.len(),
            total_amount,
            avg_amount: total_amount.mean(amounts),
            fraud_rate: rate(frauds, records.len())
        }
    }

    pub fn display(&self) -> KpiDisplay {
        KpiDisplay {
            transaction_count: format_integer(self.transaction_count as u64),
            total_amount: format_currency(self.total_amount.value()),
            avg_amount: format_currency(self.avg_amount.value()),
            fraud_rate: format_percentage(self.fraud_rate)
        }
    }
}
