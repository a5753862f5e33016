use serde::Serialize;

use crate::engine::aggregations::{
    amount_by_category, daily_fraud_counts, daily_transaction_counts, fraud_rate_by_country,
    CategoryAmount, CountryFraudRate, DailyCount
};
use crate::engine::filter::filter;
use crate::engine::histogram::{account_age_distribution, transactions_per_user_distribution, Histogram};
use crate::engine::kpi::Kpis;
use crate::models::{FilterSelection, TransactionRecord};

/// Everything the presentation layer renders for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub kpis: Kpis,
    pub daily_transactions: Vec<DailyCount>,
    pub daily_fraud: Vec<DailyCount>,
    pub amount_by_category: Vec<CategoryAmount>,
    pub fraud_rate_by_country: Vec<CountryFraudRate>,
    pub account_age: Histogram,
    pub transactions_per_user: Histogram
}

/// Recomputes the whole view from scratch. Pure: the same inputs always give the same view.
pub fn recompute(records: &[TransactionRecord], selection: &FilterSelection, bins: usize) -> ViewModel {
    let filtered = filter(records, selection);

    ViewModel {
        kpis: Kpis::compute(&filtered),
        daily_transactions: daily_transaction_counts(&filtered),
        daily_fraud: daily_fraud_counts(&filtered),
        amount_by_category: amount_by_category(&filtered),
        fraud_rate_by_country: fraud_rate_by_country(&filtered),
        account_age: account_age_distribution(&filtered, bins),
        transactions_per_user: transactions_per_user_distribution(&filtered, bins)
    }
}
