use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::models::TransactionRecord;
use crate::types::Amount;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryAmount {
    pub category: String,
    pub total_amount: Amount
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryFraudRate {
    pub country: String,
    pub transactions: usize,
    pub fraud_transactions: usize,
    pub fraud_rate: f64
}

/// `numerator / denominator`, or zero when the denominator is zero.
pub fn rate(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }

    numerator as f64 / denominator as f64
}

/// Number of records per day, ascending by day.
pub fn daily_transaction_counts(records: &[&TransactionRecord]) -> Vec<DailyCount> {
    count_by_date(records.iter().copied())
}

/// Number of fraudulent records per day, ascending by day. Days without fraud are omitted.
pub fn daily_fraud_counts(records: &[&TransactionRecord]) -> Vec<DailyCount> {
    count_by_date(records.iter().copied().filter(|record| record.is_fraud))
}

fn count_by_date<'a>(records: impl Iterator<Item = &'a TransactionRecord>) -> Vec<DailyCount> {
    let mut counts = BTreeMap::<NaiveDate, usize>::new();

    for record in records {
        *counts.entry(record.date).or_default() += 1;
    }

    counts.into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect()
}

/// Sum of non-null amounts per merchant category, largest first, ties by category name.
///
/// A category whose amounts are all null still appears with a zero total.
pub fn amount_by_category(records: &[&TransactionRecord]) -> Vec<CategoryAmount> {
    let mut totals = HashMap::<&str, Amount>::new();

    for record in records {
        let total = totals.entry(record.merchant_category.as_str()).or_default();

        if let Some(amount) = record.amount {
            *total += amount;
        }
    }

    let mut rows: Vec<CategoryAmount> = totals.into_iter()
        .map(|(category, total_amount)| CategoryAmount { category: category.to_string(), total_amount })
        .collect();

    rows.sort_by(|a, b| b.total_amount.cmp(&a.total_amount).then_with(|| a.category.cmp(&b.category)));

    rows
}

/// Transaction count and fraud share per country, lowest rate first, ties by country name.
pub fn fraud_rate_by_country(records: &[&TransactionRecord]) -> Vec<CountryFraudRate> {
    let mut groups = HashMap::<&str, (usize, usize)>::new();

    for record in records {
        let (transactions, frauds) = groups.entry(record.country.as_str()).or_default();

        *transactions += 1;

        if record.is_fraud {
            *frauds += 1;
        }
    }

    let mut rows: Vec<CountryFraudRate> = groups.into_iter()
        .map(|(country, (transactions, fraud_transactions))| CountryFraudRate {
            country: country.to_string(),
            transactions,
            fraud_transactions,
            fraud_rate: rate(fraud_transactions, transactions)
        })
        .collect();

    rows.sort_by(|a, b| {
        a.fraud_rate.partial_cmp(&b.fraud_rate)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.country.cmp(&b.country))
    });

    rows
}
