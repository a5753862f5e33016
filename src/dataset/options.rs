use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::TransactionRecord;

/// Distinct values offered by each categorical filter, sorted lexicographically.
///
/// Derived from the loaded data, so every option is guaranteed to match at
/// least one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub channels: Vec<String>,
    pub categories: Vec<String>
}

impl FilterOptions {
    pub fn discover(records: &[TransactionRecord]) -> Self {
        let mut countries = BTreeSet::new();
        let mut channels = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for record in records {
            countries.insert(record.country.as_str());
            channels.insert(record.channel.as_str());
            categories.insert(record.merchant_category.as_str());
        }

        Self {
            countries: countries.into_iter().map(String::from).collect(),
            channels: channels.into_iter().map(String::from).collect(),
            categories: categories.into_iter().map(String::from).collect()
        }
    }
}
