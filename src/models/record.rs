use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::errors::DatasetLoadError;
use crate::types::Amount;

/// Format of the `transaction_time` column. Fractional seconds are optional.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

pub const REQUIRED_COLUMNS: [&str; 8] = [
    "transaction_time",
    "amount",
    "country",
    "channel",
    "merchant_category",
    "total_transactions_user",
    "account_age_days",
    "is_fraud"
];

/// Represents a single row from the input CSV file, before any typing.
///
/// Every field is kept as text so that nullable cells and the timestamp can
/// be validated with row-level error messages.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub transaction_time: String,
    pub amount: String,
    pub country: String,
    pub channel: String,
    pub merchant_category: String,
    pub total_transactions_user: String,
    pub account_age_days: String,
    pub is_fraud: String
}

/// A typed transaction. Immutable once the dataset has been loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    /// Point in time of the transaction, UTC.
    pub timestamp: DateTime<Utc>,
    /// Calendar day of `timestamp`, also in UTC.
    pub date: NaiveDate,
    /// `None` when the source cell was empty or `NaN`.
    pub amount: Option<Amount>,
    pub country: String,
    pub channel: String,
    pub merchant_category: String,
    pub account_age_days: Option<f64>,
    /// Repeated on every row of the same user.
    pub total_transactions_user: Option<f64>,
    pub is_fraud: bool
}

impl TransactionRecord {
    /// Types a raw row. `row` is the 1-based data row number used in errors.
    ///
    /// # Errors
    /// Returns `DatasetLoadError` if the timestamp, amount, fraud flag or one
    /// of the numeric columns cannot be parsed.
    pub fn from_raw(raw: RawRecord, row: usize) -> Result<Self, DatasetLoadError> {
        let timestamp = parse_timestamp(&raw.transaction_time)
            .ok_or_else(|| DatasetLoadError::invalid_timestamp(row, &raw.transaction_time))?;

        let amount = Amount::parse_nullable(&raw.amount)
            .map_err(|error| DatasetLoadError::invalid_amount(row, error))?;

        let is_fraud = match raw.is_fraud.trim() {
            "1" | "true" => true,
            "0" | "false" => false,
            other => return Err(DatasetLoadError::invalid_field(row, "is_fraud", other))
        };

        let account_age_days = parse_nullable_real(&raw.account_age_days)
            .map_err(|_| DatasetLoadError::invalid_field(row, "account_age_days", &raw.account_age_days))?;

        let total_transactions_user = parse_nullable_real(&raw.total_transactions_user)
            .map_err(|_| DatasetLoadError::invalid_field(row, "total_transactions_user", &raw.total_transactions_user))?;

        Ok(Self {
            date: timestamp.date_naive(),
            timestamp,
            amount,
            country: raw.country,
            channel: raw.channel,
            merchant_category: raw.merchant_category,
            account_age_days,
            total_transactions_user,
            is_fraud
        })
    }

    /// `timestamp` in the same text format it was loaded from.
    pub fn transaction_time(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value.trim(), TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn parse_nullable_real(value: &str) -> Result<Option<f64>, std::num::ParseFloatError> {
    let value = value.trim();

    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    value.parse::<f64>().map(Some)
}
