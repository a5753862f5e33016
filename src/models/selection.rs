use chrono::NaiveDate;
use std::convert::Infallible;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::models::TransactionRecord;

/// A categorical filter value: either the "all" wildcard or one concrete value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Choice {
    #[default]
    All,
    Only(String)
}

impl Choice {
    /// An `Only` value that never occurs in the data simply matches nothing.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(expected) => expected == value
        }
    }
}

impl FromStr for Choice {
    type Err = Infallible;

    /// Only the exact lowercase `all` is the wildcard, so a real value spelled `All` stays selectable.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == "all" {
            Ok(Choice::All)
        } else {
            Ok(Choice::Only(value.to_string()))
        }
    }
}

impl Display for Choice {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => write!(formatter, "all"),
            Choice::Only(value) => write!(formatter, "{value}")
        }
    }
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range spanning every representable day.
    pub fn unbounded() -> Self {
        Self::new(NaiveDate::MIN, NaiveDate::MAX)
    }

    /// A reversed range (start after end) contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The full set of constraints currently chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterSelection {
    pub date_range: DateRange,
    pub country: Choice,
    pub channel: Choice,
    pub merchant_category: Choice,
    pub fraud_only: bool
}

impl FilterSelection {
    /// A selection over `date_range` that leaves every other dimension unconstrained.
    pub fn new(date_range: DateRange) -> Self {
        Self {
            date_range,
            country: Choice::All,
            channel: Choice::All,
            merchant_category: Choice::All,
            fraud_only: false
        }
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn with_country(mut self, country: Choice) -> Self {
        self.country = country;
        self
    }

    pub fn with_channel(mut self, channel: Choice) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_category(mut self, merchant_category: Choice) -> Self {
        self.merchant_category = merchant_category;
        self
    }

    pub fn with_fraud_only(mut self, fraud_only: bool) -> Self {
        self.fraud_only = fraud_only;
        self
    }

    /// Conjunction of the date, country, channel, category and fraud clauses.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        self.date_range.contains(record.date)
            && self.country.matches(&record.country)
            && self.channel.matches(&record.channel)
            && self.merchant_category.matches(&record.merchant_category)
            && (!self.fraud_only || record.is_fraud)
    }
}
