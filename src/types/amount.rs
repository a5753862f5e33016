use crate::types::errors::AmountError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use tracing::error;

/// A monetary value as it appears in the `amount` column.
///
/// Backed by `Decimal` so that category totals add up to the overall total
/// without floating point drift.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub fn value(self) -> Decimal {
        self.0
    }

    /// Parses a cell that may be null. Empty cells and `NaN` load as `None`.
    pub fn parse_nullable(value: &str) -> Result<Option<Amount>, AmountError> {
        let value = value.trim();

        if value.is_empty() || value.eq_ignore_ascii_case("nan") {
            return Ok(None);
        }

        Amount::from_str(value).map(Some)
    }

    /// Arithmetic mean of `count` amounts summing to `self`, zero when `count` is zero.
    pub fn mean(self, count: usize) -> Amount {
        if count == 0 {
            return Amount::ZERO;
        }

        Amount(self.0 / Decimal::from(count))
    }

    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount)
    }

    /// Adds `rhs`, clamping to the representable range instead of overflowing.
    pub fn saturating_add(self, rhs: Amount) -> Amount {
        self.checked_add(rhs).unwrap_or_else(|| {
            error!("Amount addition overflowed, clamping the total");

            if rhs.0.is_sign_negative() {
                Amount(Decimal::MIN)
            } else {
                Amount(Decimal::MAX)
            }
        })
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = self.saturating_add(rhs);
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Display for Amount {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0.normalize())
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.is_empty() {
            return Err(AmountError::InvalidFormat("Value is an empty string".to_string()));
        }

        //NOTE: pandas writes large floats in scientific notation, so fall back to that form
        Decimal::from_str(value)
            .or_else(|_| Decimal::from_scientific(value))
            .map(Amount)
            .map_err(|error| AmountError::InvalidFormat(format!("Value [{value}] is not a decimal: {error}")))
    }
}
