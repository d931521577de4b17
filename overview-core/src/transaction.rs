//! Normalized spending transaction, independent of the bank it came from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::month::YearMonth;

/// One spending row. `amount` is always positive: statement parsers drop
/// income rows and flip the sign convention of their bank.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Merchant description as printed on the statement
    pub place: String,
    pub amount: f64,
}

impl Transaction {
    pub fn new(date: NaiveDate, place: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            place: place.into(),
            amount,
        }
    }

    pub fn month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }
}

/// Earliest date in a set of transactions.
pub fn earliest_date<'a>(txns: impl IntoIterator<Item = &'a Transaction>) -> Option<NaiveDate> {
    txns.into_iter().map(|t| t.date).min()
}
