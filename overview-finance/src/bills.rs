//! Recurring charges that never show up as statement lines (rent paid by
//! cheque, insurance paid at the counter) but belong in the bills chart.

use overview_core::{MonthlySeries, YearMonth};
use serde::{Deserialize, Serialize};

/// A fixed monthly charge, active from `from` to `to` inclusive. An absent
/// `to` means the charge is still running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BillEntry {
    pub label: String,
    pub from: YearMonth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<YearMonth>,
    pub amount: f64,
}

impl BillEntry {
    pub fn new(label: impl Into<String>, from: YearMonth, to: Option<YearMonth>, amount: f64) -> Self {
        Self {
            label: label.into(),
            from,
            to,
            amount,
        }
    }

    pub fn is_active(&self, month: YearMonth) -> bool {
        month >= self.from && self.to.is_none_or(|to| month <= to)
    }
}

/// Ordered list of recurring charges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillSchedule {
    entries: Vec<BillEntry>,
}

impl BillSchedule {
    pub fn new(entries: Vec<BillEntry>) -> Self {
        Self { entries }
    }

    /// A schedule that adds nothing.
    pub fn none() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn entries(&self) -> &[BillEntry] {
        &self.entries
    }

    /// Sum of every entry active in `month`.
    pub fn amount_for(&self, month: YearMonth) -> f64 {
        self.entries
            .iter()
            .filter(|e| e.is_active(month))
            .map(|e| e.amount)
            .sum()
    }

    /// Zero-filled series of the scheduled charges over `[start, end]`.
    pub fn series(&self, name: &str, start: YearMonth, end: YearMonth) -> MonthlySeries {
        MonthlySeries::from_amounts(
            name,
            YearMonth::range_inclusive(start, end).map(|m| (m, self.amount_for(m))),
        )
    }
}

impl Default for BillSchedule {
    fn default() -> Self {
        let ym = |y, m| YearMonth::new(y, m).expect("literal month");
        Self::new(vec![
            BillEntry::new("rent", ym(2018, 1), Some(ym(2018, 11)), 1000.0),
            BillEntry::new("rent", ym(2018, 12), Some(ym(2020, 9)), 1550.0),
            BillEntry::new("rent", ym(2020, 10), None, 1750.0),
            BillEntry::new("insurance", ym(2020, 11), Some(ym(2021, 6)), 96.0),
        ])
    }
}
