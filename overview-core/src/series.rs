//! Month-by-month spending series.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::month::YearMonth;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    pub month: YearMonth,
    pub amount: f64,
}

/// Sum of spending per calendar month, sorted ascending with one entry per
/// month. An empty series is the "no data" marker: the category had nothing
/// to aggregate, which is distinct from a series of zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeries {
    name: String,
    points: Vec<MonthlyAmount>,
}

impl MonthlySeries {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }

    /// One zero entry for every month of `[start, end]`.
    pub fn zero_filled(name: impl Into<String>, start: YearMonth, end: YearMonth) -> Self {
        Self {
            name: name.into(),
            points: YearMonth::range_inclusive(start, end)
                .map(|month| MonthlyAmount { month, amount: 0.0 })
                .collect(),
        }
    }

    /// Builds a series from unordered `(month, amount)` pairs, summing
    /// duplicates. Months without a pair are not filled in.
    pub fn from_amounts(
        name: impl Into<String>,
        amounts: impl IntoIterator<Item = (YearMonth, f64)>,
    ) -> Self {
        let mut by_month: BTreeMap<YearMonth, f64> = BTreeMap::new();
        for (month, amount) in amounts {
            *by_month.entry(month).or_insert(0.0) += amount;
        }
        Self {
            name: name.into(),
            points: by_month
                .into_iter()
                .map(|(month, amount)| MonthlyAmount { month, amount })
                .collect(),
        }
    }

    /// Element-wise sum of several series, keyed by month.
    pub fn total<'a>(name: impl Into<String>, series: impl IntoIterator<Item = &'a MonthlySeries>) -> Self {
        Self::from_amounts(
            name,
            series
                .into_iter()
                .flat_map(|s| s.points.iter().map(|p| (p.month, p.amount))),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[MonthlyAmount] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first_month(&self) -> Option<YearMonth> {
        self.points.first().map(|p| p.month)
    }

    pub fn last_month(&self) -> Option<YearMonth> {
        self.points.last().map(|p| p.month)
    }

    pub fn get(&self, month: YearMonth) -> Option<f64> {
        self.points
            .binary_search_by_key(&month, |p| p.month)
            .ok()
            .map(|i| self.points[i].amount)
    }

    pub fn max_amount(&self) -> f64 {
        self.points.iter().map(|p| p.amount).fold(0.0, f64::max)
    }

    /// Adds `amount` to an existing month. Returns false if the month is not
    /// part of the series.
    pub fn add_to_month(&mut self, month: YearMonth, amount: f64) -> bool {
        match self.points.binary_search_by_key(&month, |p| p.month) {
            Ok(i) => {
                self.points[i].amount += amount;
                true
            }
            Err(_) => false,
        }
    }

    /// Adds `other` month by month. Months of `other` missing from `self` are
    /// inserted, keeping the series sorted.
    pub fn merge(&mut self, other: &MonthlySeries) {
        for p in &other.points {
            match self.points.binary_search_by_key(&p.month, |q| q.month) {
                Ok(i) => self.points[i].amount += p.amount,
                Err(i) => self.points.insert(i, *p),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn test_zero_filled_has_every_month() {
        let s = MonthlySeries::zero_filled("bar", ym(2019, 11), ym(2020, 2));
        assert_eq!(s.len(), 4);
        assert!(s.points().iter().all(|p| p.amount == 0.0));
        assert_eq!(s.first_month(), Some(ym(2019, 11)));
        assert_eq!(s.last_month(), Some(ym(2020, 2)));
    }

    #[test]
    fn test_add_to_month_inside_and_outside() {
        let mut s = MonthlySeries::zero_filled("bar", ym(2020, 1), ym(2020, 3));
        assert!(s.add_to_month(ym(2020, 2), 12.5));
        assert!(s.add_to_month(ym(2020, 2), 7.5));
        assert!(!s.add_to_month(ym(2020, 4), 1.0));
        assert_eq!(s.get(ym(2020, 2)), Some(20.0));
        assert_eq!(s.get(ym(2020, 4)), None);
    }

    #[test]
    fn test_merge_is_additive_by_month() {
        let mut a = MonthlySeries::from_amounts("a", vec![(ym(2020, 1), 10.0), (ym(2020, 3), 5.0)]);
        let b = MonthlySeries::from_amounts("b", vec![(ym(2020, 2), 1.0), (ym(2020, 3), 2.0)]);
        a.merge(&b);
        let amounts: Vec<_> = a.points().iter().map(|p| (p.month, p.amount)).collect();
        assert_eq!(amounts, vec![(ym(2020, 1), 10.0), (ym(2020, 2), 1.0), (ym(2020, 3), 7.0)]);
        assert_eq!(a.name(), "a");
    }

    #[test]
    fn test_total_skips_empty_series() {
        let a = MonthlySeries::from_amounts("a", vec![(ym(2020, 1), 10.0)]);
        let empty = MonthlySeries::empty("none");
        let t = MonthlySeries::total("all", [&a, &empty, &a]);
        assert_eq!(t.get(ym(2020, 1)), Some(20.0));
        assert_eq!(t.len(), 1);
        assert!(empty.is_empty());
    }
}
