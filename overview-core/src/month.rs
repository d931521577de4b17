//! Calendar month arithmetic used to bucket transactions.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OverviewError;

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A (year, month) pair. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("day 1 of a validated month always exists")
    }

    pub fn last_day(&self) -> NaiveDate {
        self.succ().first_day() - Days::new(1)
    }

    pub fn succ(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn pred(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    /// True if `date` falls inside this month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::of(date) == *self
    }

    /// Every month from `start` to `end`, both included. Empty if `start > end`.
    pub fn range_inclusive(start: YearMonth, end: YearMonth) -> impl Iterator<Item = YearMonth> {
        std::iter::successors(Some(start), |m| Some(m.succ())).take_while(move |m| *m <= end)
    }

    /// Chart label, e.g. "Mar 2021".
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_ABBR[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = OverviewError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || OverviewError::InvalidMonth(s.to_string());
        let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = OverviewError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<YearMonth> for String {
    fn from(m: YearMonth) -> Self {
        m.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn test_succ_pred_wrap_years() {
        assert_eq!(ym(2020, 12).succ(), ym(2021, 1));
        assert_eq!(ym(2021, 1).pred(), ym(2020, 12));
        assert_eq!(ym(2021, 6).succ().pred(), ym(2021, 6));
    }

    #[test]
    fn test_range_inclusive_crosses_year() {
        let months: Vec<_> = YearMonth::range_inclusive(ym(2020, 11), ym(2021, 2)).collect();
        assert_eq!(months, vec![ym(2020, 11), ym(2020, 12), ym(2021, 1), ym(2021, 2)]);

        assert_eq!(YearMonth::range_inclusive(ym(2021, 3), ym(2021, 2)).count(), 0);
        assert_eq!(YearMonth::range_inclusive(ym(2021, 3), ym(2021, 3)).count(), 1);
    }

    #[test]
    fn test_first_and_last_day() {
        assert_eq!(ym(2024, 2).last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(ym(2021, 12).first_day(), NaiveDate::from_ymd_opt(2021, 12, 1).unwrap());
        assert!(ym(2021, 12).contains(NaiveDate::from_ymd_opt(2021, 12, 31).unwrap()));
    }

    #[test]
    fn test_parse_and_display() {
        let m: YearMonth = "2018-12".parse().unwrap();
        assert_eq!(m, ym(2018, 12));
        assert_eq!(m.to_string(), "2018-12");
        assert_eq!(m.label(), "Dec 2018");
        assert!("2018-13".parse::<YearMonth>().is_err());
        assert!("201812".parse::<YearMonth>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&ym(2020, 3)).unwrap();
        assert_eq!(json, "\"2020-03\"");
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym(2020, 3));
    }
}
