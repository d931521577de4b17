//! Robust monthly averages over a date window.

use chrono::{Months, NaiveDate};
use overview_core::{MonthlySeries, YearMonth};
use serde::{Deserialize, Serialize};

/// Length of each window of the rolling overlay
pub const ROLLING_MONTHS: u32 = 6;

/// Which part of a series to average and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AverageWindow {
    /// Months back from `as_of`; 0 means the whole series
    pub months: u32,
    pub as_of: NaiveDate,
    /// Drop the highest month, the lowest month and every zero month
    pub trimmed: bool,
}

impl AverageWindow {
    /// Trimmed average of the whole series up to `as_of`.
    pub fn all_time(as_of: NaiveDate) -> Self {
        Self { months: 0, as_of, trimmed: true }
    }

    /// Non-trimmed average of the `months` months before `as_of`.
    pub fn last(months: u32, as_of: NaiveDate) -> Self {
        Self { months, as_of, trimmed: false }
    }

    pub fn trimmed(self, trimmed: bool) -> Self {
        Self { trimmed, ..self }
    }
}

/// Mean monthly amount of `series` over `window`, truncated to a whole unit.
///
/// The month of `today` is never averaged: it is not over yet. Returns 0 when
/// nothing is left to average.
pub fn average(series: &MonthlySeries, window: AverageWindow, today: NaiveDate) -> i64 {
    let Some(first) = series.first_month() else {
        return 0;
    };
    let series_start = first.first_day();

    let lower = if window.months > 0 {
        window
            .as_of
            .checked_sub_months(Months::new(window.months))
            .map_or(series_start, |d| d.max(series_start))
    } else {
        series_start
    };

    let mut kept: Vec<(YearMonth, f64)> = series
        .points()
        .iter()
        .filter(|p| {
            let start = p.month.first_day();
            start >= lower && start <= window.as_of
        })
        .map(|p| (p.month, p.amount))
        .collect();

    if window.trimmed {
        remove_extreme(&mut kept, |a, b| a.total_cmp(&b).is_gt());
        remove_extreme(&mut kept, |a, b| a.total_cmp(&b).is_lt());
        kept.retain(|(_, amount)| *amount != 0.0);
    }

    let current = YearMonth::of(today);
    kept.retain(|(month, _)| *month != current);

    if kept.is_empty() {
        return 0;
    }
    let mean = kept.iter().map(|(_, a)| a).sum::<f64>() / kept.len() as f64;
    mean.trunc() as i64
}

/// Remove the first entry for which `better` holds against every other.
fn remove_extreme(values: &mut Vec<(YearMonth, f64)>, better: impl Fn(f64, f64) -> bool) {
    let mut best: Option<usize> = None;
    for (i, (_, v)) in values.iter().enumerate() {
        match best {
            Some(b) if !better(*v, values[b].1) => {}
            _ => best = Some(i),
        }
    }
    if let Some(i) = best {
        values.remove(i);
    }
}

/// One step of the rolling overlay: the non-trimmed average of the window
/// ending at `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub average: i64,
}

/// Successive 6-month averages walking back from the end of last month until
/// the start of the series. The oldest window is clamped to the series start.
pub fn rolling_averages(series: &MonthlySeries, today: NaiveDate) -> Vec<RollingWindow> {
    let Some(first) = series.first_month() else {
        return Vec::new();
    };
    let series_start = first.first_day();

    let mut end = YearMonth::of(today).pred().last_day();
    if end < series_start {
        // the series starts this month, nothing complete to average
        return Vec::new();
    }

    let mut out = Vec::new();
    loop {
        let avg = average(series, AverageWindow::last(ROLLING_MONTHS, end), today);
        match end.checked_sub_months(Months::new(ROLLING_MONTHS)) {
            Some(next) if next > series_start => {
                out.push(RollingWindow { start: next, end, average: avg });
                end = next;
            }
            _ => {
                out.push(RollingWindow { start: series_start, end, average: avg });
                break;
            }
        }
    }
    out
}
