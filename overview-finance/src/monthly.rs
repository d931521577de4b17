//! Monthly aggregation of categorized transactions.

use chrono::NaiveDate;
use overview_core::{CategoryKey, MonthlySeries, YearMonth};
use tracing::debug;

use crate::bills::BillSchedule;
use crate::categorizer::CategorizedTransactions;

/// Month range shared by every series of a categorized dataset: from the
/// month of its earliest transaction (all categories together) to the month
/// of `today`. `None` when the dataset is empty.
pub fn month_range<K: CategoryKey>(
    categorized: &CategorizedTransactions<K>,
    today: NaiveDate,
) -> Option<(YearMonth, YearMonth)> {
    let end = YearMonth::of(today);
    let start = YearMonth::of(categorized.earliest_date()?).min(end);
    Some((start, end))
}

/// Sum `category`'s transactions per month over the dataset's month range.
///
/// The series has an entry for every month, zero when nothing was spent. A
/// category without transactions yields an empty series, except the one that
/// carries bills: its schedule is added month by month on top of whatever
/// the statements hold.
pub fn aggregate<K: CategoryKey>(
    categorized: &CategorizedTransactions<K>,
    category: K,
    today: NaiveDate,
    bills: &BillSchedule,
) -> MonthlySeries {
    let name = category.name();
    debug!(category = name, "extract monthly spending");

    let Some((start, end)) = month_range(categorized, today) else {
        return MonthlySeries::empty(name);
    };

    let txns = categorized.get(category);
    if txns.is_empty() && !category.carries_bills() {
        return MonthlySeries::empty(name);
    }

    let mut series = MonthlySeries::zero_filled(name, start, end);
    for t in txns {
        // transactions dated after today fall outside the range
        series.add_to_month(t.month(), t.amount);
    }

    if category.carries_bills() {
        series.merge(&bills.series(name, start, end));
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorizer::categorize;
    use crate::category_rules::CategoryPatterns;
    use crate::bills::BillEntry;
    use overview_core::{Category, Transaction};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ym(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    fn categorized(txns: &[Transaction]) -> CategorizedTransactions<Category> {
        categorize(txns, &CategoryPatterns::default().compile().unwrap())
    }

    #[test]
    fn test_range_spans_whole_dataset_to_today() {
        let c = categorized(&[
            Transaction::new(date(2021, 3, 10), "IGA", 20.0),
            Transaction::new(date(2020, 11, 2), "STARBUCKS", 5.0),
        ]);
        assert_eq!(month_range(&c, date(2021, 5, 17)), Some((ym(2020, 11), ym(2021, 5))));
    }

    #[test]
    fn test_gap_free_with_zero_months() {
        let c = categorized(&[
            Transaction::new(date(2021, 3, 10), "IGA", 20.0),
            Transaction::new(date(2021, 3, 28), "IGA", 30.0),
            Transaction::new(date(2020, 11, 2), "STARBUCKS", 5.0),
        ]);
        let today = date(2021, 5, 17);

        let groceries = aggregate(&c, Category::Groceries, today, &BillSchedule::none());
        let months: Vec<_> = groceries.points().iter().map(|p| p.month).collect();
        assert_eq!(months, YearMonth::range_inclusive(ym(2020, 11), ym(2021, 5)).collect::<Vec<_>>());
        assert_eq!(groceries.get(ym(2021, 3)), Some(50.0));
        assert_eq!(groceries.get(ym(2020, 11)), Some(0.0));
        assert_eq!(groceries.get(ym(2021, 5)), Some(0.0));

        // coffee is aligned on the same axis
        let coffee = aggregate(&c, Category::Coffee, today, &BillSchedule::none());
        assert_eq!(coffee.first_month(), groceries.first_month());
        assert_eq!(coffee.len(), groceries.len());
    }

    #[test]
    fn test_single_transaction_fills_every_month() {
        let c = categorized(&[Transaction::new(date(2021, 3, 4), "JJ BEAN", 4.0)]);
        let coffee = aggregate(&c, Category::Coffee, date(2021, 9, 1), &BillSchedule::none());
        assert_eq!(coffee.len(), 7);
        assert_eq!(coffee.points().iter().filter(|p| p.amount == 0.0).count(), 6);
    }

    #[test]
    fn test_empty_category_is_marked_empty() {
        let c = categorized(&[Transaction::new(date(2021, 3, 4), "IGA", 4.0)]);
        let bar = aggregate(&c, Category::Bar, date(2021, 9, 1), &BillSchedule::default());
        assert!(bar.is_empty());
        assert_eq!(bar.name(), "bar");
    }

    #[test]
    fn test_bills_are_added_not_replaced() {
        let c = categorized(&[
            Transaction::new(date(2019, 6, 12), "FIDO MOBILE", 50.0),
            Transaction::new(date(2019, 5, 3), "IGA", 10.0),
        ]);
        let rent = BillSchedule::new(vec![BillEntry::new("rent", ym(2019, 6), None, 1000.0)]);
        let bills = aggregate(&c, Category::Bills, date(2019, 8, 2), &rent);

        assert_eq!(bills.get(ym(2019, 5)), Some(0.0));
        assert_eq!(bills.get(ym(2019, 6)), Some(1050.0));
        assert_eq!(bills.get(ym(2019, 7)), Some(1000.0));
        assert_eq!(bills.len(), 3);
    }

    #[test]
    fn test_bills_without_transactions_still_get_schedule() {
        let c = categorized(&[Transaction::new(date(2020, 12, 1), "IGA", 10.0)]);
        let bills = aggregate(&c, Category::Bills, date(2021, 1, 20), &BillSchedule::default());
        assert_eq!(bills.get(ym(2020, 12)), Some(1750.0 + 96.0));
        assert_eq!(bills.get(ym(2021, 1)), Some(1750.0 + 96.0));
    }

    #[test]
    fn test_empty_dataset_gives_empty_series() {
        let c = categorized(&[]);
        let bills = aggregate(&c, Category::Bills, date(2021, 1, 20), &BillSchedule::default());
        assert!(bills.is_empty());
    }

    #[test]
    fn test_future_rows_are_outside_range() {
        let c = categorized(&[
            Transaction::new(date(2021, 1, 5), "IGA", 10.0),
            Transaction::new(date(2021, 4, 5), "IGA", 99.0),
        ]);
        let g = aggregate(&c, Category::Groceries, date(2021, 2, 1), &BillSchedule::none());
        assert_eq!(g.last_month(), Some(ym(2021, 2)));
        assert_eq!(g.points().iter().map(|p| p.amount).sum::<f64>(), 10.0);
    }
}
