use anyhow::Result;
use overview_core::{Category, CategoryKey};
use overview_finance::CategorizedTransactions;
use std::io::{self, Write};

pub const ACCEPTED: &str = "groceries, transport, restaurant, coffee, bar, bills, misc, all";

/// Categories named on the command line. `all` selects every category and
/// nothing selects misc. Every name is checked, so an unknown one fails even
/// next to `all`.
pub fn select_categories(names: &[String]) -> Result<Vec<Category>> {
    if names.is_empty() {
        return Ok(vec![Category::Misc]);
    }

    let mut all = false;
    let mut out = Vec::new();
    for name in names {
        if name.trim().eq_ignore_ascii_case("all") {
            all = true;
            continue;
        }
        let c: Category = name.parse()?;
        if !out.contains(&c) {
            out.push(c);
        }
    }

    if all {
        return Ok(Category::REPORT_ORDER.to_vec());
    }
    Ok(out)
}

pub fn usage(unknown: &str) -> String {
    format!(
        "'{unknown}': unknown category. Accepted: {ACCEPTED}\n\
         e.g. overview debug bar coffee"
    )
}

/// Row-level listing of each selected category, oldest first.
pub fn write_listing<W: Write>(
    out: &mut W,
    categorized: &CategorizedTransactions<Category>,
    selection: &[Category],
) -> io::Result<()> {
    for c in selection {
        let rows = categorized.sorted_by_date(*c);
        writeln!(out, "--- {} ({} rows) ---", c.name(), rows.len())?;
        for t in &rows {
            writeln!(out, "{}  {:<48}  {:>10.2}", t.date, t.place, t.amount)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use overview_core::{OverviewError, Transaction};
    use overview_finance::{CategoryPatterns, categorize};

    fn names(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_argument_selects_misc() {
        assert_eq!(select_categories(&[]).unwrap(), vec![Category::Misc]);
    }

    #[test]
    fn test_names_keep_order_without_duplicates() {
        let got = select_categories(&names(&["bar", "Coffee", "bar"])).unwrap();
        assert_eq!(got, vec![Category::Bar, Category::Coffee]);
    }

    #[test]
    fn test_all_selects_every_category() {
        let got = select_categories(&names(&["coffee", "ALL"])).unwrap();
        assert_eq!(got, Category::REPORT_ORDER.to_vec());
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = select_categories(&names(&["all", "shopping"])).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<OverviewError>(),
            Some(OverviewError::UnknownCategory(name)) if name == "shopping"
        ));
        assert!(usage("shopping").contains(ACCEPTED));
    }

    #[test]
    fn test_listing_is_sorted_by_date() {
        let d = |m, day| NaiveDate::from_ymd_opt(2021, m, day).unwrap();
        let txns = vec![
            Transaction::new(d(3, 9), "AMAZON.CA", 20.0),
            Transaction::new(d(1, 2), "BEST BUY", 199.99),
            Transaction::new(d(2, 2), "IGA", 10.0),
        ];
        let categorized = categorize(&txns, &CategoryPatterns::default().compile().unwrap());

        let mut buf = Vec::new();
        write_listing(&mut buf, &categorized, &[Category::Misc]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("--- misc (2 rows) ---"));
        let best_buy = text.find("BEST BUY").unwrap();
        let amazon = text.find("AMAZON.CA").unwrap();
        assert!(best_buy < amazon);
        assert!(text.contains("199.99"));
        assert!(!text.contains("IGA"));
    }
}
