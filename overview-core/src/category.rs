//! Spending categories: the top-level set and the transport sub-categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::OverviewError;

/// A closed set of categories a categorizer can partition transactions into.
///
/// `RULE_ORDER` lists the categories matched by pattern, in priority order.
/// The catch-all never has patterns of its own; it receives whatever no rule
/// claimed.
pub trait CategoryKey: Copy + Ord + Eq + Hash + fmt::Debug + 'static {
    /// Every category, in declaration order
    const ALL: &'static [Self];
    /// Categories evaluated by pattern, highest priority first
    const RULE_ORDER: &'static [Self];

    fn catch_all() -> Self;

    fn name(&self) -> &'static str;

    /// Whether synthetic recurring bills are merged into this category's series
    fn carries_bills(&self) -> bool {
        false
    }
}

/// Top-level spending categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Groceries,
    Transport,
    Restaurant,
    Coffee,
    Bar,
    Bills,
    Misc,
}

impl Category {
    /// Order used by the stacked and pie charts (bills at the bottom of the stack)
    pub const REPORT_ORDER: [Category; 7] = [
        Category::Bills,
        Category::Groceries,
        Category::Transport,
        Category::Restaurant,
        Category::Coffee,
        Category::Bar,
        Category::Misc,
    ];
}

impl CategoryKey for Category {
    const ALL: &'static [Self] = &[
        Category::Groceries,
        Category::Transport,
        Category::Restaurant,
        Category::Coffee,
        Category::Bar,
        Category::Bills,
        Category::Misc,
    ];

    const RULE_ORDER: &'static [Self] = &[
        Category::Groceries,
        Category::Transport,
        Category::Restaurant,
        Category::Coffee,
        Category::Bar,
        Category::Bills,
    ];

    fn catch_all() -> Self {
        Category::Misc
    }

    fn name(&self) -> &'static str {
        match self {
            Category::Groceries => "groceries",
            Category::Transport => "transport",
            Category::Restaurant => "restaurant",
            Category::Coffee => "coffee",
            Category::Bar => "bar",
            Category::Bills => "bills",
            Category::Misc => "misc",
        }
    }

    fn carries_bills(&self) -> bool {
        matches!(self, Category::Bills)
    }
}

impl FromStr for Category {
    type Err = OverviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.name() == lower)
            .ok_or_else(|| OverviewError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Finer split of the transport category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransportCategory {
    Carshare,
    Rental,
    Cab,
    Translink,
    Misc,
    Car,
}

impl TransportCategory {
    /// Sub-categories that get a chart; transport misc is left out
    pub const CHARTED: [TransportCategory; 5] = [
        TransportCategory::Carshare,
        TransportCategory::Rental,
        TransportCategory::Cab,
        TransportCategory::Translink,
        TransportCategory::Car,
    ];
}

impl CategoryKey for TransportCategory {
    const ALL: &'static [Self] = &[
        TransportCategory::Carshare,
        TransportCategory::Rental,
        TransportCategory::Cab,
        TransportCategory::Translink,
        TransportCategory::Misc,
        TransportCategory::Car,
    ];

    // misc has patterns of its own and is also the fallback
    const RULE_ORDER: &'static [Self] = Self::ALL;

    fn catch_all() -> Self {
        TransportCategory::Misc
    }

    fn name(&self) -> &'static str {
        match self {
            TransportCategory::Carshare => "carshare",
            TransportCategory::Rental => "rental",
            TransportCategory::Cab => "cab",
            TransportCategory::Translink => "translink",
            TransportCategory::Misc => "transport misc",
            TransportCategory::Car => "car",
        }
    }
}

impl fmt::Display for TransportCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_names() {
        assert_eq!("groceries".parse::<Category>().unwrap(), Category::Groceries);
        assert_eq!("Coffee".parse::<Category>().unwrap(), Category::Coffee);
        assert_eq!(" BILLS ".parse::<Category>().unwrap(), Category::Bills);
        let err = "fuel".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("fuel"));
    }

    #[test]
    fn test_catch_all_not_in_top_level_rules() {
        assert!(!Category::RULE_ORDER.contains(&Category::catch_all()));
        assert_eq!(Category::RULE_ORDER.len() + 1, Category::ALL.len());
    }

    #[test]
    fn test_transport_misc_is_matched_and_fallback() {
        assert!(TransportCategory::RULE_ORDER.contains(&TransportCategory::catch_all()));
        assert!(!TransportCategory::CHARTED.contains(&TransportCategory::Misc));
    }

    #[test]
    fn test_only_bills_carries_bills() {
        let carrying: Vec<_> = Category::ALL.iter().filter(|c| c.carries_bills()).collect();
        assert_eq!(carrying, vec![&Category::Bills]);
        assert!(TransportCategory::ALL.iter().all(|c| !c.carries_bills()));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Restaurant).unwrap(), "\"restaurant\"");
        assert_eq!(serde_json::to_string(&TransportCategory::Translink).unwrap(), "\"translink\"");
    }
}
