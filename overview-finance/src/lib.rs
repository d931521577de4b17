//! overview-finance: category rules, categorizer, monthly aggregation, bill
//! schedule and averages behind the spending report

pub mod average;
pub mod bills;
pub mod categorizer;
pub mod category_rules;
pub mod monthly;
pub mod report;

pub use average::{AverageWindow, ROLLING_MONTHS, RollingWindow, average, rolling_averages};
pub use bills::{BillEntry, BillSchedule};
pub use categorizer::{CategorizedTransactions, categorize, categorize_transport};
pub use category_rules::{CategoryPatterns, RuleSet, TransportPatterns};
pub use monthly::{aggregate, month_range};
pub use report::{CategoryChart, Overview, Proportion, Report, ReportRules, build_overview};
