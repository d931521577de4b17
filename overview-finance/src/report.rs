//! Aggregate tables behind every page of the report.

use anyhow::Result;
use chrono::NaiveDate;
use overview_core::{Category, MonthlySeries, Transaction, TransportCategory, YearMonth};
use serde::Serialize;
use tracing::info;

use crate::average::{AverageWindow, RollingWindow, average, rolling_averages};
use crate::bills::BillSchedule;
use crate::categorizer::{CategorizedTransactions, categorize, categorize_transport};
use crate::category_rules::{CategoryPatterns, RuleSet, TransportPatterns};
use crate::monthly::aggregate;

/// Compiled rules and bill schedule a report run works with.
#[derive(Debug, Clone)]
pub struct ReportRules {
    pub categories: RuleSet<Category>,
    pub transport: RuleSet<TransportCategory>,
    pub bills: BillSchedule,
}

impl ReportRules {
    pub fn compile(
        categories: &CategoryPatterns,
        transport: &TransportPatterns,
        bills: BillSchedule,
    ) -> Result<Self> {
        Ok(Self {
            categories: categories.compile()?,
            transport: transport.compile()?,
            bills,
        })
    }

    pub fn defaults() -> Result<Self> {
        Self::compile(
            &CategoryPatterns::default(),
            &TransportPatterns::default(),
            BillSchedule::default(),
        )
    }
}

/// One bar chart: the monthly series with its overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryChart {
    pub series: MonthlySeries,
    /// All-time average, trimmed or absolute depending on the page
    pub average: i64,
    pub rolling: Vec<RollingWindow>,
}

impl CategoryChart {
    pub fn build(series: MonthlySeries, trimmed: bool, today: NaiveDate) -> Self {
        let average = average(&series, AverageWindow::all_time(today).trimmed(trimmed), today);
        let rolling = rolling_averages(&series, today);
        Self { series, average, rolling }
    }

    pub fn name(&self) -> &str {
        self.series.name()
    }

    pub fn has_data(&self) -> bool {
        !self.series.is_empty()
    }
}

/// A pie slice: trimmed all-time average of one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proportion {
    pub name: String,
    pub average: i64,
}

/// Everything the renderer draws, page by page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub current_month: YearMonth,
    /// Page 1: one chart per category, bills excluded, trimmed averages
    pub categories: Vec<CategoryChart>,
    /// Page 2: stack layers in `Category::REPORT_ORDER`
    pub stacked: Vec<MonthlySeries>,
    /// Page 2: sum of all layers with its overlays
    pub total: CategoryChart,
    /// Page 3
    pub proportions: Vec<Proportion>,
    /// Page 4: transport sub-categories, absolute averages
    pub transport: Vec<CategoryChart>,
}

/// A finished run: the report and the partitions it was built from.
#[derive(Debug, Clone)]
pub struct Overview {
    pub categorized: CategorizedTransactions<Category>,
    pub transport: CategorizedTransactions<TransportCategory>,
    pub report: Report,
}

/// Run the whole pipeline on a transaction stream.
pub fn build_overview(txns: &[Transaction], rules: &ReportRules, today: NaiveDate) -> Overview {
    info!(count = txns.len(), "organise spending into categories");
    let categorized = categorize(txns, &rules.categories);
    let transport = categorize_transport(&categorized, &rules.transport);

    let series: Vec<(Category, MonthlySeries)> = Category::REPORT_ORDER
        .iter()
        .map(|c| (*c, aggregate(&categorized, *c, today, &rules.bills)))
        .collect();

    let categories = series
        .iter()
        .filter(|(c, _)| *c != Category::Bills)
        .map(|(_, s)| CategoryChart::build(s.clone(), true, today))
        .collect();

    let stacked: Vec<MonthlySeries> = series.iter().map(|(_, s)| s.clone()).collect();
    let total_series = MonthlySeries::total("total", stacked.iter().filter(|s| !s.is_empty()));
    let total = CategoryChart::build(total_series, true, today);

    let proportions = stacked
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| Proportion {
            name: s.name().to_string(),
            average: average(s, AverageWindow::all_time(today), today),
        })
        .collect();

    let transport_charts = TransportCategory::CHARTED
        .iter()
        .map(|c| CategoryChart::build(aggregate(&transport, *c, today, &rules.bills), false, today))
        .collect();

    let report = Report {
        current_month: YearMonth::of(today),
        categories,
        stacked,
        total,
        proportions,
        transport: transport_charts,
    };
    info!(
        categories = report.categories.len(),
        transport = report.transport.len(),
        total_average = report.total.average,
        "report tables ready"
    );

    Overview {
        categorized,
        transport,
        report,
    }
}
