// Dashboard - one session's loaded, read-only copy of both series
//
// Loader → Normalizer runs once in `Dashboard::load`; everything after that
// borrows the series immutably. Sessions never share a Dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::aggregator::{
    asset_composition, category_breakdown, overlap_bounds, rolling_stats, AssetComposition,
    Breakdown, OverlapBounds, RollingStats, StatsWindow,
};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::loader::load_inputs;
use crate::normalizer::{month_label, month_start, normalize_expenses, normalize_net_worth};
use crate::series::{ExpenseRecord, NetWorthRecord, TimeSeries};

/// Which of the two series a selection points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    NetWorth,
    Expenses,
}

/// The record behind a selected chart point, shown verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "series", content = "record", rename_all = "snake_case")]
pub enum Detail<'a> {
    NetWorth(&'a NetWorthRecord),
    Expenses(&'a ExpenseRecord),
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    net_worth: TimeSeries<NetWorthRecord>,
    expenses: TimeSeries<ExpenseRecord>,
    bounds: Option<OverlapBounds>,
}

impl Dashboard {
    /// Load and normalize both inputs. Any failure aborts the session.
    pub fn load(config: &DashboardConfig) -> Result<Self> {
        let (raw_net_worth, raw_expenses) = load_inputs(config)?;
        let net_worth = normalize_net_worth(&raw_net_worth)?;
        let expenses = normalize_expenses(&raw_expenses)?;

        let dashboard = Self::from_series(config.clone(), net_worth, expenses);
        info!(
            net_worth_records = dashboard.net_worth.len(),
            expense_months = dashboard.expenses.len(),
            "dashboard data loaded"
        );
        Ok(dashboard)
    }

    pub fn from_series(
        config: DashboardConfig,
        net_worth: TimeSeries<NetWorthRecord>,
        expenses: TimeSeries<ExpenseRecord>,
    ) -> Self {
        let bounds = overlap_bounds(&net_worth, &expenses);
        if bounds.is_none() {
            warn!("net worth and expense data do not cover any common dates");
        }

        Dashboard {
            config,
            net_worth,
            expenses,
            bounds,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn net_worth(&self) -> &TimeSeries<NetWorthRecord> {
        &self.net_worth
    }

    pub fn expenses(&self) -> &TimeSeries<ExpenseRecord> {
        &self.expenses
    }

    pub fn bounds(&self) -> Option<OverlapBounds> {
        self.bounds
    }

    pub fn composition(&self) -> AssetComposition {
        asset_composition(&self.net_worth)
    }

    pub fn breakdown(&self, month: NaiveDate) -> Result<Breakdown> {
        category_breakdown(&self.expenses, month, self.config.other_threshold_percent)
    }

    pub fn stats(&self, window: StatsWindow) -> RollingStats {
        rolling_stats(&self.net_worth, &self.expenses, window, self.config.top_categories)
    }

    /// Months a user may pick for the breakdown, as "Mon YYYY" labels
    pub fn month_options(&self) -> Vec<String> {
        self.expenses.dates().map(month_label).collect()
    }

    /// Default breakdown month: the latest one recorded
    pub fn latest_month(&self) -> Option<NaiveDate> {
        self.expenses.last_date()
    }

    /// Neighbouring expense month, for slider-style navigation
    pub fn step_month(&self, from: NaiveDate, forward: bool) -> Option<NaiveDate> {
        let idx = self.expenses.position(from)?;
        let next = if forward { idx + 1 } else { idx.checked_sub(1)? };
        self.expenses.records().get(next).map(|r| r.date)
    }

    /// Look up the record behind a selected point.
    pub fn detail(&self, series: SeriesKind, date: NaiveDate) -> Option<Detail<'_>> {
        match series {
            SeriesKind::NetWorth => self.net_worth.get(date).map(Detail::NetWorth),
            SeriesKind::Expenses => self.expenses.get(month_start(date)).map(Detail::Expenses),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::DashboardError;
    use std::path::PathBuf;

    pub(crate) fn sample_config() -> DashboardConfig {
        let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
        DashboardConfig::new(
            data.join("net_worth_example.csv"),
            data.join("expenses_example.csv"),
        )
    }

    pub(crate) fn sample_dashboard() -> Dashboard {
        Dashboard::load(&sample_config()).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_load_sample_data() {
        let dashboard = sample_dashboard();

        assert_eq!(dashboard.net_worth().len(), 18);
        assert_eq!(dashboard.expenses().len(), 18);

        let dates: Vec<_> = dashboard.net_worth().dates().collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));

        let bounds = dashboard.bounds().unwrap();
        assert_eq!(bounds.earliest_shared_date, day(2023, 1, 31));
        assert_eq!(bounds.latest_shared_date, day(2024, 6, 1));
    }

    #[test]
    fn test_month_options_and_navigation() {
        let dashboard = sample_dashboard();

        let options = dashboard.month_options();
        assert_eq!(options.first().unwrap(), "Jan 2023");
        assert_eq!(options.last().unwrap(), "Jun 2024");

        let latest = dashboard.latest_month().unwrap();
        assert_eq!(latest, day(2024, 6, 1));
        assert_eq!(dashboard.step_month(latest, true), None);
        assert_eq!(dashboard.step_month(latest, false), Some(day(2024, 5, 1)));
        assert_eq!(dashboard.step_month(day(2023, 1, 1), false), None);
    }

    #[test]
    fn test_sample_breakdown_and_stats() {
        let dashboard = sample_dashboard();

        let breakdown = dashboard.breakdown(day(2024, 6, 1)).unwrap();
        assert!(!breakdown.is_empty());
        let percent: f64 = breakdown.slices.iter().map(|s| s.percent).sum();
        assert!((percent - 100.0).abs() < 1e-9);
        assert!(breakdown.slices.windows(2).all(|w| w[0].value >= w[1].value));

        let stats = dashboard.stats(StatsWindow::TwelveMonths);
        assert!(!stats.partial_window);
        assert_eq!(stats.expenses.unwrap().top_categories.len(), 5);
    }

    #[test]
    fn test_breakdown_for_unknown_month() {
        let dashboard = sample_dashboard();

        let result = dashboard.breakdown(day(2019, 1, 1));

        assert!(matches!(result, Err(DashboardError::PeriodNotFound { .. })));
    }

    #[test]
    fn test_detail_lookup() {
        let dashboard = sample_dashboard();

        match dashboard.detail(SeriesKind::NetWorth, day(2024, 1, 31)) {
            Some(Detail::NetWorth(record)) => assert_eq!(record.date, day(2024, 1, 31)),
            other => panic!("expected net worth detail, got {:?}", other),
        }

        // Any day inside a month resolves to that month's expense record
        match dashboard.detail(SeriesKind::Expenses, day(2024, 1, 17)) {
            Some(Detail::Expenses(record)) => assert_eq!(record.date, day(2024, 1, 1)),
            other => panic!("expected expense detail, got {:?}", other),
        }

        assert!(dashboard.detail(SeriesKind::NetWorth, day(2024, 1, 30)).is_none());
    }

    #[test]
    fn test_sessions_load_independent_copies() {
        let first = sample_dashboard();
        let second = Dashboard::load(first.config()).unwrap();

        assert_eq!(first.net_worth(), second.net_worth());
        assert!(!std::ptr::eq(first.net_worth().records(), second.net_worth().records()));
    }
}
