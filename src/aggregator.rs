// Aggregator - derived views over the loaded series
//
// Every function here is pure: same series in, same value out. Presenters
// call back into these whenever the selected month or window changes.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::normalizer::month_label;
use crate::series::{ExpenseRecord, NetWorthRecord, TimeSeries};

/// Name of the synthetic bucket holding small categories
pub const OTHER_CATEGORY: &str = "Other";

// ============================================================================
// ASSET COMPOSITION
// ============================================================================

/// Asset values per date, ready for a stacked area chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetComposition {
    /// Stack order, taken from the source column order
    pub assets: Vec<String>,
    pub points: Vec<CompositionPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionPoint {
    pub date: NaiveDate,
    /// One value per entry in `AssetComposition::assets`
    pub values: Vec<f64>,
}

impl AssetComposition {
    /// Values of a single asset over time
    pub fn series_for(&self, asset: &str) -> Option<Vec<(NaiveDate, f64)>> {
        let idx = self.assets.iter().position(|a| a == asset)?;
        Some(
            self.points
                .iter()
                .map(|p| (p.date, p.values.get(idx).copied().unwrap_or(0.0)))
                .collect(),
        )
    }

    /// Running totals in stack order: each asset's line sits on top of the
    /// ones before it, the last line is the sum of all assets.
    pub fn stacked(&self) -> Vec<CompositionPoint> {
        self.points
            .iter()
            .map(|p| {
                let mut running = 0.0;
                let values = (0..self.assets.len())
                    .map(|idx| {
                        running += p.values.get(idx).copied().unwrap_or(0.0);
                        running
                    })
                    .collect();
                CompositionPoint { date: p.date, values }
            })
            .collect()
    }
}

pub fn asset_composition(net_worth: &TimeSeries<NetWorthRecord>) -> AssetComposition {
    let assets: Vec<String> = net_worth
        .records()
        .first()
        .map(|r| r.assets.iter().map(|(name, _)| name.clone()).collect())
        .unwrap_or_default();

    // Looked up by name so rows with other column sets still line up
    let points = net_worth
        .records()
        .iter()
        .map(|r| CompositionPoint {
            date: r.date,
            values: assets.iter().map(|a| r.asset(a).unwrap_or(0.0)).collect(),
        })
        .collect();

    AssetComposition { assets, points }
}

// ============================================================================
// CATEGORY BREAKDOWN
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSlice {
    pub category: String,
    pub value: f64,
    /// Share of `Breakdown::total`, 0-100
    pub percent: f64,
}

/// Category shares for one month, small categories folded into "Other".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub month: NaiveDate,
    pub total: f64,
    /// Sorted by value, largest first
    pub slices: Vec<BreakdownSlice>,
}

impl Breakdown {
    /// An empty breakdown is a valid "no data" result, not an error.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn slice(&self, category: &str) -> Option<&BreakdownSlice> {
        self.slices.iter().find(|s| s.category == category)
    }
}

pub fn category_breakdown(
    expenses: &TimeSeries<ExpenseRecord>,
    month: NaiveDate,
    threshold_percent: f64,
) -> Result<Breakdown> {
    let record = expenses
        .get(month)
        .ok_or_else(|| DashboardError::PeriodNotFound {
            month: month_label(month),
        })?;

    // TOTAL is not among the categories; drop zero spend
    let spent: Vec<(&str, f64)> = record
        .categories
        .iter()
        .filter(|(_, v)| *v > 0.0)
        .map(|(name, v)| (name.as_str(), *v))
        .collect();

    let sum: f64 = spent.iter().map(|(_, v)| v).sum();
    if sum <= 0.0 {
        return Ok(Breakdown {
            month,
            total: 0.0,
            slices: Vec::new(),
        });
    }

    let mut kept: Vec<(String, f64)> = Vec::new();
    let mut small_sum = 0.0;
    let mut small_count = 0;

    for (name, value) in spent {
        if 100.0 * value / sum > threshold_percent {
            kept.push((name.to_string(), value));
        } else {
            small_sum += value;
            small_count += 1;
        }
    }

    if small_count > 0 && small_sum > 0.0 {
        // A real "Other" column absorbs the bucket instead of being replaced
        match kept.iter_mut().find(|(name, _)| name == OTHER_CATEGORY) {
            Some((_, value)) => *value += small_sum,
            None => kept.push((OTHER_CATEGORY.to_string(), small_sum)),
        }
    }

    let total: f64 = kept.iter().map(|(_, v)| v).sum();

    // Stable sort: equal values keep column order
    kept.sort_by(|a, b| b.1.total_cmp(&a.1));

    let slices = kept
        .into_iter()
        .map(|(category, value)| BreakdownSlice {
            percent: 100.0 * value / total,
            category,
            value,
        })
        .collect::<Vec<_>>();

    debug!(month = %month_label(month), slices = slices.len(), small_count, "built category breakdown");

    Ok(Breakdown {
        month,
        total,
        slices,
    })
}

// ============================================================================
// OVERLAP BOUNDS
// ============================================================================

/// Date range covered by both series at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapBounds {
    pub earliest_shared_date: NaiveDate,
    pub latest_shared_date: NaiveDate,
}

/// `None` when either series is empty or their date ranges do not meet.
pub fn overlap_bounds(
    net_worth: &TimeSeries<NetWorthRecord>,
    expenses: &TimeSeries<ExpenseRecord>,
) -> Option<OverlapBounds> {
    let latest = net_worth.last_date()?.min(expenses.last_date()?);
    let earliest = net_worth.first_date()?.max(expenses.first_date()?);

    if earliest > latest {
        return None;
    }

    Some(OverlapBounds {
        earliest_shared_date: earliest,
        latest_shared_date: latest,
    })
}

// ============================================================================
// ROLLING WINDOW STATISTICS
// ============================================================================

/// Trailing window for the statistics panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatsWindow {
    #[default]
    #[serde(rename = "6")]
    SixMonths,
    #[serde(rename = "12")]
    TwelveMonths,
}

impl StatsWindow {
    pub fn months(&self) -> u32 {
        match self {
            StatsWindow::SixMonths => 6,
            StatsWindow::TwelveMonths => 12,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            StatsWindow::SixMonths => "Past 6 months",
            StatsWindow::TwelveMonths => "Past year",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            StatsWindow::SixMonths => StatsWindow::TwelveMonths,
            StatsWindow::TwelveMonths => StatsWindow::SixMonths,
        }
    }
}

impl fmt::Display for StatsWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StatsWindow {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "6" | "6m" | "six" | "past 6 months" => Ok(StatsWindow::SixMonths),
            "12" | "12m" | "1y" | "year" | "past year" => Ok(StatsWindow::TwelveMonths),
            _ => Err(DashboardError::InvalidSelection {
                value: s.to_string(),
                reason: "window must be 6 or 12 months",
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAverage {
    pub category: String,
    pub average: f64,
}

/// Expense figures over the window. Absent when the window holds no months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseSummary {
    pub months: usize,
    pub average_total: f64,
    pub max_total: f64,
    pub min_total: f64,
    /// Mean of every category column, in column order
    pub category_averages: Vec<CategoryAverage>,
    /// Highest averages first, ties in column order
    pub top_categories: Vec<CategoryAverage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NetWorthChange {
    pub points: usize,
    pub net_change: f64,
    pub average_change: f64,
}

/// Statistics for one trailing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingStats {
    pub window: StatsWindow,
    /// `None` when the two series share no dates
    pub bounds: Option<OverlapBounds>,
    pub start: Option<NaiveDate>,
    /// The window reaches back before the earliest shared date
    pub partial_window: bool,
    pub expenses: Option<ExpenseSummary>,
    pub net_worth: NetWorthChange,
}

impl RollingStats {
    fn unavailable(window: StatsWindow) -> Self {
        RollingStats {
            window,
            bounds: None,
            start: None,
            partial_window: true,
            expenses: None,
            net_worth: NetWorthChange::default(),
        }
    }

    /// Month from which data is actually available, for the partial notice
    pub fn available_from(&self) -> Option<NaiveDate> {
        self.bounds.map(|b| b.earliest_shared_date)
    }
}

pub fn rolling_stats(
    net_worth: &TimeSeries<NetWorthRecord>,
    expenses: &TimeSeries<ExpenseRecord>,
    window: StatsWindow,
    top_n: usize,
) -> RollingStats {
    let Some(bounds) = overlap_bounds(net_worth, expenses) else {
        debug!(window = %window, "series do not overlap, statistics unavailable");
        return RollingStats::unavailable(window);
    };

    // Calendar months; the day clamps to the end of shorter months
    let start = bounds
        .latest_shared_date
        .checked_sub_months(Months::new(window.months()))
        .unwrap_or(NaiveDate::MIN);

    let partial_window = start < bounds.earliest_shared_date;
    if partial_window {
        debug!(
            window = %window,
            start = %start,
            available_from = %bounds.earliest_shared_date,
            "window reaches before shared data"
        );
    }

    RollingStats {
        window,
        bounds: Some(bounds),
        start: Some(start),
        partial_window,
        expenses: expense_summary(expenses.since(start), top_n),
        net_worth: net_worth_change(net_worth.since(start)),
    }
}

fn expense_summary(window: &[ExpenseRecord], top_n: usize) -> Option<ExpenseSummary> {
    if window.is_empty() {
        return None;
    }

    let n = window.len() as f64;
    let totals = window.iter().map(|r| r.total);
    let average_total = totals.clone().sum::<f64>() / n;
    let max_total = totals.clone().fold(f64::NEG_INFINITY, f64::max);
    let min_total = totals.fold(f64::INFINITY, f64::min);

    // Columns come from the first row; a month without one counts as zero
    let category_averages: Vec<CategoryAverage> = window[0]
        .categories
        .iter()
        .map(|(name, _)| CategoryAverage {
            category: name.clone(),
            average: window.iter().filter_map(|r| r.category(name)).sum::<f64>() / n,
        })
        .collect();

    let mut top_categories = category_averages.clone();
    top_categories.sort_by(|a, b| b.average.total_cmp(&a.average));
    top_categories.truncate(top_n);

    Some(ExpenseSummary {
        months: window.len(),
        average_total,
        max_total,
        min_total,
        category_averages,
        top_categories,
    })
}

fn net_worth_change(window: &[NetWorthRecord]) -> NetWorthChange {
    if window.len() < 2 {
        return NetWorthChange {
            points: window.len(),
            ..NetWorthChange::default()
        };
    }

    let diffs: Vec<f64> = window
        .windows(2)
        .map(|pair| pair[1].net_worth - pair[0].net_worth)
        .collect();

    NetWorthChange {
        points: window.len(),
        net_change: window[window.len() - 1].net_worth - window[0].net_worth,
        average_change: diffs.iter().sum::<f64>() / diffs.len() as f64,
    }
}
