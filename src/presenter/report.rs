// Static report presenter
// Renders every dashboard panel once as plain text, no interaction.

use anyhow::{Context, Result};
use std::io::{self, Write};

use super::format::{bar, money, percent_rounded, truncate};
use super::{Presenter, PresenterKind};
use crate::aggregator::RollingStats;
use crate::dashboard::{Dashboard, Detail};
use crate::error::DashboardError;
use crate::normalizer::{day_label, month_label};
use crate::session::SessionState;

const BAR_WIDTH: usize = 30;

pub struct ReportPresenter<W: Write = io::Stdout> {
    out: W,
}

impl ReportPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        ReportPresenter { out: io::stdout() }
    }
}

impl<W: Write> ReportPresenter<W> {
    pub fn new(out: W) -> Self {
        ReportPresenter { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, dashboard: &Dashboard, session: &SessionState) -> Result<()> {
        if let Some(detail) = session.detail(dashboard) {
            write_detail(&mut self.out, &detail)?;
            return Ok(());
        }

        if session.is_detail() {
            writeln!(self.out, "No record found for the selected point.")?;
            return Ok(());
        }

        heading(&mut self.out, "Personal Finance Dashboard", '=')?;
        write_net_worth_trend(&mut self.out, dashboard)?;
        write_composition(&mut self.out, dashboard)?;
        write_expense_trend(&mut self.out, dashboard)?;
        write_breakdown(&mut self.out, dashboard, session)?;
        write_stats(&mut self.out, &dashboard.stats(session.window))?;
        Ok(())
    }
}

impl<W: Write> Presenter for ReportPresenter<W> {
    fn present(&mut self, dashboard: &Dashboard, session: &mut SessionState) -> Result<()> {
        self.render(dashboard, session)
            .context("Failed to write dashboard report")?;
        self.out.flush().context("Failed to flush dashboard report")?;
        Ok(())
    }

    fn kind(&self) -> PresenterKind {
        PresenterKind::Static
    }
}

fn heading(out: &mut impl Write, title: &str, underline: char) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", underline.to_string().repeat(title.chars().count()))
}

fn write_net_worth_trend(out: &mut impl Write, dashboard: &Dashboard) -> io::Result<()> {
    heading(out, "Net Worth Over Time", '-')?;
    let records = dashboard.net_worth().records();
    let max = records.iter().map(|r| r.net_worth).fold(0.0, f64::max);

    for record in records {
        writeln!(
            out,
            "{:<14} {:>16}  {}",
            day_label(record.date),
            money(record.net_worth),
            bar(record.net_worth, max, BAR_WIDTH)
        )?;
    }
    Ok(())
}

fn write_composition(out: &mut impl Write, dashboard: &Dashboard) -> io::Result<()> {
    heading(out, "Asset Composition Over Time", '-')?;
    let composition = dashboard.composition();

    if composition.assets.is_empty() {
        return writeln!(out, "No asset columns in the net worth data.");
    }

    write!(out, "{:<14}", "Date")?;
    for asset in &composition.assets {
        write!(out, " {:>14}", truncate(asset, 14))?;
    }
    writeln!(out)?;

    for point in &composition.points {
        write!(out, "{:<14}", day_label(point.date))?;
        for value in &point.values {
            write!(out, " {:>14}", money(*value))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_expense_trend(out: &mut impl Write, dashboard: &Dashboard) -> io::Result<()> {
    heading(out, "Monthly Total Expenses", '-')?;
    let records = dashboard.expenses().records();
    let max = records.iter().map(|r| r.total).fold(0.0, f64::max);

    for record in records {
        writeln!(
            out,
            "{:<14} {:>16}  {}",
            month_label(record.date),
            money(record.total),
            bar(record.total, max, BAR_WIDTH)
        )?;
    }
    Ok(())
}

fn write_breakdown(
    out: &mut impl Write,
    dashboard: &Dashboard,
    session: &SessionState,
) -> Result<()> {
    let Some(month) = session.breakdown_month else {
        heading(out, "Expense Breakdown by Category", '-')?;
        writeln!(out, "No expense months available.")?;
        return Ok(());
    };

    heading(out, &format!("Expense Breakdown for {}", month_label(month)), '-')?;

    let breakdown = match dashboard.breakdown(month) {
        Ok(breakdown) => breakdown,
        Err(err @ DashboardError::PeriodNotFound { .. }) => {
            writeln!(out, "{}.", capitalize(&err.to_string()))?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    if breakdown.is_empty() {
        writeln!(out, "No expenses recorded for {}.", month_label(month))?;
        return Ok(());
    }

    let max = breakdown.slices.first().map(|s| s.value).unwrap_or(0.0);
    for slice in &breakdown.slices {
        writeln!(
            out,
            "{:<20} {:>12} {:>5}  {}",
            truncate(&slice.category, 20),
            money(slice.value),
            percent_rounded(slice.percent),
            bar(slice.value, max, BAR_WIDTH)
        )?;
    }
    Ok(())
}

fn write_stats(out: &mut impl Write, stats: &RollingStats) -> io::Result<()> {
    heading(out, "Key Statistics", '-')?;

    if stats.bounds.is_none() {
        return writeln!(
            out,
            "Statistics unavailable: net worth and expense data share no dates."
        );
    }

    if stats.partial_window {
        if let Some(from) = stats.available_from() {
            writeln!(out, "Note: Data only available from {}", month_label(from))?;
        }
    }

    writeln!(out, "Statistics for the {}", stats.window.label().to_lowercase())?;

    // An empty window reports zeros
    let (average, max, min) = stats
        .expenses
        .as_ref()
        .map(|e| (e.average_total, e.max_total, e.min_total))
        .unwrap_or((0.0, 0.0, 0.0));

    writeln!(out, "Average Monthly Expenses: {}", money(average))?;
    writeln!(out, "Total Net Worth Change: {}", money(stats.net_worth.net_change))?;
    writeln!(
        out,
        "Average Monthly Net Worth Change: {}",
        money(stats.net_worth.average_change)
    )?;
    writeln!(out, "Maximum Monthly Expenses: {}", money(max))?;
    writeln!(out, "Minimum Monthly Expenses: {}", money(min))?;

    heading(out, "Top Expense Categories (Average Monthly Spending)", '-')?;
    match &stats.expenses {
        Some(summary) if !summary.top_categories.is_empty() => {
            for category in &summary.top_categories {
                writeln!(out, "{}: {} per month", category.category, money(category.average))?;
            }
        }
        _ => writeln!(out, "No expense data available for the selected time frame.")?,
    }
    Ok(())
}

fn write_detail(out: &mut impl Write, detail: &Detail<'_>) -> io::Result<()> {
    match detail {
        Detail::NetWorth(record) => {
            heading(out, &format!("Detailed View for {}", day_label(record.date)), '=')?;
            writeln!(out, "Net Worth Details")?;
            writeln!(out, "Net Worth: {}", money(record.net_worth))?;
            writeln!(out, "Asset Breakdown:")?;
            for (asset, value) in &record.assets {
                writeln!(out, "  {}: {}", asset, money(*value))?;
            }
            writeln!(out, "Credit Card Balance: {}", money(record.cc_balance))?;
        }
        Detail::Expenses(record) => {
            heading(out, &format!("Detailed View for {}", month_label(record.date)), '=')?;
            writeln!(out, "Expense Details")?;
            writeln!(out, "Total Expenses: {}", money(record.total))?;
            writeln!(out, "Category Breakdown:")?;
            for (category, value) in &record.categories {
                writeln!(out, "  {}: {}", category, money(*value))?;
            }
        }
    }
    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::StatsWindow;
    use crate::dashboard::tests::sample_dashboard;
    use crate::dashboard::SeriesKind;
    use crate::series::TimeSeries;
    use crate::session::SessionEvent;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn render(dashboard: &Dashboard, session: &mut SessionState) -> String {
        let mut presenter = ReportPresenter::new(Vec::new());
        presenter.present(dashboard, session).unwrap();
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_overview_has_every_panel() {
        let dashboard = sample_dashboard();
        let mut session = SessionState::new(&dashboard);

        let text = render(&dashboard, &mut session);

        assert!(text.contains("Personal Finance Dashboard"));
        assert!(text.contains("Net Worth Over Time"));
        assert!(text.contains("Asset Composition Over Time"));
        assert!(text.contains("Monthly Total Expenses"));
        assert!(text.contains("Expense Breakdown for Jun 2024"));
        assert!(text.contains("Statistics for the past 6 months"));
        assert!(text.contains("per month"));
        assert!(text.contains("Jan 31, 2023"));
        assert!(!text.contains("Note: Data only available"));
    }

    #[test]
    fn test_partial_window_notice() {
        let dashboard = sample_dashboard();
        let mut session = SessionState::new(&dashboard).apply(&SessionEvent::WindowSelected {
            window: StatsWindow::TwelveMonths,
        });
        let stats = dashboard.stats(session.window);
        assert!(!stats.partial_window);

        // Four months of data cannot fill a year
        let short = Dashboard::from_series(
            dashboard.config().clone(),
            TimeSeries::from_records(dashboard.net_worth().records()[..4].to_vec()),
            TimeSeries::from_records(dashboard.expenses().records()[..4].to_vec()),
        );
        session.breakdown_month = short.latest_month();

        let text = render(&short, &mut session);

        assert!(text.contains("Note: Data only available from Jan 2023"));
        assert!(text.contains("Statistics for the past year"));
    }

    #[test]
    fn test_missing_breakdown_month_rendered_locally() {
        let dashboard = sample_dashboard();
        let mut session = SessionState::new(&dashboard).apply(&SessionEvent::MonthSelected {
            month: day(2019, 5, 1),
        });

        let text = render(&dashboard, &mut session);

        assert!(text.contains("No expense data recorded for May 2019."));
        assert!(text.contains("Key Statistics"));
    }

    #[test]
    fn test_net_worth_detail_view() {
        let dashboard = sample_dashboard();
        let mut session = SessionState::new(&dashboard).apply(&SessionEvent::PointSelected {
            series: SeriesKind::NetWorth,
            date: day(2023, 1, 31),
        });

        let text = render(&dashboard, &mut session);

        assert!(text.contains("Detailed View for Jan 31, 2023"));
        assert!(text.contains("Net Worth: $106,852.94"));
        assert!(text.contains("  Checking: $4,123.83"));
        assert!(text.contains("Credit Card Balance: -$730.39"));
        assert!(!text.contains("Key Statistics"));
    }

    #[test]
    fn test_expense_detail_view() {
        let dashboard = sample_dashboard();
        let mut session = SessionState::new(&dashboard).apply(&SessionEvent::PointSelected {
            series: SeriesKind::Expenses,
            date: day(2023, 1, 1),
        });

        let text = render(&dashboard, &mut session);

        assert!(text.contains("Detailed View for Jan 2023"));
        assert!(text.contains("Total Expenses: $3,005.63"));
        assert!(text.contains("  Rent: $1,850.00"));
    }

    #[test]
    fn test_detail_for_unknown_point() {
        let dashboard = sample_dashboard();
        let mut session = SessionState::new(&dashboard).apply(&SessionEvent::PointSelected {
            series: SeriesKind::NetWorth,
            date: day(2023, 1, 30),
        });

        let text = render(&dashboard, &mut session);

        assert_eq!(text, "No record found for the selected point.\n");
    }
}
