// Normalizer - raw tables into typed, date-keyed time series
//
// Every failure here is fatal for the session: a half-parsed column would
// quietly skew every statistic computed from it.

use chrono::{Datelike, NaiveDate};
use tracing::{debug, warn};

use crate::config::{InputKind, CC_BALANCE_COLUMN, DATE_COLUMN, NET_WORTH_COLUMN, TOTAL_COLUMN};
use crate::error::{DashboardError, Result};
use crate::loader::{RawRow, RawTable};
use crate::series::{ExpenseRecord, NetWorthRecord, TimeSeries};

/// Display format for month keys, e.g. "Aug 2022"
pub const MONTH_LABEL_FORMAT: &str = "%b %Y";

/// Display format for net worth dates, e.g. "Jan 31, 2024"
pub const DAY_LABEL_FORMAT: &str = "%b %d, %Y";

/// Strip currency decoration and parse what is left.
///
/// Removes `$`, comma group separators and stray `"` characters:
/// `"$1,234.56"` → `1234.56`, `"-$80.00"` → `-80.0`.
pub fn parse_currency(raw: &str) -> std::result::Result<f64, &'static str> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '"'))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err("empty cell");
    }

    let value: f64 = cleaned.parse().map_err(|_| "not a number")?;
    if !value.is_finite() {
        return Err("not a finite number");
    }

    Ok(value)
}

/// Parse a net worth date like "Jan 31, 2024".
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), InputKind::NetWorth.date_format()).ok()
}

/// Parse an expense month like "Aug '22" to the first of that month.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    // chrono needs a day to build a date
    let with_day = format!("01 {}", raw.trim());
    let format = format!("%d {}", InputKind::Expenses.date_format());
    NaiveDate::parse_from_str(&with_day, &format).ok()
}

/// Parse a month selector label, "Aug 2022" or the source form "Aug '22".
pub fn parse_month_label(raw: &str) -> Result<NaiveDate> {
    let with_day = format!("01 {}", raw.trim());
    NaiveDate::parse_from_str(&with_day, &format!("%d {}", MONTH_LABEL_FORMAT))
        .ok()
        .or_else(|| parse_month(raw))
        .ok_or_else(|| DashboardError::InvalidSelection {
            value: raw.to_string(),
            reason: "expected a month like \"Aug 2022\"",
        })
}

/// First day of the month containing `date`.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_label(date: NaiveDate) -> String {
    date.format(MONTH_LABEL_FORMAT).to_string()
}

pub fn day_label(date: NaiveDate) -> String {
    date.format(DAY_LABEL_FORMAT).to_string()
}

pub fn normalize_net_worth(table: &RawTable) -> Result<TimeSeries<NetWorthRecord>> {
    let date_idx = require_column(table, DATE_COLUMN)?;
    let total_idx = require_column(table, NET_WORTH_COLUMN)?;
    let cc_idx = require_column(table, CC_BALANCE_COLUMN)?;

    let asset_columns: Vec<usize> = (0..table.headers.len())
        .filter(|i| ![date_idx, total_idx, cc_idx].contains(i))
        .collect();

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let date = cell_date(table, row, date_idx, parse_day)?;
        let net_worth = cell_value(table, row, total_idx)?;
        let cc_balance = cell_value(table, row, cc_idx)?;

        let mut assets = Vec::with_capacity(asset_columns.len());
        for &idx in &asset_columns {
            assets.push((table.headers[idx].clone(), cell_value(table, row, idx)?));
        }

        records.push(NetWorthRecord {
            date,
            net_worth,
            assets,
            cc_balance,
        });
    }

    let series = TimeSeries::from_records(records);
    debug!(records = series.len(), assets = asset_columns.len(), "normalized net worth series");
    Ok(series)
}

pub fn normalize_expenses(table: &RawTable) -> Result<TimeSeries<ExpenseRecord>> {
    let date_idx = require_column(table, DATE_COLUMN)?;
    let total_idx = require_column(table, TOTAL_COLUMN)?;

    let category_columns: Vec<usize> = (0..table.headers.len())
        .filter(|&i| i != date_idx && i != total_idx)
        .collect();

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let date = cell_date(table, row, date_idx, parse_month)?;
        let total = cell_value(table, row, total_idx)?;

        let mut categories = Vec::with_capacity(category_columns.len());
        for &idx in &category_columns {
            let mut value = cell_value(table, row, idx)?;
            if value < 0.0 {
                // Credits are not spend: cleaned to zero, the row still loads
                warn!(
                    line = row.line,
                    column = %table.headers[idx],
                    value,
                    "negative expense category cleaned to zero"
                );
                value = 0.0;
            }
            categories.push((table.headers[idx].clone(), value));
        }

        records.push(ExpenseRecord {
            date,
            total,
            categories,
        });
    }

    let series = TimeSeries::from_records(records);
    debug!(records = series.len(), categories = category_columns.len(), "normalized expense series");
    Ok(series)
}

fn require_column(table: &RawTable, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| DashboardError::MissingColumn {
            input: table.input,
            column: name.to_string(),
        })
}

fn cell_date(
    table: &RawTable,
    row: &RawRow,
    idx: usize,
    parse: fn(&str) -> Option<NaiveDate>,
) -> Result<NaiveDate> {
    parse(&row.cells[idx]).ok_or_else(|| malformed(table, row, idx, "not a valid date"))
}

fn cell_value(table: &RawTable, row: &RawRow, idx: usize) -> Result<f64> {
    parse_currency(&row.cells[idx]).map_err(|reason| malformed(table, row, idx, reason))
}

fn malformed(table: &RawTable, row: &RawRow, idx: usize, reason: &'static str) -> DashboardError {
    DashboardError::MalformedValue {
        input: table.input,
        line: row.line,
        column: table.headers[idx].clone(),
        value: row.cells[idx].clone(),
        reason,
    }
}
