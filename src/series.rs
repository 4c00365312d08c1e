// Time series and the two record shapes the dashboard works with
//
// Both series are built once per session and never mutated afterwards.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Anything keyed by a calendar date.
pub trait Dated {
    fn date(&self) -> NaiveDate;
}

/// One row of the net worth export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetWorthRecord {
    pub date: NaiveDate,
    pub net_worth: f64,
    /// Asset columns in source column order
    pub assets: Vec<(String, f64)>,
    pub cc_balance: f64,
}

impl NetWorthRecord {
    pub fn asset(&self, name: &str) -> Option<f64> {
        lookup(&self.assets, name)
    }
}

impl Dated for NetWorthRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

/// One month of the expense export. `date` is the first of the month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub total: f64,
    /// Expense categories in source column order, all non-negative
    pub categories: Vec<(String, f64)>,
}

impl ExpenseRecord {
    pub fn category(&self, name: &str) -> Option<f64> {
        lookup(&self.categories, name)
    }
}

impl Dated for ExpenseRecord {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

fn lookup(pairs: &[(String, f64)], name: &str) -> Option<f64> {
    pairs.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
}

/// Records sorted strictly ascending by date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries<T> {
    records: Vec<T>,
}

impl<T: Dated> TimeSeries<T> {
    /// Sort by date and collapse duplicate dates.
    ///
    /// The sort is stable, so among rows sharing a date the one that came
    /// last in the input replaces the others.
    pub fn from_records(mut records: Vec<T>) -> Self {
        records.sort_by_key(|r| r.date());

        let mut unique: Vec<T> = Vec::with_capacity(records.len());
        for record in records {
            match unique.last_mut() {
                Some(last) if last.date() == record.date() => {
                    warn!(date = %record.date(), "duplicate date in input, keeping the later row");
                    *last = record;
                }
                _ => unique.push(record),
            }
        }

        TimeSeries { records: unique }
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date())
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date())
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.records.iter().map(|r| r.date())
    }

    /// Exact lookup by key
    pub fn get(&self, date: NaiveDate) -> Option<&T> {
        self.records
            .binary_search_by_key(&date, |r| r.date())
            .ok()
            .map(|i| &self.records[i])
    }

    /// All records dated on or after `start`
    pub fn since(&self, start: NaiveDate) -> &[T] {
        let idx = self.records.partition_point(|r| r.date() < start);
        &self.records[idx..]
    }

    /// Position of a date in the series, used by presenters for cursors
    pub fn position(&self, date: NaiveDate) -> Option<usize> {
        self.records.binary_search_by_key(&date, |r| r.date()).ok()
    }
}

impl<T> Default for TimeSeries<T> {
    fn default() -> Self {
        TimeSeries { records: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month(y: i32, m: u32, total: f64) -> ExpenseRecord {
        ExpenseRecord {
            date: day(y, m, 1),
            total,
            categories: vec![("Rent".to_string(), total)],
        }
    }

    #[test]
    fn test_from_records_sorts_ascending() {
        let series = TimeSeries::from_records(vec![
            month(2023, 3, 300.0),
            month(2023, 1, 100.0),
            month(2023, 2, 200.0),
        ]);

        let dates: Vec<_> = series.dates().collect();
        assert_eq!(dates, vec![day(2023, 1, 1), day(2023, 2, 1), day(2023, 3, 1)]);
        assert_eq!(series.first_date(), Some(day(2023, 1, 1)));
        assert_eq!(series.last_date(), Some(day(2023, 3, 1)));
    }

    #[test]
    fn test_duplicate_dates_last_row_wins() {
        let series = TimeSeries::from_records(vec![
            month(2023, 2, 200.0),
            month(2023, 1, 100.0),
            month(2023, 2, 250.0),
        ]);

        assert_eq!(series.len(), 2);
        assert_eq!(series.get(day(2023, 2, 1)).unwrap().total, 250.0);
    }

    #[test]
    fn test_since_is_inclusive() {
        let series = TimeSeries::from_records(vec![
            month(2023, 1, 100.0),
            month(2023, 2, 200.0),
            month(2023, 3, 300.0),
        ]);

        let tail = series.since(day(2023, 2, 1));
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].total, 200.0);

        assert!(series.since(day(2024, 1, 1)).is_empty());
        assert_eq!(series.since(day(2000, 1, 1)).len(), 3);
    }

    #[test]
    fn test_get_and_position() {
        let series = TimeSeries::from_records(vec![month(2023, 1, 100.0), month(2023, 2, 200.0)]);

        assert!(series.get(day(2023, 1, 15)).is_none());
        assert_eq!(series.position(day(2023, 2, 1)), Some(1));
        assert_eq!(series.get(day(2023, 1, 1)).unwrap().category("Rent"), Some(100.0));
    }

    #[test]
    fn test_empty_series() {
        let series: TimeSeries<ExpenseRecord> = TimeSeries::default();

        assert!(series.is_empty());
        assert_eq!(series.first_date(), None);
        assert!(series.since(day(2023, 1, 1)).is_empty());
    }
}
