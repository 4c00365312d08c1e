// Loader - raw CSV text into untyped tables
//
// Both inputs are read fully before anything is parsed. A missing or
// unreadable file aborts the session; no partial dashboard is built.

use csv::ReaderBuilder;
use std::fs;
use tracing::debug;

use crate::config::{DashboardConfig, InputKind};
use crate::error::{DashboardError, Result};

/// One data row with the line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub line: usize,
    pub cells: Vec<String>,
}

/// A table of string cells with named columns, before any typing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    pub input: InputKind,
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Read both inputs named by the config.
pub fn load_inputs(config: &DashboardConfig) -> Result<(RawTable, RawTable)> {
    let net_worth = load_input(config, InputKind::NetWorth)?;
    let expenses = load_input(config, InputKind::Expenses)?;
    Ok((net_worth, expenses))
}

fn load_input(config: &DashboardConfig, input: InputKind) -> Result<RawTable> {
    let path = config.path_for(input);
    let unavailable = |reason: String| DashboardError::DataUnavailable {
        path: path.to_path_buf(),
        reason,
        net_worth: config.net_worth_path.clone(),
        expenses: config.expenses_path.clone(),
    };

    let text = fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
    let table = parse_table(input, &text).map_err(|e| unavailable(e.to_string()))?;

    if table.rows.is_empty() {
        return Err(unavailable("no data rows".to_string()));
    }

    debug!(
        input = %input,
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "loaded raw table"
    );

    Ok(table)
}

/// Parse CSV text for one input, skipping its banner lines.
pub fn parse_table(input: InputKind, text: &str) -> std::result::Result<RawTable, csv::Error> {
    let banner = input.banner_lines();
    let body = skip_lines(text, banner);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_num, result) in reader.records().enumerate() {
        let record = result?;

        // Blank separator lines come through as a single empty field
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }

        let mut cells: Vec<String> = record.iter().map(|c| c.to_string()).collect();
        cells.resize(headers.len().max(cells.len()), String::new());

        // Line within the file: banner + header line + 1-indexed row.
        // Falls back to the row count when the reader has no position.
        let line = record
            .position()
            .map(|p| p.line() as usize + banner)
            .unwrap_or(row_num + 2 + banner);

        rows.push(RawRow { line, cells });
    }

    Ok(RawTable {
        input,
        headers,
        rows,
    })
}

fn skip_lines(text: &str, count: usize) -> &str {
    let mut rest = text;
    for _ in 0..count {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    const NET_WORTH_CSV: &str = "Net Worth Tracker export\n\
Date,Checking,Brokerage,CC Balance,Net Worth\n\
\"Jan 31, 2024\",\"$1,000.00\",\"$5,000.00\",\"-$200.00\",\"$5,800.00\"\n\
\"Feb 29, 2024\",\"$1,200.00\",\"$5,100.00\",\"-$150.00\",\"$6,150.00\"\n";

    const EXPENSES_CSV: &str = "Date,Rent,Food,TOTAL\n\
Jan '24,\"$1,500.00\",$300.00,\"$1,800.00\"\n";

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_table_skips_banner() {
        let table = parse_table(InputKind::NetWorth, NET_WORTH_CSV).unwrap();

        assert_eq!(
            table.headers,
            vec!["Date", "Checking", "Brokerage", "CC Balance", "Net Worth"]
        );
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cells[0], "Jan 31, 2024");
        assert_eq!(table.rows[0].cells[1], "$1,000.00");
        // banner = line 1, header = line 2
        assert_eq!(table.rows[0].line, 3);
        assert_eq!(table.column_index("Net Worth"), Some(4));
    }

    #[test]
    fn test_parse_table_without_banner() {
        let table = parse_table(InputKind::Expenses, EXPENSES_CSV).unwrap();

        assert_eq!(table.headers, vec!["Date", "Rent", "Food", "TOTAL"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].line, 2);
        assert_eq!(table.rows[0].cells[3], "$1,800.00");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = parse_table(InputKind::Expenses, "Date,Rent,TOTAL\nJan '24,$10.00\n").unwrap();

        assert_eq!(table.rows[0].cells, vec!["Jan '24", "$10.00", ""]);
    }

    #[test]
    fn test_load_inputs_from_files() {
        let nw = write_temp(NET_WORTH_CSV);
        let ex = write_temp(EXPENSES_CSV);
        let config = DashboardConfig::new(nw.path(), ex.path());

        let (net_worth, expenses) = load_inputs(&config).unwrap();

        assert_eq!(net_worth.input, InputKind::NetWorth);
        assert_eq!(net_worth.rows.len(), 2);
        assert_eq!(expenses.input, InputKind::Expenses);
        assert_eq!(expenses.rows.len(), 1);
    }

    #[test]
    fn test_missing_input_is_data_unavailable() {
        let nw = write_temp(NET_WORTH_CSV);
        let config = DashboardConfig::new(nw.path(), "/nonexistent/expenses.csv");

        let err = load_inputs(&config).unwrap_err();

        match &err {
            DashboardError::DataUnavailable { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/expenses.csv"));
            }
            other => panic!("expected DataUnavailable, got {:?}", other),
        }
        assert!(err.to_string().contains("/nonexistent/expenses.csv"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_missing_net_worth_input_is_data_unavailable() {
        let ex = write_temp(EXPENSES_CSV);
        let config = DashboardConfig::new("/nonexistent/net_worth.csv", ex.path());

        let err = load_inputs(&config).unwrap_err();

        match &err {
            DashboardError::DataUnavailable { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/net_worth.csv"));
            }
            other => panic!("expected DataUnavailable, got {:?}", other),
        }
        // The message names both inputs
        let message = err.to_string();
        assert!(message.contains("/nonexistent/net_worth.csv"));
        assert!(message.contains(&ex.path().display().to_string()));
    }

    #[test]
    fn test_header_only_input_is_data_unavailable() {
        let nw = write_temp(NET_WORTH_CSV);
        let ex = write_temp("Date,Rent,TOTAL\n");
        let config = DashboardConfig::new(nw.path(), ex.path());

        let err = load_inputs(&config).unwrap_err();

        assert!(matches!(err, DashboardError::DataUnavailable { ref reason, .. } if reason == "no data rows"));
    }
}
