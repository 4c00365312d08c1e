// Error taxonomy for the dashboard pipeline
//
// Load errors (DataUnavailable, MissingColumn, MalformedValue) are fatal for a
// session. PeriodNotFound and InvalidSelection are recoverable lookups.
// Empty aggregates are not errors at all: they are modelled as empty values.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::InputKind;

/// Errors exposed by the dashboard library.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(
        "could not load {path}: {reason}. Please ensure '{net_worth}' and '{expenses}' are present and readable"
    )]
    DataUnavailable {
        path: PathBuf,
        reason: String,
        net_worth: PathBuf,
        expenses: PathBuf,
    },

    #[error("{input} input is missing required column '{column}'")]
    MissingColumn { input: InputKind, column: String },

    #[error("{input} input, line {line}, column '{column}': cannot parse '{value}' ({reason})")]
    MalformedValue {
        input: InputKind,
        line: usize,
        column: String,
        value: String,
        reason: &'static str,
    },

    #[error("no expense data recorded for {month}")]
    PeriodNotFound { month: String },

    #[error("invalid selection '{value}': {reason}")]
    InvalidSelection { value: String, reason: &'static str },

    #[error("invalid configuration '{value}': {reason}")]
    InvalidConfig { value: String, reason: &'static str },
}

impl DashboardError {
    /// True for errors that must abort the whole session.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DashboardError::DataUnavailable { .. }
                | DashboardError::MissingColumn { .. }
                | DashboardError::MalformedValue { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_unavailable_names_both_inputs() {
        let err = DashboardError::DataUnavailable {
            path: PathBuf::from("net_worth.csv"),
            reason: "No such file or directory".to_string(),
            net_worth: PathBuf::from("net_worth.csv"),
            expenses: PathBuf::from("expenses.csv"),
        };

        let message = err.to_string();
        assert!(message.contains("'net_worth.csv'"));
        assert!(message.contains("'expenses.csv'"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_period_not_found_is_recoverable() {
        let err = DashboardError::PeriodNotFound {
            month: "Aug 2022".to_string(),
        };

        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "no expense data recorded for Aug 2022");
    }

    #[test]
    fn test_malformed_value_message() {
        let err = DashboardError::MalformedValue {
            input: InputKind::Expenses,
            line: 4,
            column: "Rent".to_string(),
            value: "$12abc".to_string(),
            reason: "not a number",
        };

        assert_eq!(
            err.to_string(),
            "expenses input, line 4, column 'Rent': cannot parse '$12abc' (not a number)"
        );
    }
}
