// Dashboard configuration
// Input locations and aggregation tunables. Defaults < JSON file < CLI/env.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{DashboardError, Result};

pub const DEFAULT_NET_WORTH_FILE: &str = "net_worth_example.csv";
pub const DEFAULT_EXPENSES_FILE: &str = "expenses_example.csv";

/// Share (in percent) at or below which a category is folded into "Other".
pub const DEFAULT_OTHER_THRESHOLD_PERCENT: f64 = 3.0;

/// Number of categories reported in the rolling statistics.
pub const DEFAULT_TOP_CATEGORIES: usize = 5;

/// Dashboards the API server keeps loaded at once.
pub const DEFAULT_MAX_SESSIONS: usize = 64;

// Column names fixed by the input layout
pub const DATE_COLUMN: &str = "Date";
pub const NET_WORTH_COLUMN: &str = "Net Worth";
pub const CC_BALANCE_COLUMN: &str = "CC Balance";
pub const TOTAL_COLUMN: &str = "TOTAL";

/// InputKind - which of the two fixed-shape inputs a table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    NetWorth,
    Expenses,
}

impl InputKind {
    /// Human-readable name for messages
    pub fn name(&self) -> &str {
        match self {
            InputKind::NetWorth => "net worth",
            InputKind::Expenses => "expenses",
        }
    }

    /// Leading lines to drop before the column header line.
    /// The net worth export starts with a banner line.
    pub fn banner_lines(&self) -> usize {
        match self {
            InputKind::NetWorth => 1,
            InputKind::Expenses => 0,
        }
    }

    /// chrono format of the `Date` column
    pub fn date_format(&self) -> &str {
        match self {
            InputKind::NetWorth => "%b %d, %Y",
            InputKind::Expenses => "%b '%y",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub net_worth_path: PathBuf,
    pub expenses_path: PathBuf,
    pub other_threshold_percent: f64,
    pub top_categories: usize,
    /// Upper bound on concurrently open API sessions
    pub max_sessions: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            net_worth_path: PathBuf::from(DEFAULT_NET_WORTH_FILE),
            expenses_path: PathBuf::from(DEFAULT_EXPENSES_FILE),
            other_threshold_percent: DEFAULT_OTHER_THRESHOLD_PERCENT,
            top_categories: DEFAULT_TOP_CATEGORIES,
            max_sessions: DEFAULT_MAX_SESSIONS,
        }
    }
}

impl DashboardConfig {
    pub fn new(net_worth_path: impl Into<PathBuf>, expenses_path: impl Into<PathBuf>) -> Self {
        Self {
            net_worth_path: net_worth_path.into(),
            expenses_path: expenses_path.into(),
            ..Self::default()
        }
    }

    /// Load a JSON config file. Missing keys fall back to defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| DashboardError::InvalidConfig {
            value: path.display().to_string(),
            reason: config_open_reason(&e),
        })?;

        let config: DashboardConfig = serde_json::from_reader(BufReader::new(file)).map_err(|_| {
            DashboardError::InvalidConfig {
                value: path.display().to_string(),
                reason: "config file is not valid JSON for a dashboard config",
            }
        })?;

        config.validated()
    }

    /// Reject tunables that would make the aggregates meaningless.
    pub fn validated(self) -> Result<Self> {
        if !(0.0..100.0).contains(&self.other_threshold_percent) {
            return Err(DashboardError::InvalidConfig {
                value: self.other_threshold_percent.to_string(),
                reason: "other threshold must be a percentage in [0, 100)",
            });
        }

        if self.top_categories == 0 {
            return Err(DashboardError::InvalidConfig {
                value: "0".to_string(),
                reason: "top category count must be at least 1",
            });
        }

        if self.max_sessions == 0 {
            return Err(DashboardError::InvalidConfig {
                value: "0".to_string(),
                reason: "session limit must be at least 1",
            });
        }

        Ok(self)
    }

    /// Layer command-line and environment overrides over a file or the defaults.
    pub fn resolve(
        config_file: Option<&Path>,
        net_worth_path: Option<PathBuf>,
        expenses_path: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };

        if let Some(path) = net_worth_path {
            config.net_worth_path = path;
        }
        if let Some(path) = expenses_path {
            config.expenses_path = path;
        }
        Ok(config)
    }

    pub fn path_for(&self, input: InputKind) -> &Path {
        match input {
            InputKind::NetWorth => &self.net_worth_path,
            InputKind::Expenses => &self.expenses_path,
        }
    }
}

fn config_open_reason(err: &std::io::Error) -> &'static str {
    match err.kind() {
        std::io::ErrorKind::NotFound => "config file not found",
        std::io::ErrorKind::PermissionDenied => "config file is not readable",
        _ => "config file could not be opened",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_example_files() {
        let config = DashboardConfig::default();

        assert_eq!(config.net_worth_path, PathBuf::from("net_worth_example.csv"));
        assert_eq!(config.expenses_path, PathBuf::from("expenses_example.csv"));
        assert_eq!(config.other_threshold_percent, 3.0);
        assert_eq!(config.top_categories, 5);
        assert_eq!(config.max_sessions, DEFAULT_MAX_SESSIONS);
    }

    #[test]
    fn test_input_kind_layout() {
        assert_eq!(InputKind::NetWorth.banner_lines(), 1);
        assert_eq!(InputKind::Expenses.banner_lines(), 0);
        assert_eq!(InputKind::Expenses.to_string(), "expenses");
    }

    #[test]
    fn test_json_file_partial_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"expenses_path": "data/spend.csv", "top_categories": 3}}"#).unwrap();

        let config = DashboardConfig::from_json_file(file.path()).unwrap();

        assert_eq!(config.expenses_path, PathBuf::from("data/spend.csv"));
        assert_eq!(config.net_worth_path, PathBuf::from(DEFAULT_NET_WORTH_FILE));
        assert_eq!(config.top_categories, 3);
        assert_eq!(config.other_threshold_percent, 3.0);
    }

    #[test]
    fn test_json_file_rejects_bad_threshold() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"other_threshold_percent": 150.0}}"#).unwrap();

        let result = DashboardConfig::from_json_file(file.path());

        assert!(matches!(result, Err(DashboardError::InvalidConfig { .. })));
    }

    #[test]
    fn test_resolve_flags_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"net_worth_path": "a.csv", "expenses_path": "b.csv"}}"#).unwrap();

        let config =
            DashboardConfig::resolve(Some(file.path()), Some(PathBuf::from("nw.csv")), None)
                .unwrap();

        assert_eq!(config.net_worth_path, PathBuf::from("nw.csv"));
        assert_eq!(config.expenses_path, PathBuf::from("b.csv"));

        let defaults = DashboardConfig::resolve(None, None, None).unwrap();
        assert_eq!(defaults, DashboardConfig::default());
    }

    #[test]
    fn test_json_file_rejects_zero_session_limit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_sessions": 0}}"#).unwrap();

        let result = DashboardConfig::from_json_file(file.path());

        assert!(matches!(
            result,
            Err(DashboardError::InvalidConfig { reason: "session limit must be at least 1", .. })
        ));
    }

    #[test]
    fn test_missing_config_file() {
        let result = DashboardConfig::from_json_file(Path::new("/nonexistent/dashboard.json"));

        match result {
            Err(DashboardError::InvalidConfig { reason, .. }) => {
                assert_eq!(reason, "config file not found")
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }
}
