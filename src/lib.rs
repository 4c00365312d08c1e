// Finance Dashboard - Core Library
// Loader → Normalizer → Aggregator → Presenter, shared by the CLI and API server

pub mod error;
pub mod config;
pub mod loader;     // Raw CSV tables
pub mod normalizer; // Currency cleaning, date parsing, TimeSeries
pub mod series;
pub mod aggregator; // Composition, breakdown, overlap, rolling stats
pub mod dashboard;
pub mod session;
pub mod presenter;
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use error::{DashboardError, Result};
pub use config::{DashboardConfig, InputKind};
pub use loader::{load_inputs, RawRow, RawTable};
pub use normalizer::{
    month_label, month_start, normalize_expenses, normalize_net_worth, parse_currency, parse_day,
    parse_month, parse_month_label,
};
pub use series::{Dated, ExpenseRecord, NetWorthRecord, TimeSeries};
pub use aggregator::{
    asset_composition, category_breakdown, overlap_bounds, rolling_stats, AssetComposition,
    Breakdown, BreakdownSlice, OverlapBounds, RollingStats, StatsWindow,
};
pub use dashboard::{Dashboard, Detail, SeriesKind};
pub use session::{transition, SessionEvent, SessionState, View};
pub use presenter::{get_presenter, Presenter, PresenterKind, ReportPresenter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
