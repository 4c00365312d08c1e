// Presenters - render dashboard aggregates for a user
//
// Both implementations consume the same Dashboard + SessionState and differ
// only in how they draw. Which one runs is decided when the binary starts.

pub mod format;
pub mod report;
#[cfg(feature = "tui")]
pub mod tui;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::dashboard::Dashboard;
use crate::session::SessionState;

pub use report::ReportPresenter;
#[cfg(feature = "tui")]
pub use tui::TerminalPresenter;

/// Presenter - core trait every rendering surface implements
///
/// A presenter owns no dashboard data. It reads the session's Dashboard,
/// renders, and may replace `session` with states produced by
/// `session::transition` as the user interacts.
pub trait Presenter {
    /// Render the dashboard for one session until the presenter is done.
    fn present(&mut self, dashboard: &Dashboard, session: &mut SessionState) -> Result<()>;

    /// Which kind this presenter is
    fn kind(&self) -> PresenterKind;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenterKind {
    /// Plain text report on stdout
    Static,
    /// Full-screen terminal UI
    Interactive,
}

impl PresenterKind {
    pub fn name(&self) -> &str {
        match self {
            PresenterKind::Static => "static report",
            PresenterKind::Interactive => "interactive terminal",
        }
    }
}

/// Build the presenter for a kind.
///
/// Returns `None` for the interactive presenter when the `tui` feature is
/// compiled out.
pub fn get_presenter(kind: PresenterKind) -> Option<Box<dyn Presenter>> {
    match kind {
        PresenterKind::Static => Some(Box::new(ReportPresenter::stdout())),
        #[cfg(feature = "tui")]
        PresenterKind::Interactive => Some(Box::new(TerminalPresenter::new())),
        #[cfg(not(feature = "tui"))]
        PresenterKind::Interactive => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_static() {
        let presenter = get_presenter(PresenterKind::Static).unwrap();
        assert_eq!(presenter.kind(), PresenterKind::Static);
    }

    #[cfg(feature = "tui")]
    #[test]
    fn test_factory_interactive() {
        let presenter = get_presenter(PresenterKind::Interactive).unwrap();
        assert_eq!(presenter.kind(), PresenterKind::Interactive);
        assert_eq!(presenter.kind().name(), "interactive terminal");
    }
}
