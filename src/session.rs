// Per-session UI state and the events that change it
//
// A presenter never mutates session state directly: it turns user input into
// a SessionEvent and asks `transition` for the next state.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregator::StatsWindow;
use crate::dashboard::{Dashboard, Detail, SeriesKind};
use crate::normalizer::month_start;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    Dashboard,
    Detail { series: SeriesKind, date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub view: View,
    /// Month shown in the category breakdown
    pub breakdown_month: Option<NaiveDate>,
    pub window: StatsWindow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SessionEvent {
    /// A chart point was clicked
    PointSelected { series: SeriesKind, date: NaiveDate },
    BackToDashboard,
    MonthSelected { month: NaiveDate },
    WindowSelected { window: StatsWindow },
}

impl SessionState {
    /// Fresh state for a newly loaded dashboard: overview, latest month.
    pub fn new(dashboard: &Dashboard) -> Self {
        SessionState {
            view: View::Dashboard,
            breakdown_month: dashboard.latest_month(),
            window: StatsWindow::default(),
        }
    }

    pub fn apply(&self, event: &SessionEvent) -> SessionState {
        transition(self, event)
    }

    pub fn is_detail(&self) -> bool {
        matches!(self.view, View::Detail { .. })
    }

    /// Record for the current detail view, if one is selected and exists
    pub fn detail<'a>(&self, dashboard: &'a Dashboard) -> Option<Detail<'a>> {
        match self.view {
            View::Detail { series, date } => dashboard.detail(series, date),
            View::Dashboard => None,
        }
    }
}

/// Next session state after `event`. Pure: no I/O, no aggregation.
pub fn transition(state: &SessionState, event: &SessionEvent) -> SessionState {
    let mut next = state.clone();

    match *event {
        SessionEvent::PointSelected { series, date } => {
            let date = match series {
                SeriesKind::NetWorth => date,
                SeriesKind::Expenses => month_start(date),
            };
            next.view = View::Detail { series, date };
        }
        SessionEvent::BackToDashboard => next.view = View::Dashboard,
        SessionEvent::MonthSelected { month } => next.breakdown_month = Some(month_start(month)),
        SessionEvent::WindowSelected { window } => next.window = window,
    }

    debug!(?event, view = ?next.view, "session transition");
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::tests::sample_dashboard;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn overview() -> SessionState {
        SessionState {
            view: View::Dashboard,
            breakdown_month: Some(day(2024, 6, 1)),
            window: StatsWindow::SixMonths,
        }
    }

    #[test]
    fn test_point_selected_opens_detail() {
        let state = overview();
        let event = SessionEvent::PointSelected {
            series: SeriesKind::NetWorth,
            date: day(2024, 1, 31),
        };

        let next = transition(&state, &event);

        assert_eq!(
            next.view,
            View::Detail {
                series: SeriesKind::NetWorth,
                date: day(2024, 1, 31)
            }
        );
        // Input state untouched
        assert_eq!(state.view, View::Dashboard);
        assert_eq!(next.breakdown_month, state.breakdown_month);
    }

    #[test]
    fn test_expense_point_keyed_by_month() {
        let next = overview().apply(&SessionEvent::PointSelected {
            series: SeriesKind::Expenses,
            date: day(2024, 3, 15),
        });

        assert_eq!(
            next.view,
            View::Detail {
                series: SeriesKind::Expenses,
                date: day(2024, 3, 1)
            }
        );
    }

    #[test]
    fn test_back_to_dashboard() {
        let detail = overview().apply(&SessionEvent::PointSelected {
            series: SeriesKind::NetWorth,
            date: day(2024, 1, 31),
        });
        assert!(detail.is_detail());

        let back = detail.apply(&SessionEvent::BackToDashboard);

        assert!(!back.is_detail());
        assert_eq!(back, overview());
    }

    #[test]
    fn test_month_and_window_selection() {
        let next = overview()
            .apply(&SessionEvent::MonthSelected { month: day(2023, 9, 12) })
            .apply(&SessionEvent::WindowSelected {
                window: StatsWindow::TwelveMonths,
            });

        assert_eq!(next.breakdown_month, Some(day(2023, 9, 1)));
        assert_eq!(next.window, StatsWindow::TwelveMonths);
        assert_eq!(next.view, View::Dashboard);
    }

    #[test]
    fn test_event_json_shape() {
        let event: SessionEvent = serde_json::from_str(
            r#"{"kind": "PointSelected", "series": "net_worth", "date": "2024-01-31"}"#,
        )
        .unwrap();

        assert_eq!(
            event,
            SessionEvent::PointSelected {
                series: SeriesKind::NetWorth,
                date: day(2024, 1, 31)
            }
        );

        let window: SessionEvent =
            serde_json::from_str(r#"{"kind": "WindowSelected", "window": "12"}"#).unwrap();
        assert_eq!(
            window,
            SessionEvent::WindowSelected {
                window: StatsWindow::TwelveMonths
            }
        );
    }

    #[test]
    fn test_state_detail_lookup_against_dashboard() {
        let dashboard = sample_dashboard();
        let state = SessionState::new(&dashboard);
        assert_eq!(state.breakdown_month, Some(day(2024, 6, 1)));
        assert!(state.detail(&dashboard).is_none());

        let selected = state.apply(&SessionEvent::PointSelected {
            series: SeriesKind::Expenses,
            date: day(2023, 2, 1),
        });

        match selected.detail(&dashboard) {
            Some(Detail::Expenses(record)) => assert_eq!(record.date, day(2023, 2, 1)),
            other => panic!("expected expense detail, got {:?}", other),
        }
    }
}
