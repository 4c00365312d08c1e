// JSON API over per-session dashboards
//
// Every session owns its own Dashboard, loaded from disk when the session is
// created. The shared map is only a registry; no data crosses sessions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::aggregator::StatsWindow;
use crate::config::DashboardConfig;
use crate::dashboard::{Dashboard, Detail};
use crate::error::DashboardError;
use crate::normalizer::parse_month_label;
use crate::session::{transition, SessionEvent, SessionState};

pub struct Session {
    dashboard: Dashboard,
    state: SessionState,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    config: Arc<DashboardConfig>,
    sessions: Arc<Mutex<HashMap<Uuid, Session>>>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        AppState {
            config: Arc::new(config),
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.len()).unwrap_or(0)
    }

    fn with_session<R>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Session) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let mut sessions = self.sessions.lock().map_err(|_| ApiError::poisoned())?;
        let session = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::session_not_found(id))?;
        f(session)
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

fn ok_json<T: Serialize>(data: T) -> Response {
    Json(ApiResponse::ok(data)).into_response()
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn session_not_found(id: Uuid) -> Self {
        ApiError {
            status: StatusCode::NOT_FOUND,
            message: format!("no session with id {}", id),
        }
    }

    fn session_limit(max: usize) -> Self {
        ApiError {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: format!("session limit of {} reached, close a session first", max),
        }
    }

    fn load_aborted() -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "dashboard load was aborted".to_string(),
        }
    }

    fn poisoned() -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "session registry unavailable".to_string(),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        let status = match &err {
            DashboardError::PeriodNotFound { .. } => StatusCode::NOT_FOUND,
            DashboardError::InvalidSelection { .. } | DashboardError::InvalidConfig { .. } => {
                StatusCode::BAD_REQUEST
            }
            DashboardError::MalformedValue { .. } | DashboardError::MissingColumn { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            DashboardError::DataUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        };
        ApiError {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            warn!(status = %self.status, error = %self.message, "request failed");
        }
        let body = ApiResponse {
            success: false,
            data: (),
            error: Some(self.message),
        };
        (self.status, Json(body)).into_response()
    }
}

/// Session state plus the record behind an open detail view
#[derive(Serialize)]
struct SessionView<'a> {
    state: &'a SessionState,
    detail: Option<Detail<'a>>,
}

impl Session {
    fn view(&self) -> SessionView<'_> {
        SessionView {
            state: &self.state,
            detail: self.state.detail(&self.dashboard),
        }
    }
}

#[derive(Serialize)]
struct SessionCreated {
    id: Uuid,
    state: SessionState,
    net_worth_records: usize,
    expense_months: usize,
    month_options: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BreakdownQuery {
    month: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    window: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/sessions - Load a fresh copy of both inputs
///
/// Refused with 429 once `max_sessions` dashboards are held.
async fn create_session(State(app): State<AppState>) -> Result<Response, ApiError> {
    let max = app.config.max_sessions;
    if app.session_count() >= max {
        return Err(ApiError::session_limit(max));
    }

    // File reads and parsing stay off the async workers
    let config = Arc::clone(&app.config);
    let dashboard = tokio::task::spawn_blocking(move || Dashboard::load(&config))
        .await
        .map_err(|_| ApiError::load_aborted())??;

    let state = SessionState::new(&dashboard);
    let id = Uuid::new_v4();

    let created = SessionCreated {
        id,
        state: state.clone(),
        net_worth_records: dashboard.net_worth().len(),
        expense_months: dashboard.expenses().len(),
        month_options: dashboard.month_options(),
    };

    {
        let mut sessions = app.sessions.lock().map_err(|_| ApiError::poisoned())?;
        // Another request may have filled the last slot while this one loaded
        if sessions.len() >= max {
            return Err(ApiError::session_limit(max));
        }
        sessions.insert(id, Session { dashboard, state });
    }
    info!(session = %id, "session created");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))).into_response())
}

/// DELETE /api/sessions/:id
async fn delete_session(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let removed = app
        .sessions
        .lock()
        .map_err(|_| ApiError::poisoned())?
        .remove(&id);

    match removed {
        Some(_) => {
            info!(session = %id, "session closed");
            Ok(ok_json(id))
        }
        None => Err(ApiError::session_not_found(id)),
    }
}

/// GET /api/sessions/:id/state
async fn get_state(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    app.with_session(id, |session| Ok(ok_json(session.view())))
}

/// GET /api/sessions/:id/net-worth - Net worth trend points
async fn get_net_worth(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    app.with_session(id, |session| Ok(ok_json(session.dashboard.net_worth())))
}

/// GET /api/sessions/:id/composition - One line per asset column
async fn get_composition(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    app.with_session(id, |session| Ok(ok_json(session.dashboard.composition())))
}

/// GET /api/sessions/:id/expenses - Monthly expense records
async fn get_expenses(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    app.with_session(id, |session| Ok(ok_json(session.dashboard.expenses())))
}

/// GET /api/sessions/:id/breakdown?month=Aug%202022
///
/// Without `month` the session's selected month is used.
async fn get_breakdown(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<BreakdownQuery>,
) -> Result<Response, ApiError> {
    let requested = query.month.as_deref().map(parse_month_label).transpose()?;

    app.with_session(id, |session| {
        let month = requested.or(session.state.breakdown_month).ok_or_else(|| {
            ApiError::from(DashboardError::InvalidSelection {
                value: String::new(),
                reason: "no expense month to break down",
            })
        })?;
        let breakdown = session.dashboard.breakdown(month)?;
        Ok(ok_json(breakdown))
    })
}

/// GET /api/sessions/:id/stats?window=12
async fn get_stats(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<StatsQuery>,
) -> Result<Response, ApiError> {
    let requested = query
        .window
        .as_deref()
        .map(StatsWindow::from_str)
        .transpose()?;

    app.with_session(id, |session| {
        let window = requested.unwrap_or(session.state.window);
        Ok(ok_json(session.dashboard.stats(window)))
    })
}

/// GET /api/sessions/:id/overlap - Shared date bounds, null when disjoint
async fn get_overlap(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    app.with_session(id, |session| Ok(ok_json(session.dashboard.bounds())))
}

/// POST /api/sessions/:id/events - Apply one SessionEvent
async fn post_event(
    State(app): State<AppState>,
    Path(id): Path<Uuid>,
    Json(event): Json<SessionEvent>,
) -> Result<Response, ApiError> {
    app.with_session(id, |session| {
        session.state = transition(&session.state, &event);
        Ok(ok_json(session.view()))
    })
}

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/sessions", post(create_session))
        .route("/sessions/:id", delete(delete_session))
        .route("/sessions/:id/state", get(get_state))
        .route("/sessions/:id/net-worth", get(get_net_worth))
        .route("/sessions/:id/composition", get(get_composition))
        .route("/sessions/:id/expenses", get(get_expenses))
        .route("/sessions/:id/breakdown", get(get_breakdown))
        .route("/sessions/:id/stats", get(get_stats))
        .route("/sessions/:id/overlap", get(get_overlap))
        .route("/sessions/:id/events", post(post_event))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}
