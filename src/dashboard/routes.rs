//! Explorer API route handlers.
//!
//! All endpoints return JSON. The engine is stateless, so shared state is
//! just the configured `Explorer` facade and the display labels.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ExplorerConfig;
use crate::settle::{Explorer, ExplorerReport};
use crate::types::{Line, Side, SubLine};

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub explorer: Explorer,
    pub settings: ExplorerConfig,
}

impl DashboardState {
    pub fn new(settings: ExplorerConfig) -> Self {
        Self {
            explorer: Explorer::new(settings.max_padding),
            settings,
        }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SettleQuery {
    pub margin: i64,
    pub side: String,
    pub line: String,
}

#[derive(Debug, Deserialize)]
pub struct ExplorerQuery {
    pub line_a: String,
    pub line_b: String,
    pub padding: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettleResponse {
    pub margin: i64,
    pub side: Side,
    pub line: String,
    pub sub_lines: Vec<SubLine>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplorerResponse {
    pub label_a: String,
    pub label_b: String,
    pub padding: u32,
    #[serde(flatten)]
    pub report: ExplorerReport,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

fn bad_request(message: impl ToString) -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message.to_string() }))
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/settle?margin=&side=&line=
pub async fn get_settle(
    State(state): State<AppState>,
    Query(q): Query<SettleQuery>,
) -> Result<Json<SettleResponse>, (StatusCode, Json<ErrorBody>)> {
    let side: Side = q.side.parse().map_err(bad_request)?;
    let line: Line = q.line.parse().map_err(bad_request)?;
    let status = state
        .explorer
        .settle(q.margin, side, &q.line)
        .map_err(bad_request)?;

    Ok(Json(SettleResponse {
        margin: q.margin,
        side,
        line: line.to_string(),
        sub_lines: crate::settle::splitter::split(line).sub_lines(),
        status: status.to_string(),
    }))
}

/// GET /api/explorer?line_a=&line_b=&padding=
///
/// Unparseable lines degrade to an empty report (the UI renders a hint),
/// matching the core's sweep contract; only a malformed query is a 400.
pub async fn get_explorer(
    State(state): State<AppState>,
    Query(q): Query<ExplorerQuery>,
) -> Json<ExplorerResponse> {
    let padding = q.padding.unwrap_or(state.settings.default_padding);
    let report = state.explorer.explore(&q.line_a, &q.line_b, padding);

    Json(ExplorerResponse {
        label_a: state.settings.label_a.clone(),
        label_b: state.settings.label_b.clone(),
        padding: padding.min(state.settings.max_padding),
        report,
    })
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
