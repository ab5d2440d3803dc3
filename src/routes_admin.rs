// --------------------------------------------------
// HTTP handlers for the admin panel: register totals, the destructive
// reset and the shared-password login
// --------------------------------------------------

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::AppointmentStatus;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub cash: f64,
    pub pending: usize,
}

// -----------------------------
// GET /api/dashboard
// Register total and pending count for the panel header
// -----------------------------
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let store = state.store.lock().await;
    let db = store.db();

    Json(DashboardResponse {
        cash: db.cash,
        pending: db
            .appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Pending)
            .count(),
    })
}

#[derive(Debug, Deserialize)]
pub struct ResetInput {
    #[serde(default)]
    pub confirmed: bool,
}

// -----------------------------
// POST /api/reset
// Drops every appointment and the register; needs {"confirmed": true}
// -----------------------------
pub async fn reset_database(
    State(state): State<AppState>,
    Json(input): Json<ResetInput>,
) -> Result<Json<serde_json::Value>> {
    let mut store = state.store.lock().await;
    store.reset(input.confirmed)?;

    tracing::info!("database reset to first-run state");
    Ok(Json(serde_json::json!({ "ok": true })))
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub password: String,
}

// -----------------------------
// POST /api/login
// Static shared password gating the admin views
// -----------------------------
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> impl IntoResponse {
    if input.password == state.config.admin_password {
        Json(serde_json::json!({ "ok": true })).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "incorrect password").into_response()
    }
}
