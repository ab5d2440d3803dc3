// --------------------------------------------------
// HTTP handlers for the appointment book.
//
// Responsibilities:
// - Book a slot for a walk-in client
// - List appointments for the admin table
// - Charge a pending appointment
// - Remove an appointment from the book
// --------------------------------------------------

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::Result;
use crate::ledger;
use crate::models::{Appointment, AppointmentStatus};
use crate::scheduler;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<AppointmentStatus>,
}

#[derive(Debug, Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<Appointment>,
    pub pending: usize,
}

// -----------------------------
// GET /api/appointments
// Returns appointments sorted by date; display order is computed here,
// never stored
// -----------------------------
pub async fn list_appointments(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Json<AppointmentsResponse> {
    let store = state.store.lock().await;
    let db = store.db();

    let mut appointments: Vec<Appointment> = db
        .appointments
        .iter()
        .filter(|a| q.status.is_none_or(|s| a.status == s))
        .cloned()
        .collect();
    appointments.sort_by_key(|a| a.date);

    let pending = db
        .appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Pending)
        .count();

    Json(AppointmentsResponse {
        appointments,
        pending,
    })
}

#[derive(Debug, Deserialize)]
pub struct BookInput {
    pub client: String,
    pub date: String, // RFC 3339 or "YYYY-MM-DDTHH:MM"
    pub service_id: i64,
}

// -----------------------------
// POST /api/appointments
// Validates the requested slot and books it
// -----------------------------
pub async fn book_appointment(
    State(state): State<AppState>,
    Json(input): Json<BookInput>,
) -> Result<Json<Appointment>> {
    let mut store = state.store.lock().await;
    let appointment = scheduler::book_appointment(
        &mut store,
        &state.config,
        &input.client,
        &input.date,
        input.service_id,
        scheduler::now_local(),
    )?;

    tracing::info!(
        client = %appointment.client,
        date = %appointment.date,
        service = %appointment.service,
        "appointment booked"
    );
    Ok(Json(appointment))
}

// -----------------------------
// POST /api/appointments/:id/pay
// Charges a pending appointment and moves its price into the register
// -----------------------------
pub async fn pay_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>> {
    let mut store = state.store.lock().await;
    let paid = ledger::process_payment(&mut store, id, scheduler::now_local())?;

    tracing::info!(%id, price = paid.price, "appointment charged");
    Ok(Json(paid))
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    #[serde(default)]
    pub confirmed: bool,
}

// -----------------------------
// DELETE /api/appointments/:id
// Removes an appointment; a paid one needs ?confirmed=true and leaves
// the register untouched
// -----------------------------
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(q): Query<DeleteQuery>,
) -> Result<Json<serde_json::Value>> {
    let mut store = state.store.lock().await;
    ledger::delete_appointment(&mut store, id, q.confirmed)?;

    Ok(Json(serde_json::json!({ "ok": true })))
}
