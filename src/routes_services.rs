// --------------------------------------------------
// HTTP handlers for the service catalog
// --------------------------------------------------

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::catalog::{self, ServiceUpdate};
use crate::errors::Result;
use crate::models::Service;
use crate::state::AppState;

// -----------------------------
// GET /api/services
// The active service set; never empty
// -----------------------------
pub async fn list_services(State(state): State<AppState>) -> Json<Vec<Service>> {
    let store = state.store.lock().await;
    Json(catalog::list(store.db()))
}

#[derive(Debug, Deserialize)]
pub struct CreateServiceInput {
    pub name: String,
    pub price: f64,
}

// -----------------------------
// POST /api/services
// Adds an offering to the catalog
// -----------------------------
pub async fn create_service(
    State(state): State<AppState>,
    Json(input): Json<CreateServiceInput>,
) -> Result<Json<Service>> {
    let mut store = state.store.lock().await;
    let service = catalog::add(&mut store, &input.name, input.price)?;

    tracing::info!(id = service.id, name = %service.name, "service added");
    Ok(Json(service))
}

// -----------------------------
// PUT /api/services/:id
// Partial update; absent fields keep their value
// -----------------------------
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<ServiceUpdate>,
) -> Result<Json<Service>> {
    let mut store = state.store.lock().await;
    let service = catalog::update(&mut store, id, input)?;
    Ok(Json(service))
}

// -----------------------------
// DELETE /api/services/:id
// Refused when it would empty the catalog; booked appointments keep
// their own snapshot and are unaffected
// -----------------------------
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let mut store = state.store.lock().await;
    catalog::delete(&mut store, id)?;

    Ok(Json(serde_json::json!({ "ok": true })))
}
