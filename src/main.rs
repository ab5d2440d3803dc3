// Define data modules
mod catalog; // Service catalog operations (list/add/update/delete)
mod config; // Tunables from the environment, default catalog
mod errors; // Crate-wide error type with HTTP mapping
mod ledger; // Payments and the cash register
mod models; // Data structures (Appointment, Service, Db)
mod routes_admin; // HTTP handlers for dashboard, reset and login
mod routes_appointments; // HTTP handlers for booking and the appointment book
mod routes_services; // HTTP handlers for the catalog
mod scheduler; // Booking validation and creation
mod state; // Shared handler state
mod store; // Persistent storage (load/save the JSON document)

// Import axum routing utilities and Router
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::net::SocketAddr;
use tower_http::services::ServeDir; // Used to serve the static front end
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::store::Store;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    let store = Store::open(&config.database_path);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let state = AppState::new(store, config);

    let api = Router::new()
        // appointments
        .route(
            "/appointments",
            get(routes_appointments::list_appointments).post(routes_appointments::book_appointment),
        )
        .route(
            "/appointments/:id",
            delete(routes_appointments::delete_appointment),
        )
        .route(
            "/appointments/:id/pay",
            post(routes_appointments::pay_appointment),
        )
        // services
        .route(
            "/services",
            get(routes_services::list_services).post(routes_services::create_service),
        )
        .route(
            "/services/:id",
            put(routes_services::update_service).delete(routes_services::delete_service),
        )
        // admin
        .route("/dashboard", get(routes_admin::get_dashboard))
        .route("/reset", post(routes_admin::reset_database))
        .route("/login", post(routes_admin::login))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api)
        .nest_service("/", ServeDir::new("static"));

    tracing::info!("serving on http://{addr}");
    tracing::info!("API base: http://{addr}/api");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind failed");

    axum::serve(listener, app).await.expect("server error");
}
