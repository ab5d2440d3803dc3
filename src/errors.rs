use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
    #[error("client name must have at least 3 characters")]
    InvalidClientName,

    #[error("invalid appointment date: {0}")]
    InvalidDate(String),

    #[error("service name must have at least 3 characters")]
    InvalidServiceName,

    #[error("service price must be a positive amount")]
    InvalidServicePrice,

    #[error("appointment date {0} is already in the past")]
    PastDate(DateTime<FixedOffset>),

    #[error("hour {hour} is outside working hours ({open}:00 to {close}:00)")]
    OutsideHours { hour: u32, open: u32, close: u32 },

    #[error("too close to the appointment already booked at {taken}")]
    SlotConflict { taken: DateTime<FixedOffset> },

    #[error("no appointment with id {0}")]
    AppointmentNotFound(Uuid),

    #[error("no service with id {0}")]
    ServiceNotFound(i64),

    #[error("the catalog must keep at least one service")]
    MinimumCatalog,

    #[error("{0} requires explicit confirmation")]
    ConfirmationRequired(&'static str),

    #[error("failed to persist database: {0}")]
    Persistence(#[source] std::io::Error),
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

/// Error body returned to the presentation layer: a stable code for
/// programmatic handling plus a human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidClientName
            | Error::InvalidDate(_)
            | Error::InvalidServiceName
            | Error::InvalidServicePrice
            | Error::PastDate(_)
            | Error::OutsideHours { .. } => StatusCode::BAD_REQUEST,
            Error::SlotConflict { .. }
            | Error::MinimumCatalog
            | Error::ConfirmationRequired(_) => StatusCode::CONFLICT,
            Error::AppointmentNotFound(_) | Error::ServiceNotFound(_) => StatusCode::NOT_FOUND,
            Error::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidClientName => "INVALID_CLIENT_NAME",
            Error::InvalidDate(_) => "INVALID_DATE",
            Error::InvalidServiceName => "INVALID_SERVICE_NAME",
            Error::InvalidServicePrice => "INVALID_SERVICE_PRICE",
            Error::PastDate(_) => "PAST_DATE",
            Error::OutsideHours { .. } => "OUTSIDE_WORKING_HOURS",
            Error::SlotConflict { .. } => "SLOT_CONFLICT",
            Error::AppointmentNotFound(_) => "APPOINTMENT_NOT_FOUND",
            Error::ServiceNotFound(_) => "SERVICE_NOT_FOUND",
            Error::MinimumCatalog => "MINIMUM_CATALOG_SIZE",
            Error::ConfirmationRequired(_) => "CONFIRMATION_REQUIRED",
            Error::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            code: self.error_code(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
