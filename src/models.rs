use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: Uuid,
    pub client: String,
    pub service_id: i64,
    pub service: String, // service name at booking time
    pub price: f64,      // price at booking time, decoupled from later catalog edits
    pub date: DateTime<FixedOffset>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: Option<DateTime<FixedOffset>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Db {
    pub appointments: Vec<Appointment>,
    pub cash: f64,
    // Absent in documents written before the catalog moved into the store.
    #[serde(default)]
    pub services: Vec<Service>,
}

// Money keeps two decimal places, like the register tape.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
