/*
Booking validation and appointment creation.
Kept independent from HTTP / Axum so the rules are testable on their own;
"now" is always passed in, never read from the clock inside the checks.
*/

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Timelike};
use uuid::Uuid;

use crate::catalog;
use crate::config::Config;
use crate::errors::{Error, Result};
use crate::models::{Appointment, AppointmentStatus};
use crate::store::Store;

// Local clock as a fixed offset, so hour-of-day checks follow the shop's
// wall clock.
pub fn now_local() -> DateTime<FixedOffset> {
    let local = chrono::Local::now();
    let offset_seconds = local.offset().local_minus_utc();
    let fixed = FixedOffset::east_opt(offset_seconds).unwrap();
    local.with_timezone(&fixed)
}

// Accepts RFC 3339, or the naive "YYYY-MM-DDTHH:MM[:SS]" a datetime-local
// form field submits, read at the shop's own offset. Either way the result
// is normalized to the shop offset before any comparison.
pub fn parse_booking_date(raw: &str, now: DateTime<FixedOffset>) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(now.offset()));
    }

    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|_| Error::InvalidDate(raw.to_string()))?;
    now.offset()
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| Error::InvalidDate(raw.to_string()))
}

// Margin scan, symmetric in time: a candidate within `margin_min` minutes
// of any pending appointment is rejected, in either direction. Paid
// appointments are closed and never block a slot.
pub fn find_conflict(
    appointments: &[Appointment],
    candidate: DateTime<FixedOffset>,
    margin_min: i64,
) -> Option<&Appointment> {
    appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Pending)
        .find(|a| (a.date - candidate).num_minutes().abs() < margin_min)
}

// Checks run format-first (name, date shape), then semantics (past date,
// working hours), then the conflict scan, so the caller gets the most
// specific rejection available.
pub fn book_appointment(
    store: &mut Store,
    config: &Config,
    client: &str,
    date_raw: &str,
    service_id: i64,
    now: DateTime<FixedOffset>,
) -> Result<Appointment> {
    let client = client.trim();
    if client.chars().count() < 3 {
        return Err(Error::InvalidClientName);
    }

    let date = parse_booking_date(date_raw, now)?;

    if date <= now {
        return Err(Error::PastDate(date));
    }

    let hour = date.hour();
    if hour < config.open_hour || hour >= config.close_hour {
        return Err(Error::OutsideHours {
            hour,
            open: config.open_hour,
            close: config.close_hour,
        });
    }

    if let Some(taken) = find_conflict(&store.db().appointments, date, config.margin_min) {
        return Err(Error::SlotConflict { taken: taken.date });
    }

    // Snapshot the service name and price as they are right now. Later
    // catalog edits must not touch booked records.
    let service = catalog::find(store.db(), service_id)?.clone();

    let appointment = Appointment {
        id: Uuid::new_v4(),
        client: client.to_string(),
        service_id: service.id,
        service: service.name,
        price: service.price,
        date,
        status: AppointmentStatus::Pending,
        created_at: now,
        updated_at: None,
    };

    store.db_mut().appointments.push(appointment.clone());
    store.save()?;

    Ok(appointment)
}
