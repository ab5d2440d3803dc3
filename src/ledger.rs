/*
Payment state and the cash register.
An appointment is pending until it is charged; charging moves its stored
price into the register. Deleting a record never moves money back.
*/

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use crate::errors::{Error, Result};
use crate::models::{Appointment, AppointmentStatus, round2};
use crate::store::Store;

// Only pending appointments can be charged; an id that is absent or already
// paid reports not-found. The register can never take the same price twice.
pub fn process_payment(
    store: &mut Store,
    id: Uuid,
    now: DateTime<FixedOffset>,
) -> Result<Appointment> {
    let db = store.db_mut();
    let Some(appointment) = db
        .appointments
        .iter_mut()
        .find(|a| a.id == id && a.status == AppointmentStatus::Pending)
    else {
        return Err(Error::AppointmentNotFound(id));
    };

    appointment.status = AppointmentStatus::Paid;
    appointment.updated_at = Some(now);
    let paid = appointment.clone();

    db.cash = round2(db.cash + paid.price);
    store.save()?;

    Ok(paid)
}

// Removing a paid appointment needs the explicit confirmation flag, and it
// leaves the register untouched: the money was taken, only the record goes.
pub fn delete_appointment(store: &mut Store, id: Uuid, confirmed: bool) -> Result<()> {
    let db = store.db_mut();
    let Some(index) = db.appointments.iter().position(|a| a.id == id) else {
        return Err(Error::AppointmentNotFound(id));
    };

    if db.appointments[index].status == AppointmentStatus::Paid && !confirmed {
        return Err(Error::ConfirmationRequired("deleting a paid appointment"));
    }

    db.appointments.remove(index);
    store.save()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::scheduler;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("db.json"));
        (dir, store)
    }

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2030, 5, 31, 12, 0, 0)
            .unwrap()
    }

    fn book(store: &mut Store, client: &str, date: &str) -> Appointment {
        scheduler::book_appointment(store, &Config::default(), client, date, 1, now()).unwrap()
    }

    #[test]
    fn charging_moves_the_stored_price_into_the_register() {
        let (_dir, mut store) = test_store();
        let appointment = book(&mut store, "Ana López", "2030-06-01T10:00");

        let paid = process_payment(&mut store, appointment.id, now()).unwrap();
        assert_eq!(paid.status, AppointmentStatus::Paid);
        assert!(paid.updated_at.is_some());
        assert_eq!(store.db().cash, 5.0);
    }

    #[test]
    fn charging_uses_the_price_at_booking_time() {
        let (_dir, mut store) = test_store();
        let appointment = book(&mut store, "Ana López", "2030-06-01T10:00");

        // Raising the catalog price afterwards must not rewrite history.
        crate::catalog::update(
            &mut store,
            1,
            crate::catalog::ServiceUpdate {
                price: Some(9.0),
                ..Default::default()
            },
        )
        .unwrap();

        process_payment(&mut store, appointment.id, now()).unwrap();
        assert_eq!(store.db().cash, 5.0);
    }

    #[test]
    fn an_appointment_can_only_be_charged_once() {
        let (_dir, mut store) = test_store();
        let appointment = book(&mut store, "Ana López", "2030-06-01T10:00");

        process_payment(&mut store, appointment.id, now()).unwrap();
        let err = process_payment(&mut store, appointment.id, now()).unwrap_err();
        assert!(matches!(err, Error::AppointmentNotFound(_)));
        assert_eq!(store.db().cash, 5.0);
    }

    #[test]
    fn charging_an_unknown_id_is_not_found() {
        let (_dir, mut store) = test_store();
        let err = process_payment(&mut store, Uuid::new_v4(), now()).unwrap_err();
        assert!(matches!(err, Error::AppointmentNotFound(_)));
        assert_eq!(store.db().cash, 0.0);
    }

    #[test]
    fn deleting_a_pending_appointment_needs_no_confirmation() {
        let (_dir, mut store) = test_store();
        let appointment = book(&mut store, "Ana López", "2030-06-01T10:00");

        delete_appointment(&mut store, appointment.id, false).unwrap();
        assert!(store.db().appointments.is_empty());
    }

    #[test]
    fn deleting_a_paid_appointment_keeps_the_cash() {
        let (_dir, mut store) = test_store();
        let appointment = book(&mut store, "Ana López", "2030-06-01T10:00");
        process_payment(&mut store, appointment.id, now()).unwrap();

        // Without the flag the record stays.
        let err = delete_appointment(&mut store, appointment.id, false).unwrap_err();
        assert!(matches!(err, Error::ConfirmationRequired(_)));
        assert_eq!(store.db().appointments.len(), 1);

        // With it the record goes, the money does not.
        delete_appointment(&mut store, appointment.id, true).unwrap();
        assert!(store.db().appointments.is_empty());
        assert_eq!(store.db().cash, 5.0);
    }

    #[test]
    fn deleting_an_unknown_id_is_not_found() {
        let (_dir, mut store) = test_store();
        let err = delete_appointment(&mut store, Uuid::new_v4(), true).unwrap_err();
        assert!(matches!(err, Error::AppointmentNotFound(_)));
    }

    // The whole working day in one pass: book, get turned away by the
    // margin, charge, clear the board.
    #[test]
    fn booking_payment_and_deletion_end_to_end() {
        let (_dir, mut store) = test_store();

        let first = book(&mut store, "Ana López", "2030-06-01T10:00");
        assert_eq!(first.price, 5.0);
        assert_eq!(first.status, AppointmentStatus::Pending);

        let err = scheduler::book_appointment(
            &mut store,
            &Config::default(),
            "Ana López",
            "2030-06-01T10:15",
            1,
            now(),
        )
        .unwrap_err();
        match err {
            Error::SlotConflict { taken } => assert_eq!(taken, first.date),
            other => panic!("expected SlotConflict, got {other:?}"),
        }

        let paid = process_payment(&mut store, first.id, now()).unwrap();
        assert_eq!(paid.status, AppointmentStatus::Paid);
        assert_eq!(store.db().cash, 5.0);

        delete_appointment(&mut store, first.id, true).unwrap();
        assert!(store.db().appointments.is_empty());
        assert_eq!(store.db().cash, 5.0);
    }
}
