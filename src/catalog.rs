// The service catalog: what the shop offers and at which price.
// The shop must always have something to offer, so deletion stops at one
// remaining service. Appointments keep their own snapshot of name and
// price, so catalog edits never rewrite booked records.

use serde::Deserialize;

use crate::config;
use crate::errors::{Error, Result};
use crate::models::{Db, Service, round2};
use crate::store::Store;

// Active service set: the persisted catalog when there is one, otherwise
// the compiled-in defaults. Never empty.
pub fn list(db: &Db) -> Vec<Service> {
    if db.services.is_empty() {
        config::default_services()
    } else {
        db.services.clone()
    }
}

pub fn find(db: &Db, id: i64) -> Result<&Service> {
    db.services
        .iter()
        .find(|s| s.id == id)
        .ok_or(Error::ServiceNotFound(id))
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.chars().count() < 3 {
        return Err(Error::InvalidServiceName);
    }
    Ok(name.to_string())
}

fn validate_price(price: f64) -> Result<f64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(Error::InvalidServicePrice);
    }
    Ok(round2(price))
}

pub fn add(store: &mut Store, name: &str, price: f64) -> Result<Service> {
    let name = validate_name(name)?;
    let price = validate_price(price)?;

    let db = store.db_mut();
    // Ids grow from the highest one ever present, 1 when the catalog is empty.
    let id = db.services.iter().map(|s| s.id).max().unwrap_or(0) + 1;
    let service = Service { id, name, price };
    db.services.push(service.clone());
    store.save()?;

    Ok(service)
}

/// Partial update: absent fields keep their current value.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub price: Option<f64>,
}

pub fn update(store: &mut Store, id: i64, fields: ServiceUpdate) -> Result<Service> {
    let name = fields.name.as_deref().map(validate_name).transpose()?;
    let price = fields.price.map(validate_price).transpose()?;

    let db = store.db_mut();
    let Some(service) = db.services.iter_mut().find(|s| s.id == id) else {
        return Err(Error::ServiceNotFound(id));
    };

    if let Some(name) = name {
        service.name = name;
    }
    if let Some(price) = price {
        service.price = price;
    }
    let updated = service.clone();
    store.save()?;

    Ok(updated)
}

pub fn delete(store: &mut Store, id: i64) -> Result<()> {
    let db = store.db_mut();
    if !db.services.iter().any(|s| s.id == id) {
        return Err(Error::ServiceNotFound(id));
    }
    if db.services.len() == 1 {
        return Err(Error::MinimumCatalog);
    }

    db.services.retain(|s| s.id != id);
    store.save()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("db.json"));
        (dir, store)
    }

    #[test]
    fn list_never_returns_an_empty_catalog() {
        let empty = Db::default();
        let services = list(&empty);
        assert!(!services.is_empty());
        assert_eq!(services, config::default_services());
    }

    #[test]
    fn add_assigns_the_next_id_and_rounds_the_price() {
        let (_dir, mut store) = test_store();
        let service = add(&mut store, "  Afeitado Premium  ", 7.125).unwrap();
        assert_eq!(service.id, 5);
        assert_eq!(service.name, "Afeitado Premium");
        assert_eq!(service.price, 7.13);
        assert_eq!(store.db().services.len(), 5);
    }

    #[test]
    fn add_rejects_short_names_and_bad_prices() {
        let (_dir, mut store) = test_store();
        assert!(matches!(
            add(&mut store, "ab", 5.0),
            Err(Error::InvalidServiceName)
        ));
        assert!(matches!(
            add(&mut store, "Corte", 0.0),
            Err(Error::InvalidServicePrice)
        ));
        assert!(matches!(
            add(&mut store, "Corte", -3.0),
            Err(Error::InvalidServicePrice)
        ));
        assert!(matches!(
            add(&mut store, "Corte", f64::NAN),
            Err(Error::InvalidServicePrice)
        ));
        assert_eq!(store.db().services.len(), 4);
    }

    #[test]
    fn update_merges_only_the_given_fields() {
        let (_dir, mut store) = test_store();
        let updated = update(
            &mut store,
            1,
            ServiceUpdate {
                price: Some(5.509),
                ..ServiceUpdate::default()
            },
        )
        .unwrap();
        assert_eq!(updated.name, "Corte Clásico");
        assert_eq!(updated.price, 5.51);

        let err = update(&mut store, 99, ServiceUpdate::default()).unwrap_err();
        assert!(matches!(err, Error::ServiceNotFound(99)));
    }

    #[test]
    fn delete_keeps_at_least_one_service() {
        let (_dir, mut store) = test_store();
        delete(&mut store, 2).unwrap();
        delete(&mut store, 3).unwrap();
        delete(&mut store, 4).unwrap();
        assert_eq!(store.db().services.len(), 1);

        let err = delete(&mut store, 1).unwrap_err();
        assert!(matches!(err, Error::MinimumCatalog));
        assert_eq!(store.db().services.len(), 1);
        assert_eq!(store.db().services[0].id, 1);
    }

    #[test]
    fn delete_unknown_id_is_not_found() {
        let (_dir, mut store) = test_store();
        assert!(matches!(
            delete(&mut store, 99),
            Err(Error::ServiceNotFound(99))
        ));
    }
}
