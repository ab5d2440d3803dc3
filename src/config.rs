use std::env;
use std::str::FromStr;

use crate::models::Service;

/// Tunables for the shop, read once at startup. Every value has a
/// compiled-in default so the binary runs with no environment at all.
#[derive(Debug, Clone)]
pub struct Config {
    pub open_hour: u32,  // first bookable hour, 24h clock
    pub close_hour: u32, // first hour past closing (bookings allowed in [open, close))
    pub margin_min: i64, // minimum spacing between pending appointments, minutes
    pub admin_password: String,
    pub database_path: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            open_hour: 8,
            close_hour: 20,
            margin_min: 30,
            admin_password: "1234".to_string(),
            database_path: crate::store::DB_PATH.to_string(),
            port: 3000,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();

        let admin_password =
            env::var("ADMIN_PASSWORD").unwrap_or_else(|_| defaults.admin_password.clone());
        if admin_password == "1234" {
            tracing::warn!(
                "ADMIN_PASSWORD not set. Using the default password '1234'. Set ADMIN_PASSWORD in production."
            );
        }

        Self {
            open_hour: env_or("OPEN_HOUR", defaults.open_hour),
            close_hour: env_or("CLOSE_HOUR", defaults.close_hour),
            margin_min: env_or("APPOINTMENT_MARGIN_MIN", defaults.margin_min),
            admin_password,
            database_path: env::var("DATABASE_PATH").unwrap_or(defaults.database_path),
            port: env_or("PORT", defaults.port),
        }
    }
}

fn env_or<T: FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(fallback)
}

// The catalog the shop opens with, and the fallback whenever a persisted
// document carries no services.
pub fn default_services() -> Vec<Service> {
    vec![
        Service {
            id: 1,
            name: "Corte Clásico".to_string(),
            price: 5.00,
        },
        Service {
            id: 2,
            name: "Barba y Corte".to_string(),
            price: 8.00,
        },
        Service {
            id: 3,
            name: "Corte Urbano".to_string(),
            price: 6.00,
        },
        Service {
            id: 4,
            name: "Tratamiento Facial".to_string(),
            price: 4.00,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_usable() {
        let services = default_services();
        assert!(!services.is_empty());
        assert!(services.iter().all(|s| s.price > 0.0));

        // Ids are unique so `max + 1` assignment stays collision-free.
        let mut ids: Vec<i64> = services.iter().map(|s| s.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), services.len());
    }
}
