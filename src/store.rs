use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::{info, warn};

use crate::config;
use crate::errors::{Error, Result};
use crate::models::Db;

pub const DB_PATH: &str = "data/barberia.json";

/// The persisted database. Loaded once at startup; every mutating operation
/// ends with a full save, so the document on disk always matches the last
/// completed operation.
pub struct Store {
    path: PathBuf,
    db: Db,
}

impl Store {
    // Opening never fails: a missing document is a first run, and an
    // unreadable one is recovered by starting over from the default state.
    // There is no user session yet to notify, so recovery is only logged.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let db = match fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Db>(&text) {
                Ok(db) => db,
                Err(err) => {
                    warn!(
                        "corrupt database at {}: {err}; starting from defaults",
                        path.display()
                    );
                    Db::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("no database at {}, starting fresh", path.display());
                Db::default()
            }
            Err(err) => {
                warn!(
                    "could not read database at {}: {err}; starting from defaults",
                    path.display()
                );
                Db::default()
            }
        };

        let mut store = Self { path, db };

        // One-time migration: documents written before the catalog moved
        // into the store have no services. Install the defaults and persist
        // right away so the next load sees a complete document.
        if store.db.services.is_empty() {
            store.db.services = config::default_services();
            if let Err(err) = store.save() {
                warn!("could not persist the migrated catalog: {err}");
            }
        }

        store
    }

    pub fn db(&self) -> &Db {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut Db {
        &mut self.db
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    // Whole-document write through a temp file and rename, so a failed write
    // never leaves a half-serialized database behind. On failure the
    // in-memory state stays authoritative for this process.
    pub fn save(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.db)
            .map_err(|e| Error::Persistence(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(Error::Persistence)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, text).map_err(Error::Persistence)?;
        fs::rename(&tmp_path, &self.path).map_err(Error::Persistence)?;
        Ok(())
    }

    // Destructive: drops every appointment and the accumulated cash, and
    // reinstalls the default catalog. Identical to first-run initialization.
    pub fn reset(&mut self, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Err(Error::ConfirmationRequired("resetting the database"));
        }
        self.db = Db {
            services: config::default_services(),
            ..Db::default()
        };
        self.save()
    }
}
