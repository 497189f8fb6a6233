//! Ties paths, migration and repositories together for one process.
//!
//! [`Datastore::ready`] runs the migration at most once and every caller
//! awaits the same outcome. A failed migration does not disable the store:
//! each lookup still tries SQLite first and falls back for that call only.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OnceCell;
use witchy_catalog::{Color, Crystal, Day, Herb, Metal, MoonPhase, SeedData};
use witchy_db::TableRecord;

use crate::lifecycle::TempDatabase;
use crate::migrator::Migrator;
use crate::paths::{AppPaths, PackagingMode};
use crate::repository::{Repository, SqliteSource};

/// Outcome of preparing the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    /// The database is usable; `migrated` is true if this run changed it.
    Ready { migrated: bool },
    /// The database could not be prepared; lookups fall back to built-in
    /// data whenever the store cannot answer.
    Unavailable(String),
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready { .. })
    }
}

pub struct Datastore {
    paths: AppPaths,
    seed: Arc<SeedData>,
    active_path: PathBuf,
    temp: Option<TempDatabase>,
    silent: bool,
    quiet: bool,
    readiness: OnceCell<Readiness>,
}

impl Datastore {
    /// Choose the active database file.
    ///
    /// In packaged mode the bundled database is copied to a per-process temp
    /// file; if that fails, the writable file in the data directory is used.
    pub fn open(paths: AppPaths, seed: Arc<SeedData>) -> Self {
        let mut temp = None;
        if paths.mode == PackagingMode::Packaged {
            if let (Some(asset), Some(temp_path)) = (&paths.bundled_asset, &paths.temp_db_path) {
                match TempDatabase::materialize(asset, temp_path) {
                    Ok(t) => temp = Some(t),
                    Err(e) => log::warn!(
                        "Could not copy bundled database to {}: {}",
                        temp_path.display(),
                        e
                    ),
                }
            }
        }

        let active_path = match &temp {
            Some(t) => t.path().to_path_buf(),
            None => paths.db_path.clone(),
        };
        log::debug!("Active database: {}", active_path.display());

        Self {
            paths,
            seed,
            active_path,
            temp,
            silent: false,
            quiet: false,
            readiness: OnceCell::new(),
        }
    }

    /// Message level for the migration run by [`Datastore::ready`].
    pub fn with_output(mut self, silent: bool, quiet: bool) -> Self {
        self.silent = silent;
        self.quiet = quiet;
        self
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn seed(&self) -> &Arc<SeedData> {
        &self.seed
    }

    /// The database file lookups and migrations operate on.
    pub fn active_path(&self) -> &Path {
        &self.active_path
    }

    pub fn temp_database(&self) -> Option<&TempDatabase> {
        self.temp.as_ref()
    }

    /// Migrator for the active database.
    pub fn migrator(&self) -> Migrator {
        Migrator::new(&self.active_path, self.seed.clone())
            .with_bundled_asset(self.paths.bundled_asset.clone())
    }

    /// Prepare the database once; later calls return the first outcome.
    pub async fn ready(&self) -> &Readiness {
        self.readiness
            .get_or_init(|| async {
                let migrator = self.migrator();
                let (silent, quiet) = (self.silent, self.quiet);
                let outcome =
                    tokio::task::spawn_blocking(move || migrator.ensure_ready(silent, quiet)).await;
                match outcome {
                    Ok(Ok(migrated)) => Readiness::Ready { migrated },
                    Ok(Err(e)) => self.unavailable(e.to_string()),
                    Err(e) => self.unavailable(format!("migration task failed: {}", e)),
                }
            })
            .await
    }

    fn unavailable(&self, reason: String) -> Readiness {
        if self.silent {
            log::debug!("Database unavailable, using built-in data: {}", reason);
        } else {
            log::warn!("Database unavailable, using built-in data: {}", reason);
        }
        Readiness::Unavailable(reason)
    }

    /// Lookups for one entity kind, after the database is prepared.
    ///
    /// The store is handed out even when readiness failed; each call retries
    /// it before falling back.
    pub async fn repository<E: TableRecord>(&self) -> Repository<E> {
        if let Readiness::Unavailable(reason) = self.ready().await {
            log::debug!("Lookups will retry {}: {}", self.active_path.display(), reason);
        }
        Repository::new(Some(SqliteSource::new(&self.active_path)), self.seed.clone())
    }

    pub async fn herbs(&self) -> Repository<Herb> {
        self.repository().await
    }

    pub async fn crystals(&self) -> Repository<Crystal> {
        self.repository().await
    }

    pub async fn colors(&self) -> Repository<Color> {
        self.repository().await
    }

    pub async fn moon_phases(&self) -> Repository<MoonPhase> {
        self.repository().await
    }

    pub async fn metals(&self) -> Repository<Metal> {
        self.repository().await
    }

    pub async fn days(&self) -> Repository<Day> {
        self.repository().await
    }
}

#[cfg(test)]
#[path = "tests/datastore_tests.rs"]
mod tests;
