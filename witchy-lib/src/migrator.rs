//! Brings a database file to a schema-correct, fully seeded state.
//!
//! [`Migrator::ensure_ready`] decides, in order:
//!
//! 1. a bundled database exists and the target is missing or empty: copy it;
//! 2. the target is missing: create the schema and seed;
//! 3. the schema is missing or some table's row count differs from its
//!    dataset: (create the schema and) reseed;
//! 4. otherwise: nothing to do.
//!
//! Every path that changes the database returns `true`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use witchy_catalog::{EntityKind, SeedData};
use witchy_db::SeedStats;

use crate::error::MigrationError;

#[derive(Debug, Clone)]
pub struct Migrator {
    target: PathBuf,
    bundled_asset: Option<PathBuf>,
    seed: Arc<SeedData>,
}

/// Snapshot of a database file for status display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStats {
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: u64,
    /// Empty when the file is missing
    pub tables: Vec<TableStat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStat {
    pub kind: EntityKind,
    /// `None` when the table could not be counted (e.g. schema missing)
    pub count: Option<u64>,
    pub expected: u64,
}

impl TableStat {
    pub fn is_complete(&self) -> bool {
        self.count == Some(self.expected)
    }
}

impl DbStats {
    pub fn total_records(&self) -> u64 {
        self.tables.iter().filter_map(|t| t.count).sum()
    }

    pub fn is_fully_seeded(&self) -> bool {
        self.exists && !self.tables.is_empty() && self.tables.iter().all(TableStat::is_complete)
    }
}

impl Migrator {
    pub fn new(target: impl Into<PathBuf>, seed: Arc<SeedData>) -> Self {
        Self {
            target: target.into(),
            bundled_asset: None,
            seed,
        }
    }

    /// Prefer copying this pre-built database over seeding from scratch.
    pub fn with_bundled_asset(mut self, asset: Option<PathBuf>) -> Self {
        self.bundled_asset = asset;
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Make sure the target database exists and is fully seeded.
    ///
    /// Returns whether anything was changed. `silent` suppresses all
    /// progress messages; `quiet` reduces them to a short first-use notice.
    pub fn ensure_ready(&self, silent: bool, quiet: bool) -> Result<bool, MigrationError> {
        let say = Notices { silent, quiet };

        if self.copy_bundled_if_needed()? {
            say.detail("Using pre-populated database");
            return Ok(true);
        }

        if !self.target.exists() {
            say.first_use("Database not found. Creating new database...");
            let stats = self.full_migration()?;
            say.done(&stats);
            return Ok(true);
        }

        let mut conn = witchy_db::open_database(&self.target)?;
        if !witchy_db::schema_present(&conn)? {
            say.first_use("Database exists but has no schema. Creating schema...");
            witchy_db::create_schema(&conn)?;
        } else {
            let stale = witchy_db::unseeded_kinds(&conn, &self.seed)?;
            if stale.is_empty() {
                log::debug!("Database at {} is up to date", self.target.display());
                return Ok(false);
            }
            let names: Vec<&str> = stale.iter().map(|k| k.plural()).collect();
            log::debug!("Incomplete tables: {}", names.join(", "));
            say.first_use("Database exists but is incomplete. Running data migration...");
        }

        let stats = witchy_db::seed_all(&mut conn, &self.seed)?;
        say.done(&stats);
        Ok(true)
    }

    /// Delete the database file and rebuild it from the seed data.
    ///
    /// Never copies the bundled database.
    pub fn reset(&self, silent: bool) -> Result<SeedStats, MigrationError> {
        match std::fs::remove_file(&self.target) {
            Ok(()) => {
                if !silent {
                    log::info!("Existing database deleted.");
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(MigrationError::io(&self.target, e)),
        }
        self.full_migration()
    }

    /// Row counts and file facts for the target database.
    pub fn stats(&self) -> Result<DbStats, MigrationError> {
        let metadata = match std::fs::metadata(&self.target) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(DbStats {
                    path: self.target.clone(),
                    exists: false,
                    size_bytes: 0,
                    tables: Vec::new(),
                });
            }
            Err(e) => return Err(MigrationError::io(&self.target, e)),
        };

        let conn = witchy_db::open_for_query(&self.target)?;
        let tables = EntityKind::ALL
            .iter()
            .map(|&kind| TableStat {
                kind,
                count: witchy_db::table_count(&conn, kind).ok(),
                expected: self.seed.len_of(kind) as u64,
            })
            .collect();

        Ok(DbStats {
            path: self.target.clone(),
            exists: true,
            size_bytes: metadata.len(),
            tables,
        })
    }

    fn copy_bundled_if_needed(&self) -> Result<bool, MigrationError> {
        let Some(asset) = &self.bundled_asset else {
            return Ok(false);
        };
        if !asset.is_file() {
            return Ok(false);
        }
        let target_empty = match std::fs::metadata(&self.target) {
            Ok(m) => m.len() == 0,
            Err(_) => true,
        };
        if !target_empty {
            return Ok(false);
        }

        std::fs::copy(asset, &self.target).map_err(|e| MigrationError::io(&self.target, e))?;
        log::debug!(
            "Copied bundled database {} -> {}",
            asset.display(),
            self.target.display()
        );
        Ok(true)
    }

    fn full_migration(&self) -> Result<SeedStats, MigrationError> {
        let mut conn = witchy_db::open_database(&self.target)?;
        witchy_db::create_schema(&conn)?;
        Ok(witchy_db::seed_all(&mut conn, &self.seed)?)
    }
}

/// Write a fresh, fully seeded database to `path`, replacing any file there.
///
/// This is the pre-built asset shipped beside packaged executables.
pub fn build_asset(path: &Path, seed: &SeedData) -> Result<SeedStats, MigrationError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MigrationError::io(parent, e))?;
    }
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(MigrationError::io(path, e)),
    }

    let mut conn = witchy_db::open_database(path)?;
    witchy_db::create_schema(&conn)?;
    let stats = witchy_db::seed_all(&mut conn, seed)?;
    conn.execute_batch("VACUUM;")?;
    Ok(stats)
}

/// Message gating for `ensure_ready`.
struct Notices {
    silent: bool,
    quiet: bool,
}

impl Notices {
    fn detail(&self, msg: &str) {
        if !self.silent && !self.quiet {
            log::info!("{}", msg);
        }
    }

    fn first_use(&self, detail: &str) {
        if self.quiet {
            log::info!("Setting up database for first use...");
        } else if !self.silent {
            log::info!("{}", detail);
        }
    }

    fn done(&self, stats: &SeedStats) {
        if self.quiet {
            log::info!("Database ready!");
        } else if !self.silent {
            log::info!("Seeded {} records.", stats.total());
        }
    }
}

#[cfg(test)]
#[path = "tests/migrator_tests.rs"]
mod tests;
