//! Bulk seeding and table statistics.

use rusqlite::{Connection, Transaction};
use thiserror::Error;
use witchy_catalog::{Color, Crystal, Day, EntityKind, Herb, Metal, MoonPhase, SeedData};

use crate::schema::{FTS_TABLE, TABLES};
use crate::table::{table_name, TableRecord};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Failed to serialize aliases: {0}")]
    Aliases(#[from] serde_json::Error),
}

/// Statistics from seeding the database.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedStats {
    pub herbs: usize,
    pub crystals: usize,
    pub colors: usize,
    pub moon_phases: usize,
    pub metals: usize,
    pub days: usize,
}

impl SeedStats {
    pub fn total(&self) -> usize {
        self.herbs + self.crystals + self.colors + self.moon_phases + self.metals + self.days
    }
}

/// Replace the contents of all six tables with the seed datasets.
///
/// Runs in a single transaction: existing rows and the full-text index are
/// cleared, every record is inserted, then the transaction commits. On any
/// error the transaction is dropped uncommitted and the previous contents
/// remain untouched.
pub fn seed_all(conn: &mut Connection, seed: &SeedData) -> Result<SeedStats, SeedError> {
    let tx = conn.transaction()?;

    for table in TABLES {
        tx.execute(&format!("DELETE FROM {table}"), [])?;
    }
    tx.execute(&format!("DELETE FROM {FTS_TABLE}"), [])?;

    let stats = SeedStats {
        herbs: insert_all::<Herb>(&tx, &seed.herbs)?,
        crystals: insert_all::<Crystal>(&tx, &seed.crystals)?,
        colors: insert_all::<Color>(&tx, &seed.colors)?,
        moon_phases: insert_all::<MoonPhase>(&tx, &seed.moon)?,
        metals: insert_all::<Metal>(&tx, &seed.metals)?,
        days: insert_all::<Day>(&tx, &seed.days)?,
    };

    tx.commit()?;
    log::debug!("Seeded {} records", stats.total());
    Ok(stats)
}

fn insert_all<T: TableRecord>(tx: &Transaction<'_>, records: &[T]) -> Result<usize, SeedError> {
    let mut stmt = tx.prepare(T::INSERT_SQL)?;
    for record in records {
        record.insert(&mut stmt)?;
    }
    log::debug!("  {} {} inserted", records.len(), T::KIND.plural());
    Ok(records.len())
}

// ── Counts ──────────────────────────────────────────────────────────────────

/// Row count of one entity table.
pub fn table_count(conn: &Connection, kind: EntityKind) -> Result<u64, rusqlite::Error> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", table_name(kind)),
        [],
        |row| row.get(0),
    )?;
    Ok(count as u64)
}

/// Row count of every entity table, in [`EntityKind::ALL`] order.
pub fn table_counts(conn: &Connection) -> Result<Vec<(EntityKind, u64)>, rusqlite::Error> {
    EntityKind::ALL
        .iter()
        .map(|kind| Ok((*kind, table_count(conn, *kind)?)))
        .collect()
}

/// Kinds whose table row count differs from the seed dataset length.
///
/// A table counts as fully seeded only when its row count equals the
/// dataset length exactly; a partial table is never mistaken for a complete
/// one.
pub fn unseeded_kinds(conn: &Connection, seed: &SeedData) -> Result<Vec<EntityKind>, rusqlite::Error> {
    let mut stale = Vec::new();
    for (kind, count) in table_counts(conn)? {
        if count != seed.len_of(kind) as u64 {
            stale.push(kind);
        }
    }
    Ok(stale)
}
