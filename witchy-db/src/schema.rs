//! SQLite schema creation.

use std::path::Path;

use rusqlite::{Connection, OpenFlags};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// The six entity tables, in seed order.
pub const TABLES: [&str; 6] = ["herbs", "crystals", "colors", "moon_phases", "metals", "days"];

/// Name of the full-text index spanning every entity kind.
pub const FTS_TABLE: &str = "witchy_fts";

/// Create all tables, indexes, the full-text index and its triggers if they
/// don't exist.
///
/// Idempotent; safe to call on an existing database.
pub fn create_schema(conn: &Connection) -> Result<(), SchemaError> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// True when all six entity tables and the full-text index exist.
pub fn schema_present(conn: &Connection) -> Result<bool, SchemaError> {
    let mut stmt =
        conn.prepare("SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE name = ?1)")?;
    for table in TABLES.iter().chain(std::iter::once(&FTS_TABLE)) {
        let exists: bool = stmt.query_row([table], |row| row.get(0))?;
        if !exists {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Open or create a database at the given path for migration work.
///
/// The schema is not touched; the migrator decides what to create.
pub fn open_database(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

/// Open an existing database read-only for a single query.
///
/// Fails instead of creating an empty file when the database is missing.
pub fn open_for_query(path: &Path) -> Result<Connection, SchemaError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    create_schema(&conn)?;
    Ok(conn)
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS herbs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    ritual_use TEXT NOT NULL,
    also_called TEXT, -- JSON array of alternative names
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS crystals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    properties TEXT NOT NULL,
    also_called TEXT, -- JSON array of alternative names
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS colors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    meanings TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS moon_phases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    phase TEXT NOT NULL,
    meaning TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS metals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    properties TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS days (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    intent TEXT NOT NULL,
    planet TEXT,
    colors TEXT,
    deities TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_herbs_name ON herbs(name);
CREATE INDEX IF NOT EXISTS idx_crystals_name ON crystals(name);
CREATE INDEX IF NOT EXISTS idx_colors_name ON colors(name);
CREATE INDEX IF NOT EXISTS idx_moon_phase ON moon_phases(phase);
CREATE INDEX IF NOT EXISTS idx_metals_name ON metals(name);
CREATE INDEX IF NOT EXISTS idx_days_name ON days(name);

-- One index over every content type, tagged by entity kind
CREATE VIRTUAL TABLE IF NOT EXISTS witchy_fts USING fts5(
    content_type UNINDEXED,
    entity_id UNINDEXED,
    name,
    content,
    also_called,
    tokenize = 'porter unicode61'
);

CREATE TRIGGER IF NOT EXISTS herbs_fts_insert AFTER INSERT ON herbs BEGIN
    INSERT INTO witchy_fts(content_type, entity_id, name, content, also_called)
    VALUES ('herb', new.id, new.name, new.ritual_use, new.also_called);
END;

CREATE TRIGGER IF NOT EXISTS crystals_fts_insert AFTER INSERT ON crystals BEGIN
    INSERT INTO witchy_fts(content_type, entity_id, name, content, also_called)
    VALUES ('crystal', new.id, new.name, new.properties, new.also_called);
END;

CREATE TRIGGER IF NOT EXISTS colors_fts_insert AFTER INSERT ON colors BEGIN
    INSERT INTO witchy_fts(content_type, entity_id, name, content, also_called)
    VALUES ('color', new.id, new.name, new.meanings, NULL);
END;

CREATE TRIGGER IF NOT EXISTS moon_fts_insert AFTER INSERT ON moon_phases BEGIN
    INSERT INTO witchy_fts(content_type, entity_id, name, content, also_called)
    VALUES ('moon', new.id, new.phase, new.meaning, NULL);
END;

CREATE TRIGGER IF NOT EXISTS metals_fts_insert AFTER INSERT ON metals BEGIN
    INSERT INTO witchy_fts(content_type, entity_id, name, content, also_called)
    VALUES ('metal', new.id, new.name, new.properties, NULL);
END;

CREATE TRIGGER IF NOT EXISTS days_fts_insert AFTER INSERT ON days BEGIN
    INSERT INTO witchy_fts(content_type, entity_id, name, content, also_called)
    VALUES ('day', new.id, new.name, new.intent, NULL);
END;
"#;
