//! SQLite persistence layer for the correspondence catalog.
//!
//! Provides schema creation, the transactional bulk seed, and generic
//! per-entity queries backed by SQLite (via rusqlite with bundled feature,
//! which ships the FTS5 and JSON extensions).

pub mod operations;
pub mod queries;
pub mod schema;
pub mod table;

pub use operations::{seed_all, table_count, table_counts, unseeded_kinds, SeedError, SeedStats};
pub use queries::{find_by_content, find_by_name, list_all, suggest};
pub use schema::{
    create_schema, open_database, open_for_query, open_memory, schema_present, SchemaError,
};
pub use table::{table_name, TableRecord};
