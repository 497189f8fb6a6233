//! Data provisioning for the witchy correspondence lookup.
//!
//! Resolves where the database lives, brings it to a fully seeded state,
//! and exposes typed repositories that fall back to the built-in seed data
//! whenever the database cannot answer.

pub mod datastore;
pub mod error;
pub mod lifecycle;
pub mod migrator;
pub mod paths;
pub mod repository;

pub use datastore::{Datastore, Readiness};
pub use error::{MigrationError, PathError, StorageError};
pub use lifecycle::TempDatabase;
pub use migrator::{build_asset, DbStats, Migrator, TableStat};
pub use paths::{AppPaths, HostEnv, HostOs, PackagingMode};
pub use repository::{RecordSource, Repository, SeedSource, SqliteSource, DEFAULT_SUGGESTIONS};

// Re-export the lower crates so frontends depend on one crate.
pub use witchy_catalog;
pub use witchy_db;
