use std::path::PathBuf;

use thiserror::Error;
use witchy_db::{SchemaError, SeedError};

/// Errors resolving or creating the application's directories.
#[derive(Debug, Error)]
pub enum PathError {
    /// No home directory could be determined for the current user
    #[error("Could not determine the home directory")]
    NoHome,

    /// Source-checkout mode was requested but the source root is unknown
    #[error("Source checkout root is unknown")]
    NoSourceRoot,

    /// The data directory could not be created
    #[error("Failed to create data directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Unrecognized packaging mode name
    #[error("Unknown mode '{0}' (expected source, installed or packaged)")]
    UnknownMode(String),
}

impl PathError {
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }
}

/// Errors while bringing the database to a fully seeded state.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Seeding failed and was rolled back
    #[error("Seed error: {0}")]
    Seed(#[from] SeedError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Copying the bundled database or removing the old file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MigrationError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// A query against the SQLite store could not be answered.
///
/// Never surfaced to users: repositories answer from the seed data instead.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: SchemaError,
    },

    #[error("Query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// The blocking query task panicked or was cancelled
    #[error("Query task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
