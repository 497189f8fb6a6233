//! Typed lookups with a per-call fallback to the built-in seed data.
//!
//! A [`Repository`] asks the SQLite store first. When that fails for any
//! reason, the same call is answered by scanning the seed dataset in memory;
//! the next call tries SQLite again. Both sources implement [`RecordSource`]
//! and return the same match sets.

use std::convert::Infallible;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::Connection;
use witchy_catalog::{matching, SeedData, Seeded};
use witchy_db::TableRecord;

use crate::error::StorageError;

/// Limit used for "did you mean" hints.
pub const DEFAULT_SUGGESTIONS: usize = 3;

/// Something that can answer lookups for one entity kind.
#[allow(async_fn_in_trait)]
pub trait RecordSource<E> {
    type Error;

    async fn find_by_name(&self, term: &str) -> Result<Option<E>, Self::Error>;

    async fn find_by_content(&self, term: &str) -> Result<Vec<E>, Self::Error>;

    async fn suggest(&self, term: &str, limit: usize) -> Result<Vec<E>, Self::Error>;

    async fn all(&self) -> Result<Vec<E>, Self::Error>;
}

// ── SQLite ──────────────────────────────────────────────────────────────────

/// Queries a database file, opening a fresh read-only connection per call on
/// the blocking thread pool.
#[derive(Debug, Clone)]
pub struct SqliteSource {
    path: PathBuf,
}

impl SqliteSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn with_connection<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<T, StorageError> {
            let conn = witchy_db::open_for_query(&path)
                .map_err(|source| StorageError::Open { path, source })?;
            Ok(op(&conn)?)
        })
        .await?
    }
}

impl<E: TableRecord> RecordSource<E> for SqliteSource {
    type Error = StorageError;

    async fn find_by_name(&self, term: &str) -> Result<Option<E>, StorageError> {
        let term = term.to_string();
        self.with_connection(move |conn| witchy_db::find_by_name::<E>(conn, &term))
            .await
    }

    async fn find_by_content(&self, term: &str) -> Result<Vec<E>, StorageError> {
        let term = term.to_string();
        self.with_connection(move |conn| witchy_db::find_by_content::<E>(conn, &term))
            .await
    }

    async fn suggest(&self, term: &str, limit: usize) -> Result<Vec<E>, StorageError> {
        let term = term.to_string();
        self.with_connection(move |conn| witchy_db::suggest::<E>(conn, &term, limit))
            .await
    }

    async fn all(&self) -> Result<Vec<E>, StorageError> {
        self.with_connection(witchy_db::list_all::<E>).await
    }
}

// ── Seed data ───────────────────────────────────────────────────────────────

/// Linear scan over the in-process seed datasets. Cannot fail.
#[derive(Debug, Clone)]
pub struct SeedSource {
    seed: Arc<SeedData>,
}

impl SeedSource {
    pub fn new(seed: Arc<SeedData>) -> Self {
        Self { seed }
    }
}

impl<E: Seeded> RecordSource<E> for SeedSource {
    type Error = Infallible;

    async fn find_by_name(&self, term: &str) -> Result<Option<E>, Infallible> {
        Ok(matching::find_by_name(self.seed.records::<E>(), term).cloned())
    }

    async fn find_by_content(&self, term: &str) -> Result<Vec<E>, Infallible> {
        Ok(matching::find_by_content(self.seed.records::<E>(), term)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn suggest(&self, term: &str, limit: usize) -> Result<Vec<E>, Infallible> {
        Ok(matching::suggest(self.seed.records::<E>(), term, limit)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn all(&self) -> Result<Vec<E>, Infallible> {
        Ok(self.seed.records::<E>().to_vec())
    }
}

// ── Repository ──────────────────────────────────────────────────────────────

/// Lookups for one entity kind.
#[derive(Debug, Clone)]
pub struct Repository<E> {
    store: Option<SqliteSource>,
    fallback: SeedSource,
    _kind: PhantomData<fn() -> E>,
}

impl<E: TableRecord> Repository<E> {
    /// `store` is `None` when the database could not be prepared; every call
    /// then goes straight to the seed data.
    pub fn new(store: Option<SqliteSource>, seed: Arc<SeedData>) -> Self {
        Self {
            store,
            fallback: SeedSource::new(seed),
            _kind: PhantomData,
        }
    }

    /// Repository answering from the seed data only.
    pub fn in_memory(seed: Arc<SeedData>) -> Self {
        Self::new(None, seed)
    }

    pub fn uses_store(&self) -> bool {
        self.store.is_some()
    }

    /// First record whose name or alias matches `term`, case-insensitively.
    pub async fn find_by_name(&self, term: &str) -> Option<E> {
        if let Some(store) = &self.store {
            let result = RecordSource::<E>::find_by_name(store, term).await;
            if let Some(found) = settle::<E, _>("find_by_name", result) {
                return found;
            }
        }
        let Ok(found) = RecordSource::<E>::find_by_name(&self.fallback, term).await;
        found
    }

    /// Records whose descriptive field contains `term`.
    pub async fn find_by_content(&self, term: &str) -> Vec<E> {
        if let Some(store) = &self.store {
            let result = RecordSource::<E>::find_by_content(store, term).await;
            if let Some(found) = settle::<E, _>("find_by_content", result) {
                return found;
            }
        }
        let Ok(found) = RecordSource::<E>::find_by_content(&self.fallback, term).await;
        found
    }

    /// Up to `limit` records whose name or alias contains `term`.
    pub async fn suggest(&self, term: &str, limit: usize) -> Vec<E> {
        if let Some(store) = &self.store {
            let result = RecordSource::<E>::suggest(store, term, limit).await;
            if let Some(found) = settle::<E, _>("suggest", result) {
                return found;
            }
        }
        let Ok(found) = RecordSource::<E>::suggest(&self.fallback, term, limit).await;
        found
    }

    pub async fn all(&self) -> Vec<E> {
        if let Some(store) = &self.store {
            let result = RecordSource::<E>::all(store).await;
            if let Some(found) = settle::<E, _>("all", result) {
                return found;
            }
        }
        let Ok(found) = RecordSource::<E>::all(&self.fallback).await;
        found
    }
}

/// Keep a store result, or log the failure and signal a fallback.
fn settle<E: TableRecord, T>(op: &str, result: Result<T, StorageError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!(
                "{} {} failed, using built-in data: {}",
                E::KIND.plural(),
                op,
                e
            );
            None
        }
    }
}

#[cfg(test)]
#[path = "tests/repository_tests.rs"]
mod tests;
