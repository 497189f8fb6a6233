//! Correspondence catalog data model, seed datasets, and in-memory matching.
//!
//! This crate defines the record types without any database dependencies.
//! `witchy-db` persists them; `witchy-lib` falls back to the linear scans in
//! [`matching`] when the database cannot be reached.

pub mod matching;
pub mod seed;
pub mod types;

pub use seed::{SeedData, SeedParseError, Seeded};
pub use types::*;
