//! Seed dataset loading.
//!
//! The six JSON datasets are compiled into the binary, so every deployment
//! mode (source checkout, installed, packaged) carries its own copy. A
//! directory of the same six files can be loaded instead for development.

use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::types::{Color, Crystal, Day, Entity, EntityKind, Herb, Metal, MoonPhase};

#[derive(Debug, Error)]
pub enum SeedParseError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("JSON parse error in {file}: {source}")]
    Parse {
        file: String,
        source: serde_json::Error,
    },
    #[error("{file}: record {index} ('{name}') has an empty {field}")]
    EmptyField {
        file: String,
        index: usize,
        name: String,
        field: &'static str,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

const HERBS_JSON: &str = include_str!("../data/herbs.json");
const CRYSTALS_JSON: &str = include_str!("../data/crystals.json");
const COLORS_JSON: &str = include_str!("../data/colors.json");
const MOON_JSON: &str = include_str!("../data/moon.json");
const METALS_JSON: &str = include_str!("../data/metals.json");
const DAYS_JSON: &str = include_str!("../data/days.json");

/// All six datasets, the single source of truth for table cardinality.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub herbs: Vec<Herb>,
    pub crystals: Vec<Crystal>,
    pub colors: Vec<Color>,
    pub moon: Vec<MoonPhase>,
    pub metals: Vec<Metal>,
    pub days: Vec<Day>,
}

impl SeedData {
    /// Parse the datasets compiled into the binary.
    pub fn bundled() -> Result<Self, SeedParseError> {
        Ok(Self {
            herbs: parse_dataset(EntityKind::Herb.seed_file(), HERBS_JSON)?,
            crystals: parse_dataset(EntityKind::Crystal.seed_file(), CRYSTALS_JSON)?,
            colors: parse_dataset(EntityKind::Color.seed_file(), COLORS_JSON)?,
            moon: parse_dataset(EntityKind::Moon.seed_file(), MOON_JSON)?,
            metals: parse_dataset(EntityKind::Metal.seed_file(), METALS_JSON)?,
            days: parse_dataset(EntityKind::Day.seed_file(), DAYS_JSON)?,
        })
    }

    /// Load the six datasets from a directory.
    ///
    /// Expected structure:
    /// ```text
    /// dir/
    ///   herbs.json
    ///   crystals.json
    ///   colors.json
    ///   moon.json
    ///   metals.json
    ///   days.json
    /// ```
    pub fn load_dir(dir: &Path) -> Result<Self, SeedParseError> {
        if !dir.is_dir() {
            return Err(SeedParseError::DirNotFound(dir.display().to_string()));
        }
        Ok(Self {
            herbs: load_dataset(dir, EntityKind::Herb)?,
            crystals: load_dataset(dir, EntityKind::Crystal)?,
            colors: load_dataset(dir, EntityKind::Color)?,
            moon: load_dataset(dir, EntityKind::Moon)?,
            metals: load_dataset(dir, EntityKind::Metal)?,
            days: load_dataset(dir, EntityKind::Day)?,
        })
    }

    /// Number of records expected in the table for `kind`.
    pub fn len_of(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Herb => self.herbs.len(),
            EntityKind::Crystal => self.crystals.len(),
            EntityKind::Color => self.colors.len(),
            EntityKind::Moon => self.moon.len(),
            EntityKind::Metal => self.metals.len(),
            EntityKind::Day => self.days.len(),
        }
    }

    /// Total record count across all six datasets.
    pub fn total(&self) -> usize {
        EntityKind::ALL.iter().map(|k| self.len_of(*k)).sum()
    }

    /// Typed access to one dataset.
    pub fn records<E: Seeded>(&self) -> &[E] {
        E::records(self)
    }
}

/// Entity types that have a dataset in [`SeedData`].
pub trait Seeded: Entity {
    fn records(seed: &SeedData) -> &[Self];
}

impl Seeded for Herb {
    fn records(seed: &SeedData) -> &[Self] {
        &seed.herbs
    }
}

impl Seeded for Crystal {
    fn records(seed: &SeedData) -> &[Self] {
        &seed.crystals
    }
}

impl Seeded for Color {
    fn records(seed: &SeedData) -> &[Self] {
        &seed.colors
    }
}

impl Seeded for MoonPhase {
    fn records(seed: &SeedData) -> &[Self] {
        &seed.moon
    }
}

impl Seeded for Metal {
    fn records(seed: &SeedData) -> &[Self] {
        &seed.metals
    }
}

impl Seeded for Day {
    fn records(seed: &SeedData) -> &[Self] {
        &seed.days
    }
}

fn load_dataset<E>(dir: &Path, kind: EntityKind) -> Result<Vec<E>, SeedParseError>
where
    E: Entity + DeserializeOwned,
{
    let path = dir.join(kind.seed_file());
    let contents = std::fs::read_to_string(&path).map_err(|e| SeedParseError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_dataset(kind.seed_file(), &contents)
}

/// Parse one dataset and check that every record carries text to search.
pub fn parse_dataset<E>(file: &str, contents: &str) -> Result<Vec<E>, SeedParseError>
where
    E: Entity + DeserializeOwned,
{
    let records: Vec<E> = serde_json::from_str(contents).map_err(|e| SeedParseError::Parse {
        file: file.to_string(),
        source: e,
    })?;

    for (index, record) in records.iter().enumerate() {
        if record.name().trim().is_empty() {
            return Err(SeedParseError::EmptyField {
                file: file.to_string(),
                index,
                name: String::new(),
                field: "name",
            });
        }
        if record.description().trim().is_empty() {
            return Err(SeedParseError::EmptyField {
                file: file.to_string(),
                index,
                name: record.name().to_string(),
                field: "description",
            });
        }
    }

    Ok(records)
}
