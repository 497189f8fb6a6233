//! Data model types for the correspondence catalog.
//!
//! Six entity kinds, each a flat record with a primary name and one
//! descriptive text field. Herbs and crystals also carry alternative names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── Entity Kind ─────────────────────────────────────────────────────────────

/// The six kinds of correspondence served by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Herb,
    Crystal,
    Color,
    Moon,
    Metal,
    Day,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        Self::Herb,
        Self::Crystal,
        Self::Color,
        Self::Moon,
        Self::Metal,
        Self::Day,
    ];

    /// Tag used for this kind in the full-text index and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Herb => "herb",
            Self::Crystal => "crystal",
            Self::Color => "color",
            Self::Moon => "moon",
            Self::Metal => "metal",
            Self::Day => "day",
        }
    }

    /// Human-readable plural label ("moon phases", "days").
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Herb => "herbs",
            Self::Crystal => "crystals",
            Self::Color => "colors",
            Self::Moon => "moon phases",
            Self::Metal => "metals",
            Self::Day => "days",
        }
    }

    /// Name of the descriptive field, used in search summaries.
    pub fn description_label(&self) -> &'static str {
        match self {
            Self::Herb => "ritual uses",
            Self::Crystal | Self::Metal => "properties",
            Self::Color | Self::Moon => "meanings",
            Self::Day => "intents",
        }
    }

    /// File name of the seed dataset for this kind.
    pub fn seed_file(&self) -> &'static str {
        match self {
            Self::Herb => "herbs.json",
            Self::Crystal => "crystals.json",
            Self::Color => "colors.json",
            Self::Moon => "moon.json",
            Self::Metal => "metals.json",
            Self::Day => "days.json",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown lookup type '{}' (expected herb, crystal, color, moon, metal or day)",
            self.0
        )
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for EntityKind {
    type Err = UnknownKind;

    /// Accepts singular and plural spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "herb" | "herbs" => Ok(Self::Herb),
            "crystal" | "crystals" => Ok(Self::Crystal),
            "color" | "colors" | "colour" | "colours" => Ok(Self::Color),
            "moon" | "moons" | "phase" | "phases" => Ok(Self::Moon),
            "metal" | "metals" => Ok(Self::Metal),
            "day" | "days" => Ok(Self::Day),
            _ => Err(UnknownKind(s.to_string())),
        }
    }
}

// ── Entity Trait ────────────────────────────────────────────────────────────

/// Common shape of every catalog record.
///
/// Both the SQLite store and the in-memory seed data produce values of these
/// types, so callers never see which source answered.
pub trait Entity: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    /// Primary textual key.
    fn name(&self) -> &str;

    /// Free-text descriptive field searched by content queries.
    fn description(&self) -> &str;

    /// Alternative names, in seed order.
    fn aliases(&self) -> &[String] {
        &[]
    }
}

// ── Herb ────────────────────────────────────────────────────────────────────

/// A magical plant and its ritual uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Herb {
    pub name: String,
    pub ritual_use: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub also_called: Vec<String>,
}

impl Entity for Herb {
    const KIND: EntityKind = EntityKind::Herb;

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.ritual_use
    }

    fn aliases(&self) -> &[String] {
        &self.also_called
    }
}

// ── Crystal ─────────────────────────────────────────────────────────────────

/// A gemstone and its properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crystal {
    pub name: String,
    pub properties: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub also_called: Vec<String>,
}

impl Entity for Crystal {
    const KIND: EntityKind = EntityKind::Crystal;

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.properties
    }

    fn aliases(&self) -> &[String] {
        &self.also_called
    }
}

// ── Color ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub name: String,
    pub meanings: String,
}

impl Entity for Color {
    const KIND: EntityKind = EntityKind::Color;

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.meanings
    }
}

// ── Moon Phase ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoonPhase {
    pub phase: String,
    pub meaning: String,
}

/// Shorthand words that resolve to the first phase containing them.
pub const MOON_SHORTHANDS: [&str; 5] = ["new", "full", "waxing", "waning", "dark"];

impl Entity for MoonPhase {
    const KIND: EntityKind = EntityKind::Moon;

    fn name(&self) -> &str {
        &self.phase
    }

    fn description(&self) -> &str {
        &self.meaning
    }
}

// ── Metal ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metal {
    pub name: String,
    pub properties: String,
}

impl Entity for Metal {
    const KIND: EntityKind = EntityKind::Metal;

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.properties
    }
}

// ── Day ─────────────────────────────────────────────────────────────────────

/// A weekday and the workings it favours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub name: String,
    pub intent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet: Option<String>,
    /// Comma-separated color list, kept as shipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deities: Option<String>,
}

impl Entity for Day {
    const KIND: EntityKind = EntityKind::Day;

    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.intent
    }
}
