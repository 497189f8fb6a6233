//! Row mapping between catalog records and their SQLite tables.

use rusqlite::types::Type;
use rusqlite::{params, Row, Statement};
use witchy_catalog::{Color, Crystal, Day, Entity, EntityKind, Herb, Metal, MoonPhase, Seeded};

use crate::operations::SeedError;

/// Table name for an entity kind.
pub fn table_name(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Herb => "herbs",
        EntityKind::Crystal => "crystals",
        EntityKind::Color => "colors",
        EntityKind::Moon => "moon_phases",
        EntityKind::Metal => "metals",
        EntityKind::Day => "days",
    }
}

/// A catalog record with a backing table.
///
/// Column names are compile-time constants, so the generic queries in
/// [`crate::queries`] can splice them into SQL safely.
pub trait TableRecord: Entity + Seeded {
    const NAME_COLUMN: &'static str;
    const DESCRIPTION_COLUMN: &'static str;
    /// Column holding a JSON array of alternative names, if the kind has one.
    const ALIAS_COLUMN: Option<&'static str> = None;
    /// Columns read by [`TableRecord::from_row`], in order.
    const SELECT_COLUMNS: &'static str;
    const INSERT_SQL: &'static str;

    fn table() -> &'static str {
        table_name(Self::KIND)
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Bind this record to a prepared [`TableRecord::INSERT_SQL`] statement
    /// and execute it.
    fn insert(&self, stmt: &mut Statement<'_>) -> Result<(), SeedError>;
}

/// Serialize an alias list for the `also_called` column. Empty lists are
/// stored as NULL.
fn aliases_to_column(aliases: &[String]) -> Result<Option<String>, SeedError> {
    if aliases.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::to_string(aliases)?))
}

fn aliases_from_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<String>> {
    let raw: Option<String> = row.get(idx)?;
    match raw {
        None => Ok(Vec::new()),
        Some(json) => serde_json::from_str(&json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
    }
}

impl TableRecord for Herb {
    const NAME_COLUMN: &'static str = "name";
    const DESCRIPTION_COLUMN: &'static str = "ritual_use";
    const ALIAS_COLUMN: Option<&'static str> = Some("also_called");
    const SELECT_COLUMNS: &'static str = "name, ritual_use, also_called";
    const INSERT_SQL: &'static str =
        "INSERT INTO herbs (name, ritual_use, also_called) VALUES (?1, ?2, ?3)";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Herb {
            name: row.get(0)?,
            ritual_use: row.get(1)?,
            also_called: aliases_from_column(row, 2)?,
        })
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> Result<(), SeedError> {
        let aliases = aliases_to_column(&self.also_called)?;
        stmt.execute(params![self.name, self.ritual_use, aliases])?;
        Ok(())
    }
}

impl TableRecord for Crystal {
    const NAME_COLUMN: &'static str = "name";
    const DESCRIPTION_COLUMN: &'static str = "properties";
    const ALIAS_COLUMN: Option<&'static str> = Some("also_called");
    const SELECT_COLUMNS: &'static str = "name, properties, also_called";
    const INSERT_SQL: &'static str =
        "INSERT INTO crystals (name, properties, also_called) VALUES (?1, ?2, ?3)";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Crystal {
            name: row.get(0)?,
            properties: row.get(1)?,
            also_called: aliases_from_column(row, 2)?,
        })
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> Result<(), SeedError> {
        let aliases = aliases_to_column(&self.also_called)?;
        stmt.execute(params![self.name, self.properties, aliases])?;
        Ok(())
    }
}

impl TableRecord for Color {
    const NAME_COLUMN: &'static str = "name";
    const DESCRIPTION_COLUMN: &'static str = "meanings";
    const SELECT_COLUMNS: &'static str = "name, meanings";
    const INSERT_SQL: &'static str = "INSERT INTO colors (name, meanings) VALUES (?1, ?2)";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Color {
            name: row.get(0)?,
            meanings: row.get(1)?,
        })
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> Result<(), SeedError> {
        stmt.execute(params![self.name, self.meanings])?;
        Ok(())
    }
}

impl TableRecord for MoonPhase {
    const NAME_COLUMN: &'static str = "phase";
    const DESCRIPTION_COLUMN: &'static str = "meaning";
    const SELECT_COLUMNS: &'static str = "phase, meaning";
    const INSERT_SQL: &'static str = "INSERT INTO moon_phases (phase, meaning) VALUES (?1, ?2)";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(MoonPhase {
            phase: row.get(0)?,
            meaning: row.get(1)?,
        })
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> Result<(), SeedError> {
        stmt.execute(params![self.phase, self.meaning])?;
        Ok(())
    }
}

impl TableRecord for Metal {
    const NAME_COLUMN: &'static str = "name";
    const DESCRIPTION_COLUMN: &'static str = "properties";
    const SELECT_COLUMNS: &'static str = "name, properties";
    const INSERT_SQL: &'static str = "INSERT INTO metals (name, properties) VALUES (?1, ?2)";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Metal {
            name: row.get(0)?,
            properties: row.get(1)?,
        })
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> Result<(), SeedError> {
        stmt.execute(params![self.name, self.properties])?;
        Ok(())
    }
}

impl TableRecord for Day {
    const NAME_COLUMN: &'static str = "name";
    const DESCRIPTION_COLUMN: &'static str = "intent";
    const SELECT_COLUMNS: &'static str = "name, intent, planet, colors, deities";
    const INSERT_SQL: &'static str =
        "INSERT INTO days (name, intent, planet, colors, deities) VALUES (?1, ?2, ?3, ?4, ?5)";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Day {
            name: row.get(0)?,
            intent: row.get(1)?,
            planet: row.get(2)?,
            colors: row.get(3)?,
            deities: row.get(4)?,
        })
    }

    fn insert(&self, stmt: &mut Statement<'_>) -> Result<(), SeedError> {
        stmt.execute(params![
            self.name,
            self.intent,
            self.planet,
            self.colors,
            self.deities,
        ])?;
        Ok(())
    }
}
