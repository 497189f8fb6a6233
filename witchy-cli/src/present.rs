//! How each entity kind is printed.

use witchy_catalog::{Color, Crystal, Day, Herb, Metal, MoonPhase};
use witchy_lib::witchy_db::TableRecord;

use crate::highlight::{color_name, highlight, moon_emoji};

pub(crate) trait Present: TableRecord {
    /// Label shown in "Herb "x" not found."
    const LABEL: &'static str;
    /// Heading above the descriptive field in a name lookup.
    const SECTION: &'static str;
    /// Icon in front of the descriptive field in search results.
    const BULLET: &'static str;
    /// Words that are worth suggesting after an empty search.
    const HINTS: &'static [&'static str];

    /// Emoji and name.
    fn heading(&self) -> String;

    /// Indented lines shown under the heading (aliases, planet, ...).
    fn details(&self) -> Vec<String> {
        match self.aliases() {
            [] => Vec::new(),
            aliases => vec![format!("   Also called: {}", aliases.join(", "))],
        }
    }
}

/// Print one record for a name lookup.
pub(crate) fn show_record<E: Present>(record: &E) {
    crate::log_blank();
    log::info!("{}", record.heading());
    for line in record.details() {
        log::info!("{}", line);
    }
    crate::log_blank();
    log::info!("{}:", E::SECTION);
    log::info!("   {}", record.description());
    crate::log_blank();
}

/// Print one record from a content search, highlighting `term`.
pub(crate) fn show_match<E: Present>(record: &E, term: &str) {
    log::info!("{}", record.heading());
    for line in record.details() {
        log::info!("{}", line);
    }
    log::info!("   {} {}", E::BULLET, highlight(record.description(), term));
    crate::log_blank();
}

impl Present for Herb {
    const LABEL: &'static str = "Herb";
    const SECTION: &'static str = "\u{1F4DC} Ritual Use";
    const BULLET: &'static str = "\u{1F4DC}";
    const HINTS: &'static [&'static str] = &[
        "protection",
        "love",
        "healing",
        "prosperity",
        "purification",
        "banishing",
        "divination",
    ];

    fn heading(&self) -> String {
        format!("\u{1F33F} {}", self.name)
    }
}

impl Present for Crystal {
    const LABEL: &'static str = "Crystal";
    const SECTION: &'static str = "\u{2728} Properties";
    const BULLET: &'static str = "\u{2728}";
    const HINTS: &'static [&'static str] = &[
        "healing",
        "protection",
        "love",
        "abundance",
        "clarity",
        "grounding",
        "energy",
    ];

    fn heading(&self) -> String {
        format!("\u{1F48E} {}", self.name)
    }
}

impl Present for Color {
    const LABEL: &'static str = "Color";
    const SECTION: &'static str = "\u{1F31F} Meanings";
    const BULLET: &'static str = "\u{1F31F}";
    const HINTS: &'static [&'static str] = &[
        "love",
        "protection",
        "healing",
        "prosperity",
        "spirituality",
        "passion",
        "peace",
    ];

    fn heading(&self) -> String {
        format!("\u{1F3A8} {}", color_name(&self.name))
    }
}

impl Present for MoonPhase {
    const LABEL: &'static str = "Moon phase";
    const SECTION: &'static str = "\u{1F31F} Meaning";
    const BULLET: &'static str = "\u{1F31F}";
    const HINTS: &'static [&'static str] = &[
        "manifestation",
        "banishing",
        "cleansing",
        "divination",
        "healing",
        "protection",
        "growth",
    ];

    fn heading(&self) -> String {
        format!("{} {}", moon_emoji(&self.phase), self.phase)
    }
}

impl Present for Metal {
    const LABEL: &'static str = "Metal";
    const SECTION: &'static str = "\u{2728} Properties";
    const BULLET: &'static str = "\u{2728}";
    const HINTS: &'static [&'static str] = &[
        "protection",
        "prosperity",
        "healing",
        "strength",
        "abundance",
        "energy",
        "wisdom",
    ];

    fn heading(&self) -> String {
        format!("\u{1FAA8} {}", self.name)
    }
}

impl Present for Day {
    const LABEL: &'static str = "Day";
    const SECTION: &'static str = "\u{1F52E} Magical Intent";
    const BULLET: &'static str = "\u{1F52E}";
    const HINTS: &'static [&'static str] = &[
        "love",
        "prosperity",
        "protection",
        "healing",
        "wisdom",
        "success",
        "banishing",
    ];

    fn heading(&self) -> String {
        format!("\u{1F4C5} {}", self.name)
    }

    fn details(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(planet) = &self.planet {
            lines.push(format!("   \u{1FA90} Planet: {}", planet));
        }
        if let Some(colors) = &self.colors {
            lines.push(format!("   \u{1F3A8} Colors: {}", colors));
        }
        if let Some(deities) = &self.deities {
            lines.push(format!("   \u{2728} Deities: {}", deities));
        }
        lines
    }
}
