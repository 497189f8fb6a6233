//! Terminal styling: search-term highlighting, color swatches, moon emoji.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Byte ranges of every case-insensitive, non-overlapping occurrence of
/// `term` in `text`.
pub(crate) fn find_matches(text: &str, term: &str) -> Vec<(usize, usize)> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    while start < text.len() {
        match match_at(text, start, &needle) {
            Some(end) => {
                ranges.push((start, end));
                start = end;
            }
            None => {
                start += text[start..].chars().next().map_or(1, char::len_utf8);
            }
        }
    }
    ranges
}

/// End offset if the lowercased text at `start` begins with `needle`.
fn match_at(text: &str, start: usize, needle: &str) -> Option<usize> {
    let mut lowered = String::new();
    for (offset, ch) in text[start..].char_indices() {
        lowered.extend(ch.to_lowercase());
        if lowered.len() >= needle.len() {
            return (lowered == needle).then_some(start + offset + ch.len_utf8());
        }
        if !needle.starts_with(lowered.as_str()) {
            return None;
        }
    }
    None
}

/// `text` with every occurrence of `term` shown black-on-yellow.
pub(crate) fn highlight(text: &str, term: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for (start, end) in find_matches(text, term) {
        out.push_str(&text[last..start]);
        let hit = &text[start..end];
        out.push_str(
            &hit.if_supports_color(Stdout, |t| t.black().on_yellow().bold().to_string())
                .to_string(),
        );
        last = end;
    }
    out.push_str(&text[last..]);
    out
}

/// RGB swatch for a color name, if it is one we know.
pub(crate) fn color_rgb(name: &str) -> Option<(u8, u8, u8)> {
    let rgb = match name.trim().to_lowercase().as_str() {
        "amber" => (255, 191, 0),
        "black" | "gray" | "grey" => (128, 128, 128),
        "blue" => (65, 105, 225),
        "brown" => (150, 90, 40),
        "copper" => (184, 115, 51),
        "gold" => (255, 215, 0),
        "green" => (34, 180, 34),
        "indigo" => (111, 60, 200),
        "lavender" => (190, 150, 230),
        "light blue" => (135, 206, 250),
        "orange" => (255, 140, 0),
        "peach" => (255, 190, 150),
        "pink" => (255, 105, 180),
        "purple" => (170, 60, 220),
        "red" => (220, 30, 50),
        "silver" => (200, 200, 200),
        "turquoise" => (64, 224, 208),
        "violet" => (150, 70, 255),
        "white" => (255, 255, 255),
        "yellow" => (255, 230, 0),
        _ => return None,
    };
    Some(rgb)
}

/// A color name rendered bold in its own color.
pub(crate) fn color_name(name: &str) -> String {
    match color_rgb(name) {
        Some((r, g, b)) => name
            .if_supports_color(Stdout, |t| t.truecolor(r, g, b).bold().to_string())
            .to_string(),
        None => name.if_supports_color(Stdout, |t| t.bold()).to_string(),
    }
}

/// Emoji for a moon phase name.
pub(crate) fn moon_emoji(phase: &str) -> &'static str {
    let phase = phase.to_lowercase();
    if phase.contains("new") {
        "\u{1F311}"
    } else if phase.contains("waxing") {
        "\u{1F312}"
    } else if phase.contains("full") {
        "\u{1F315}"
    } else if phase.contains("waning") {
        "\u{1F318}"
    } else if phase.contains("dark") {
        "\u{1F31A}"
    } else {
        "\u{1F319}"
    }
}
