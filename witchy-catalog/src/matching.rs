//! Linear-scan matching over in-memory records.
//!
//! These functions define the reference semantics for lookups: the SQLite
//! queries in `witchy-db` return the same match sets.

use crate::types::{Entity, EntityKind, MOON_SHORTHANDS};

/// Normalize a user-supplied search term: trim surrounding whitespace and
/// lowercase.
pub fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

/// True when the record's name or any alias equals the normalized term.
pub fn name_matches<E: Entity>(record: &E, normalized: &str) -> bool {
    record.name().to_lowercase() == normalized
        || record
            .aliases()
            .iter()
            .any(|alias| alias.to_lowercase() == normalized)
}

/// True when the normalized term is a moon shorthand keyword like "full".
pub fn is_moon_shorthand(kind: EntityKind, normalized: &str) -> bool {
    kind == EntityKind::Moon && MOON_SHORTHANDS.contains(&normalized)
}

/// Find the first record whose name or alias matches `term`.
///
/// Moon phases additionally resolve shorthand keywords ("new", "full", ...)
/// to the first phase containing the keyword when nothing matches exactly.
pub fn find_by_name<'a, E: Entity>(records: &'a [E], term: &str) -> Option<&'a E> {
    let normalized = normalize(term);
    if normalized.is_empty() {
        return None;
    }
    records
        .iter()
        .find(|r| name_matches(*r, &normalized))
        .or_else(|| {
            if is_moon_shorthand(E::KIND, &normalized) {
                records
                    .iter()
                    .find(|r| r.name().to_lowercase().contains(&normalized))
            } else {
                None
            }
        })
}

/// All records whose descriptive field contains `term` (case-insensitive),
/// in dataset order.
pub fn find_by_content<'a, E: Entity>(records: &'a [E], term: &str) -> Vec<&'a E> {
    let normalized = normalize(term);
    if normalized.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| r.description().to_lowercase().contains(&normalized))
        .collect()
}

/// Up to `limit` records whose name or alias contains `term`, ordered by
/// name. Used for "did you mean" hints.
pub fn suggest<'a, E: Entity>(records: &'a [E], term: &str, limit: usize) -> Vec<&'a E> {
    let normalized = normalize(term);
    if normalized.is_empty() {
        return Vec::new();
    }
    let mut hits: Vec<&E> = records
        .iter()
        .filter(|r| {
            r.name().to_lowercase().contains(&normalized)
                || r
                    .aliases()
                    .iter()
                    .any(|a| a.to_lowercase().contains(&normalized))
        })
        .collect();
    hits.sort_by(|a, b| a.name().cmp(b.name()));
    hits.truncate(limit);
    hits
}
