//! Read queries for the correspondence database.
//!
//! Every query is generic over [`TableRecord`], so the six entity kinds share
//! one implementation. Matching follows `witchy_catalog::matching`: names are
//! compared trimmed and lowercased, content is a lowercase substring test.

use rusqlite::{params, Connection};
use witchy_catalog::matching::{is_moon_shorthand, normalize};

use crate::table::TableRecord;

/// Find the first record (by row id) whose name or alias equals `term`.
pub fn find_by_name<T: TableRecord>(
    conn: &Connection,
    term: &str,
) -> Result<Option<T>, rusqlite::Error> {
    let normalized = normalize(term);
    if normalized.is_empty() {
        return Ok(None);
    }

    let alias_clause = match T::ALIAS_COLUMN {
        Some(col) => format!(
            " OR EXISTS (SELECT 1 FROM json_each({col}) WHERE LOWER(json_each.value) = ?1)"
        ),
        None => String::new(),
    };
    let sql = format!(
        "SELECT {cols} FROM {table}
         WHERE LOWER({name}) = ?1{alias_clause}
         ORDER BY id LIMIT 1",
        cols = T::SELECT_COLUMNS,
        table = T::table(),
        name = T::NAME_COLUMN,
    );
    if let Some(found) = query_first::<T>(conn, &sql, &normalized)? {
        return Ok(Some(found));
    }

    if is_moon_shorthand(T::KIND, &normalized) {
        let sql = format!(
            "SELECT {cols} FROM {table}
             WHERE instr(LOWER({name}), ?1) > 0
             ORDER BY id LIMIT 1",
            cols = T::SELECT_COLUMNS,
            table = T::table(),
            name = T::NAME_COLUMN,
        );
        return query_first::<T>(conn, &sql, &normalized);
    }

    Ok(None)
}

/// All records whose descriptive field contains `term`, case-insensitively.
///
/// Results are ordered by full-text rank when the index can answer the
/// query; otherwise the same rows are returned in row order.
pub fn find_by_content<T: TableRecord>(
    conn: &Connection,
    term: &str,
) -> Result<Vec<T>, rusqlite::Error> {
    let normalized = normalize(term);
    if normalized.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(fts_query) = fts_query("content", &normalized) {
        match find_by_content_ranked::<T>(conn, &normalized, &fts_query) {
            Ok(rows) => return Ok(rows),
            Err(e) => log::debug!(
                "Full-text ranking unavailable for {}: {}",
                T::KIND.plural(),
                e
            ),
        }
    }

    let sql = format!(
        "SELECT {cols} FROM {table}
         WHERE instr(LOWER({desc}), ?1) > 0
         ORDER BY id",
        cols = T::SELECT_COLUMNS,
        table = T::table(),
        desc = T::DESCRIPTION_COLUMN,
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![normalized], T::from_row)?;
    rows.collect()
}

fn find_by_content_ranked<T: TableRecord>(
    conn: &Connection,
    normalized: &str,
    fts_query: &str,
) -> Result<Vec<T>, rusqlite::Error> {
    let sql = format!(
        "SELECT {cols} FROM {table} t
         LEFT JOIN (
             SELECT entity_id, MIN(rank) AS score FROM witchy_fts
             WHERE witchy_fts MATCH ?2 AND content_type = ?3
             GROUP BY entity_id
         ) f ON f.entity_id = t.id
         WHERE instr(LOWER(t.{desc}), ?1) > 0
         ORDER BY f.score IS NULL, f.score, t.id",
        cols = T::SELECT_COLUMNS,
        table = T::table(),
        desc = T::DESCRIPTION_COLUMN,
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![normalized, fts_query, T::KIND.as_str()],
        T::from_row,
    )?;
    rows.collect()
}

/// Up to `limit` records whose name or alias contains `term`, ordered by
/// name.
pub fn suggest<T: TableRecord>(
    conn: &Connection,
    term: &str,
    limit: usize,
) -> Result<Vec<T>, rusqlite::Error> {
    let normalized = normalize(term);
    if normalized.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }

    let alias_clause = match T::ALIAS_COLUMN {
        Some(col) => format!(
            " OR EXISTS (SELECT 1 FROM json_each({col}) WHERE instr(LOWER(json_each.value), ?1) > 0)"
        ),
        None => String::new(),
    };
    let sql = format!(
        "SELECT {cols} FROM {table}
         WHERE instr(LOWER({name}), ?1) > 0{alias_clause}
         ORDER BY {name}, id LIMIT ?2",
        cols = T::SELECT_COLUMNS,
        table = T::table(),
        name = T::NAME_COLUMN,
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![normalized, limit as i64], T::from_row)?;
    rows.collect()
}

/// Every record of one kind, in row order.
pub fn list_all<T: TableRecord>(conn: &Connection) -> Result<Vec<T>, rusqlite::Error> {
    let sql = format!(
        "SELECT {cols} FROM {table} ORDER BY id",
        cols = T::SELECT_COLUMNS,
        table = T::table(),
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], T::from_row)?;
    rows.collect()
}

fn query_first<T: TableRecord>(
    conn: &Connection,
    sql: &str,
    normalized: &str,
) -> Result<Option<T>, rusqlite::Error> {
    let mut stmt = conn.prepare(sql)?;
    let result = stmt.query_row(params![normalized], T::from_row);
    match result {
        Ok(r) => Ok(Some(r)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Build an FTS5 query restricted to `column` that prefix-matches every
/// word of the term. Returns `None` when the term has no indexable words.
fn fts_query(column: &str, normalized: &str) -> Option<String> {
    let tokens: Vec<String> = normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{t}\"*"))
        .collect();
    if tokens.is_empty() {
        return None;
    }
    Some(format!("{column} : ({})", tokens.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fts_query_quotes_each_word() {
        assert_eq!(
            fts_query("content", "love & healing").as_deref(),
            Some("content : (\"love\"* \"healing\"*)")
        );
    }

    #[test]
    fn fts_query_skips_punctuation_only_terms() {
        assert_eq!(fts_query("content", "?!"), None);
    }
}
