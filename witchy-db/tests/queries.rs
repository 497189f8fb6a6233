use rusqlite::Connection;
use witchy_catalog::{matching, Color, Crystal, Day, Entity, Herb, Metal, MoonPhase, SeedData};
use witchy_db::*;

fn seeded() -> (Connection, SeedData) {
    let mut conn = open_memory().unwrap();
    let seed = SeedData::bundled().unwrap();
    seed_all(&mut conn, &seed).unwrap();
    (conn, seed)
}

fn names<E: Entity>(records: &[E]) -> Vec<String> {
    let mut names: Vec<String> = records.iter().map(|r| r.name().to_string()).collect();
    names.sort();
    names
}

#[test]
fn name_lookup_ignores_case_and_whitespace() {
    let (conn, _) = seeded();
    for term in ["rosemary", "ROSEMARY", "  Rosemary  "] {
        let herb: Herb = find_by_name(&conn, term).unwrap().unwrap();
        assert_eq!(herb.name, "Rosemary");
    }
}

#[test]
fn name_lookup_resolves_aliases() {
    let (conn, _) = seeded();
    let herb: Herb = find_by_name(&conn, "elf leaf").unwrap().unwrap();
    assert_eq!(herb.name, "Rosemary");
    assert!(herb.also_called.contains(&"Dew of the Sea".to_string()));
}

#[test]
fn name_lookup_misses_return_none() {
    let (conn, _) = seeded();
    assert!(find_by_name::<Herb>(&conn, "unobtainium").unwrap().is_none());
    assert!(find_by_name::<Metal>(&conn, "").unwrap().is_none());
}

#[test]
fn moon_shorthand_matches_phase() {
    let (conn, _) = seeded();
    let phase: MoonPhase = find_by_name(&conn, "full").unwrap().unwrap();
    assert_eq!(phase.phase, "Full Moon");
    let exact: MoonPhase = find_by_name(&conn, "new moon").unwrap().unwrap();
    assert_eq!(exact.phase, "New Moon");
}

fn assert_aliases_resolve<T: TableRecord + std::fmt::Debug + PartialEq>(
    conn: &Connection,
    records: &[T],
) {
    let mut checked = 0;
    for record in records {
        let primary: T = find_by_name(conn, record.name()).unwrap().unwrap();
        for alias in record.aliases() {
            let by_alias: T = find_by_name(conn, alias).unwrap().unwrap();
            assert_eq!(by_alias, primary, "alias {alias:?} of {}", record.name());
            checked += 1;
        }
    }
    assert!(checked > 0, "no {} aliases in the dataset", T::KIND.plural());
}

#[test]
fn every_alias_resolves_to_its_record() {
    let (conn, seed) = seeded();
    assert_aliases_resolve::<Herb>(&conn, &seed.herbs);
    assert_aliases_resolve::<Crystal>(&conn, &seed.crystals);
}

fn assert_names_agree<T: TableRecord + std::fmt::Debug + PartialEq>(
    conn: &Connection,
    records: &[T],
) {
    for record in records {
        let terms = std::iter::once(record.name()).chain(record.aliases().iter().map(String::as_str));
        for term in terms {
            let from_db: T = find_by_name(conn, term).unwrap().unwrap();
            let from_seed = matching::find_by_name(records, term).unwrap();
            assert_eq!(&from_db, from_seed, "lookup of {term:?}");
        }
    }
}

#[test]
fn name_lookup_agrees_with_in_memory_scan() {
    let (conn, seed) = seeded();
    assert_names_agree::<Herb>(&conn, &seed.herbs);
    assert_names_agree::<Crystal>(&conn, &seed.crystals);
    assert_names_agree::<Color>(&conn, &seed.colors);
    assert_names_agree::<MoonPhase>(&conn, &seed.moon);
    assert_names_agree::<Metal>(&conn, &seed.metals);
    assert_names_agree::<Day>(&conn, &seed.days);
}

#[test]
fn content_search_matches_in_memory_scan() {
    let (conn, seed) = seeded();
    for term in ["love", "PROTECTION", "healing", "zzzz"] {
        let from_db: Vec<Herb> = find_by_content(&conn, term).unwrap();
        let from_seed: Vec<Herb> = matching::find_by_content(&seed.herbs, term)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(names(&from_db), names(&from_seed), "term {term:?}");
    }

    let colors: Vec<Color> = find_by_content(&conn, "love").unwrap();
    let expected: Vec<Color> = matching::find_by_content(&seed.colors, "love")
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(names(&colors), names(&expected));
}

#[test]
fn content_search_handles_punctuation() {
    let (conn, _) = seeded();
    // Punctuation-only terms skip the full-text index and still succeed.
    let rows: Vec<Herb> = find_by_content(&conn, "\"*").unwrap();
    assert!(rows.is_empty());
}

#[test]
fn content_search_is_non_empty_for_common_words() {
    let (conn, _) = seeded();
    let rows: Vec<Herb> = find_by_content(&conn, "protection").unwrap();
    assert!(!rows.is_empty());
    assert!(rows
        .iter()
        .all(|h| h.ritual_use.to_lowercase().contains("protection")));
}

#[test]
fn suggestions_are_sorted_and_limited() {
    let (conn, seed) = seeded();
    let rows: Vec<Day> = suggest(&conn, "day", 3).unwrap();
    assert_eq!(rows.len(), 3);
    let got: Vec<&str> = rows.iter().map(|d| d.name.as_str()).collect();
    let mut sorted = got.clone();
    sorted.sort();
    assert_eq!(got, sorted);

    let expected: Vec<&str> = matching::suggest(&seed.days, "day", 3)
        .into_iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(got, expected);
}

#[test]
fn suggestions_include_alias_matches() {
    let (conn, _) = seeded();
    let rows: Vec<Herb> = suggest(&conn, "elf", 5).unwrap();
    assert!(rows.iter().any(|h| h.name == "Rosemary"));
}

#[test]
fn list_all_returns_seed_order() {
    let (conn, seed) = seeded();
    let metals: Vec<Metal> = list_all(&conn).unwrap();
    assert_eq!(metals, seed.metals);
}
