use std::fs;
use std::path::Path;

use tempfile::TempDir;
use witchy_catalog::{EntityKind, Herb, SeedData, SeedParseError};

fn write_json(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn write_minimal_set(dir: &Path) {
    write_json(
        dir,
        "herbs.json",
        r#"[{"name": "Sage", "ritualUse": "Cleansing", "alsoCalled": ["Garden Sage"]}]"#,
    );
    write_json(
        dir,
        "crystals.json",
        r#"[{"name": "Jade", "properties": "Luck"}]"#,
    );
    write_json(dir, "colors.json", r#"[{"name": "Red", "meanings": "Passion"}]"#);
    write_json(
        dir,
        "moon.json",
        r#"[{"phase": "Full Moon", "meaning": "Power"}]"#,
    );
    write_json(dir, "metals.json", r#"[{"name": "Iron", "properties": "Defence"}]"#);
    write_json(
        dir,
        "days.json",
        r#"[{"name": "Monday", "intent": "Dreams", "planet": "Moon"}]"#,
    );
}

#[test]
fn bundled_datasets_parse() {
    let seed = SeedData::bundled().unwrap();
    for kind in EntityKind::ALL {
        assert!(seed.len_of(kind) > 0, "{} dataset should not be empty", kind);
    }
    assert_eq!(seed.days.len(), 7);
    assert_eq!(seed.total(), EntityKind::ALL.iter().map(|k| seed.len_of(*k)).sum::<usize>());
}

#[test]
fn bundled_herbs_carry_aliases() {
    let seed = SeedData::bundled().unwrap();
    let rosemary = seed
        .records::<Herb>()
        .iter()
        .find(|h| h.name == "Rosemary")
        .unwrap();
    assert!(rosemary.also_called.contains(&"Elf Leaf".to_string()));
}

#[test]
fn load_from_directory() {
    let tmp = TempDir::new().unwrap();
    write_minimal_set(tmp.path());

    let seed = SeedData::load_dir(tmp.path()).unwrap();
    assert_eq!(seed.herbs.len(), 1);
    assert_eq!(seed.herbs[0].also_called, vec!["Garden Sage".to_string()]);
    assert!(seed.crystals[0].also_called.is_empty());
    assert_eq!(seed.days[0].planet.as_deref(), Some("Moon"));
    assert_eq!(seed.days[0].deities, None);
    assert_eq!(seed.total(), 6);
}

#[test]
fn malformed_json_is_a_parse_error() {
    let tmp = TempDir::new().unwrap();
    write_minimal_set(tmp.path());
    write_json(tmp.path(), "metals.json", r#"[{"name": "Iron""#);

    let err = SeedData::load_dir(tmp.path()).unwrap_err();
    match err {
        SeedParseError::Parse { file, .. } => assert_eq!(file, "metals.json"),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn empty_description_is_rejected() {
    let tmp = TempDir::new().unwrap();
    write_minimal_set(tmp.path());
    write_json(tmp.path(), "colors.json", r#"[{"name": "Red", "meanings": "  "}]"#);

    let err = SeedData::load_dir(tmp.path()).unwrap_err();
    assert!(matches!(
        err,
        SeedParseError::EmptyField { index: 0, field: "description", .. }
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    write_minimal_set(tmp.path());
    fs::remove_file(tmp.path().join("days.json")).unwrap();

    let err = SeedData::load_dir(tmp.path()).unwrap_err();
    assert!(matches!(err, SeedParseError::Io { .. }));
}

#[test]
fn missing_dir_is_reported() {
    let tmp = TempDir::new().unwrap();
    let err = SeedData::load_dir(&tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, SeedParseError::DirNotFound(_)));
}

#[test]
fn kind_parses_singular_and_plural() {
    assert_eq!("Herbs".parse::<EntityKind>().unwrap(), EntityKind::Herb);
    assert_eq!("moon".parse::<EntityKind>().unwrap(), EntityKind::Moon);
    assert_eq!(" days ".parse::<EntityKind>().unwrap(), EntityKind::Day);
    assert!("potion".parse::<EntityKind>().is_err());
}
