use super::*;

use tempfile::TempDir;
use witchy_catalog::Herb;

fn seed() -> Arc<SeedData> {
    Arc::new(SeedData::bundled().unwrap())
}

fn count(path: &Path, kind: EntityKind) -> u64 {
    let conn = witchy_db::open_for_query(path).unwrap();
    witchy_db::table_count(&conn, kind).unwrap()
}

#[test]
fn test_clean_start_seeds_everything() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("witchy.db");
    let seed = seed();
    let migrator = Migrator::new(&db, seed.clone());

    assert!(migrator.ensure_ready(false, false).unwrap());
    assert_eq!(count(&db, EntityKind::Herb), seed.herbs.len() as u64);

    let stats = migrator.stats().unwrap();
    assert!(stats.is_fully_seeded());
    assert_eq!(stats.total_records(), seed.total() as u64);
}

#[test]
fn test_second_run_is_a_no_op() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("witchy.db");
    let migrator = Migrator::new(&db, seed());

    assert!(migrator.ensure_ready(true, false).unwrap());
    assert!(!migrator.ensure_ready(true, false).unwrap());
    assert!(!migrator.ensure_ready(false, true).unwrap());
}

#[test]
fn test_truncated_table_triggers_reseed() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("witchy.db");
    let seed = seed();
    let migrator = Migrator::new(&db, seed.clone());
    migrator.ensure_ready(true, false).unwrap();

    {
        let conn = witchy_db::open_database(&db).unwrap();
        conn.execute("DELETE FROM crystals WHERE id % 2 = 0", [])
            .unwrap();
    }
    assert!(!migrator.stats().unwrap().is_fully_seeded());

    assert!(migrator.ensure_ready(true, false).unwrap());
    assert_eq!(count(&db, EntityKind::Crystal), seed.crystals.len() as u64);
    assert_eq!(count(&db, EntityKind::Herb), seed.herbs.len() as u64);
}

#[test]
fn test_existing_file_without_schema_is_recovered() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("witchy.db");
    {
        let conn = rusqlite::Connection::open(&db).unwrap();
        conn.execute_batch("CREATE TABLE unrelated (x INTEGER);").unwrap();
    }
    let seed = seed();
    let migrator = Migrator::new(&db, seed.clone());

    assert!(migrator.ensure_ready(true, false).unwrap());
    assert!(migrator.stats().unwrap().is_fully_seeded());
}

#[test]
fn test_changed_dataset_reseeds() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("witchy.db");
    Migrator::new(&db, seed()).ensure_ready(true, false).unwrap();

    let mut grown = SeedData::bundled().unwrap();
    grown.herbs.push(Herb {
        name: "Mugwort".into(),
        ritual_use: "Dreams and divination".into(),
        also_called: vec![],
    });
    let grown = Arc::new(grown);
    let migrator = Migrator::new(&db, grown.clone());

    assert!(migrator.ensure_ready(true, false).unwrap());
    assert_eq!(count(&db, EntityKind::Herb), grown.herbs.len() as u64);
}

#[test]
fn test_bundled_copy_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let asset = tmp.path().join("asset.db");
    let seed = seed();
    build_asset(&asset, &seed).unwrap();

    let target = tmp.path().join("data").join("witchy.db");
    std::fs::create_dir_all(target.parent().unwrap()).unwrap();
    let migrator = Migrator::new(&target, seed).with_bundled_asset(Some(asset.clone()));

    assert!(migrator.ensure_ready(true, false).unwrap());
    assert_eq!(std::fs::read(&asset).unwrap(), std::fs::read(&target).unwrap());
    // Already populated: nothing more to do
    assert!(!migrator.ensure_ready(true, false).unwrap());
}

#[test]
fn test_bundled_copy_replaces_empty_target() {
    let tmp = TempDir::new().unwrap();
    let asset = tmp.path().join("asset.db");
    let seed = seed();
    build_asset(&asset, &seed).unwrap();

    let target = tmp.path().join("witchy.db");
    std::fs::write(&target, b"").unwrap();
    let migrator = Migrator::new(&target, seed).with_bundled_asset(Some(asset.clone()));

    assert!(migrator.ensure_ready(true, false).unwrap());
    assert_eq!(std::fs::read(&asset).unwrap(), std::fs::read(&target).unwrap());
}

#[test]
fn test_missing_asset_falls_through_to_seed() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("witchy.db");
    let migrator = Migrator::new(&target, seed())
        .with_bundled_asset(Some(tmp.path().join("nowhere.db")));

    assert!(migrator.ensure_ready(true, false).unwrap());
    assert!(migrator.stats().unwrap().is_fully_seeded());
}

#[test]
fn test_reset_rebuilds() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("witchy.db");
    let seed = seed();
    let migrator = Migrator::new(&db, seed.clone());
    migrator.ensure_ready(true, false).unwrap();
    {
        let conn = witchy_db::open_database(&db).unwrap();
        conn.execute("DELETE FROM days", []).unwrap();
    }

    let stats = migrator.reset(true).unwrap();
    assert_eq!(stats.total(), seed.total());
    assert_eq!(count(&db, EntityKind::Day), seed.days.len() as u64);
}

#[test]
fn test_reset_without_existing_file() {
    let tmp = TempDir::new().unwrap();
    let migrator = Migrator::new(tmp.path().join("witchy.db"), seed());
    migrator.reset(true).unwrap();
    assert!(migrator.stats().unwrap().is_fully_seeded());
}

#[test]
fn test_stats_for_missing_file() {
    let tmp = TempDir::new().unwrap();
    let migrator = Migrator::new(tmp.path().join("witchy.db"), seed());
    let stats = migrator.stats().unwrap();
    assert!(!stats.exists);
    assert!(stats.tables.is_empty());
    assert!(!stats.is_fully_seeded());
    // stats never creates the file
    assert!(!migrator.target().exists());
}

#[test]
fn test_unwritable_target_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let migrator = Migrator::new(tmp.path().join("missing-dir").join("witchy.db"), seed());
    assert!(migrator.ensure_ready(true, false).is_err());
}
