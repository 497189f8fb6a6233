use super::*;

use tempfile::TempDir;

use crate::migrator::build_asset;
use crate::paths::DB_FILE_NAME;

fn seed() -> Arc<SeedData> {
    Arc::new(SeedData::bundled().unwrap())
}

fn installed_paths(tmp: &TempDir) -> AppPaths {
    let data_dir = tmp.path().join("data");
    std::fs::create_dir_all(&data_dir).unwrap();
    AppPaths {
        mode: PackagingMode::Installed,
        db_path: data_dir.join(DB_FILE_NAME),
        data_dir,
        bundled_asset: None,
        temp_db_path: None,
    }
}

fn packaged_paths(tmp: &TempDir, seed: &SeedData) -> AppPaths {
    let asset = tmp.path().join("bin").join(DB_FILE_NAME);
    build_asset(&asset, seed).unwrap();
    AppPaths {
        mode: PackagingMode::Packaged,
        bundled_asset: Some(asset),
        temp_db_path: Some(tmp.path().join("witchy-77.db")),
        ..installed_paths(tmp)
    }
}

#[tokio::test]
async fn test_clean_start() {
    let tmp = TempDir::new().unwrap();
    let seed = seed();
    let store = Datastore::open(installed_paths(&tmp), seed.clone()).with_output(true, false);

    assert_eq!(store.ready().await, &Readiness::Ready { migrated: true });
    // Readiness is computed once
    assert_eq!(store.ready().await, &Readiness::Ready { migrated: true });

    let herbs = store.herbs().await;
    assert!(herbs.uses_store());
    assert_eq!(herbs.all().await.len(), seed.herbs.len());
    assert_eq!(store.active_path(), store.paths().db_path.as_path());
}

#[tokio::test]
async fn test_existing_database_is_not_migrated_again() {
    let tmp = TempDir::new().unwrap();
    let paths = installed_paths(&tmp);
    Datastore::open(paths.clone(), seed()).with_output(true, false).ready().await;

    let store = Datastore::open(paths, seed()).with_output(true, false);
    assert_eq!(store.ready().await, &Readiness::Ready { migrated: false });
}

#[tokio::test]
async fn test_unavailable_store_falls_back() {
    let tmp = TempDir::new().unwrap();
    let mut paths = installed_paths(&tmp);
    paths.db_path = tmp.path().join("no-such-dir").join(DB_FILE_NAME);
    let store = Datastore::open(paths, seed()).with_output(true, false);

    assert!(!store.ready().await.is_ready());
    let days = store.days().await;
    let monday = days.find_by_name("monday").await.unwrap();
    assert_eq!(monday.name, "Monday");
    assert_eq!(days.all().await.len(), 7);
}

#[tokio::test]
async fn test_store_is_retried_after_failed_readiness() {
    let tmp = TempDir::new().unwrap();
    let seed = seed();
    let paths = installed_paths(&tmp);
    Datastore::open(paths.clone(), seed.clone()).with_output(true, false).ready().await;

    // A short metals table forces a reseed, which the lock below blocks
    let lock = rusqlite::Connection::open(&paths.db_path).unwrap();
    lock.execute("DELETE FROM metals WHERE id = (SELECT MIN(id) FROM metals)", [])
        .unwrap();
    lock.execute_batch("BEGIN EXCLUSIVE;").unwrap();

    let store = Datastore::open(paths, seed.clone()).with_output(true, false);
    assert!(!store.ready().await.is_ready());

    lock.execute_batch("ROLLBACK;").unwrap();
    drop(lock);

    let metals = store.metals().await;
    assert!(metals.uses_store());
    // Only the store is missing a row, so the count shows who answered
    assert_eq!(metals.all().await.len(), seed.metals.len() - 1);
    assert!(!store.ready().await.is_ready());
}

#[tokio::test]
async fn test_packaged_mode_uses_temp_copy() {
    let tmp = TempDir::new().unwrap();
    let seed = seed();
    let paths = packaged_paths(&tmp, &seed);
    let temp_path = paths.temp_db_path.clone().unwrap();
    let asset = paths.bundled_asset.clone().unwrap();

    let store = Datastore::open(paths.clone(), seed.clone()).with_output(true, false);
    assert_eq!(store.active_path(), temp_path.as_path());
    assert_eq!(std::fs::read(&temp_path).unwrap(), std::fs::read(&asset).unwrap());

    assert_eq!(store.ready().await, &Readiness::Ready { migrated: false });
    let metals = store.metals().await;
    assert_eq!(metals.all().await.len(), seed.metals.len());
    // The writable database is left alone
    assert!(!paths.db_path.exists());

    drop(metals);
    drop(store);
    assert!(!temp_path.exists());
    assert!(asset.exists());
}

#[tokio::test]
async fn test_packaged_mode_without_temp_dir_uses_data_dir() {
    let tmp = TempDir::new().unwrap();
    let seed = seed();
    let mut paths = packaged_paths(&tmp, &seed);
    paths.temp_db_path = Some(tmp.path().join("missing").join("witchy-78.db"));
    let asset = paths.bundled_asset.clone().unwrap();

    let store = Datastore::open(paths.clone(), seed).with_output(true, false);
    assert!(store.temp_database().is_none());
    assert_eq!(store.active_path(), paths.db_path.as_path());

    // Bundled fast path copies into the data directory
    assert_eq!(store.ready().await, &Readiness::Ready { migrated: true });
    assert_eq!(std::fs::read(&paths.db_path).unwrap(), std::fs::read(&asset).unwrap());
}
