//! Per-process database copy for packaged executables.
//!
//! A packaged executable ships a read-only database beside itself. Each
//! process works on its own copy in the temp directory, which is removed on
//! normal exit ([`Drop`]) and on Ctrl-C ([`spawn_interrupt_watcher`]).

use std::path::{Path, PathBuf};

use tokio::task::JoinHandle;

/// Exit status used after an interrupt, as shells report for SIGINT.
pub const INTERRUPT_EXIT_CODE: i32 = 130;

/// A temp copy of the bundled database, deleted when dropped.
#[derive(Debug)]
pub struct TempDatabase {
    path: PathBuf,
}

impl TempDatabase {
    /// Copy `asset` to `temp_path` unless a file is already there.
    ///
    /// A partial copy is removed before the error is returned.
    pub fn materialize(asset: &Path, temp_path: &Path) -> std::io::Result<Self> {
        if !temp_path.exists() {
            if let Err(e) = std::fs::copy(asset, temp_path) {
                remove_temp(temp_path);
                return Err(e);
            }
            log::debug!(
                "Materialized {} -> {}",
                asset.display(),
                temp_path.display()
            );
        }
        Ok(Self {
            path: temp_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        remove_temp(&self.path);
    }
}

/// Delete a temp database, ignoring every error.
pub fn remove_temp(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => log::debug!("Removed temp database {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => log::debug!("Could not remove {}: {}", path.display(), e),
    }
}

/// On Ctrl-C, delete `path` and exit with [`INTERRUPT_EXIT_CODE`].
///
/// Must be called from within a tokio runtime.
pub fn spawn_interrupt_watcher(path: PathBuf) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                remove_temp(&path);
                std::process::exit(INTERRUPT_EXIT_CODE);
            }
            Err(e) => log::debug!("Interrupt handler unavailable: {}", e),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_removed_on_drop() {
        let tmp = tempfile::TempDir::new().unwrap();
        let asset = tmp.path().join("asset.db");
        std::fs::write(&asset, b"bundled bytes").unwrap();
        let temp_path = tmp.path().join("witchy-1.db");

        let temp = TempDatabase::materialize(&asset, &temp_path).unwrap();
        assert_eq!(std::fs::read(temp.path()).unwrap(), b"bundled bytes");
        drop(temp);
        assert!(!temp_path.exists());
        assert!(asset.exists());
    }

    #[test]
    fn test_existing_copy_is_reused() {
        let tmp = tempfile::TempDir::new().unwrap();
        let asset = tmp.path().join("asset.db");
        std::fs::write(&asset, b"new").unwrap();
        let temp_path = tmp.path().join("witchy-2.db");
        std::fs::write(&temp_path, b"old").unwrap();

        let temp = TempDatabase::materialize(&asset, &temp_path).unwrap();
        assert_eq!(std::fs::read(temp.path()).unwrap(), b"old");
    }

    #[test]
    fn test_missing_asset_fails_without_leftovers() {
        let tmp = tempfile::TempDir::new().unwrap();
        let temp_path = tmp.path().join("witchy-3.db");
        assert!(TempDatabase::materialize(&tmp.path().join("none.db"), &temp_path).is_err());
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_remove_temp_ignores_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        remove_temp(&tmp.path().join("never-existed.db"));
    }
}
