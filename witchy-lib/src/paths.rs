//! Per-OS and per-packaging-mode path resolution.
//!
//! Everything the resolver reads from the host (environment variables, home
//! directory, executable location, pid) is gathered once into a [`HostEnv`],
//! so resolution itself is a pure function that tests can drive with a
//! hand-built environment.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::PathError;

/// File name of the SQLite database, both writable and bundled.
pub const DB_FILE_NAME: &str = "witchy.db";

/// Overrides the data directory.
pub const DATA_DIR_ENV: &str = "WITCHY_DATA_DIR";

/// Overrides packaging mode detection.
pub const MODE_ENV: &str = "WITCHY_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    MacOs,
    Other,
}

impl HostOs {
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            HostOs::Windows
        } else if cfg!(target_os = "macos") {
            HostOs::MacOs
        } else {
            HostOs::Other
        }
    }
}

/// How the program was deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackagingMode {
    /// Running from a source checkout; data lives under `<root>/data`.
    Source,
    /// Installed CLI; data lives in the per-user data directory.
    #[default]
    Installed,
    /// Single-file executable shipping a pre-built database beside it.
    Packaged,
}

impl PackagingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PackagingMode::Source => "source",
            PackagingMode::Installed => "installed",
            PackagingMode::Packaged => "packaged",
        }
    }
}

impl fmt::Display for PackagingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackagingMode {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "source" | "dev" => Ok(PackagingMode::Source),
            "installed" | "global" => Ok(PackagingMode::Installed),
            "packaged" | "pkg" => Ok(PackagingMode::Packaged),
            other => Err(PathError::UnknownMode(other.to_string())),
        }
    }
}

/// Host facts the resolver depends on.
#[derive(Debug, Clone)]
pub struct HostEnv {
    pub os: HostOs,
    /// `%APPDATA%` on Windows
    pub appdata: Option<PathBuf>,
    pub home: Option<PathBuf>,
    pub temp_dir: PathBuf,
    /// Directory holding the running executable
    pub exe_dir: Option<PathBuf>,
    /// Root of the source checkout, used in source mode
    pub source_root: Option<PathBuf>,
    pub pid: u32,
    pub data_dir_override: Option<PathBuf>,
    pub mode_override: Option<PackagingMode>,
}

impl HostEnv {
    /// Gather the environment of the current process.
    ///
    /// Fails only when `WITCHY_MODE` names an unknown mode.
    pub fn detect() -> Result<Self, PathError> {
        let mode_override = match std::env::var(MODE_ENV) {
            Ok(value) if !value.trim().is_empty() => Some(value.parse()?),
            _ => None,
        };
        let data_dir_override = std::env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let source_root = Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .map(Path::to_path_buf);

        Ok(Self {
            os: HostOs::current(),
            appdata: std::env::var_os("APPDATA").map(PathBuf::from),
            home: dirs::home_dir(),
            temp_dir: std::env::temp_dir(),
            exe_dir,
            source_root,
            pid: std::process::id(),
            data_dir_override,
            mode_override,
        })
    }

    /// Apply a `--data-dir` flag, which wins over the environment.
    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.data_dir_override = dir;
        }
        self
    }

    /// Apply a `--mode` flag, which wins over the environment.
    pub fn with_mode(mut self, mode: Option<PackagingMode>) -> Self {
        if mode.is_some() {
            self.mode_override = mode;
        }
        self
    }
}

/// Resolved locations for one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub mode: PackagingMode,
    pub data_dir: PathBuf,
    /// Writable database inside the data directory
    pub db_path: PathBuf,
    /// Pre-built database shipped beside the executable (packaged mode only)
    pub bundled_asset: Option<PathBuf>,
    /// Per-process copy of the bundled database (packaged mode only)
    pub temp_db_path: Option<PathBuf>,
}

impl AppPaths {
    /// Resolve every path and create the data directory if needed.
    pub fn resolve(env: &HostEnv) -> Result<Self, PathError> {
        let asset = find_bundled_asset(env);
        let mode = env.mode_override.unwrap_or(if asset.is_some() {
            PackagingMode::Packaged
        } else {
            PackagingMode::Installed
        });

        let data_dir = match &env.data_dir_override {
            Some(dir) => dir.clone(),
            None => default_data_dir(env, mode)?,
        };
        std::fs::create_dir_all(&data_dir).map_err(|e| PathError::create_dir(&data_dir, e))?;

        let (bundled_asset, temp_db_path) = if mode == PackagingMode::Packaged {
            let temp = env.temp_dir.join(format!("witchy-{}.db", env.pid));
            (asset, Some(temp))
        } else {
            (None, None)
        };

        log::debug!("Mode: {}, data directory: {}", mode, data_dir.display());

        Ok(Self {
            mode,
            db_path: data_dir.join(DB_FILE_NAME),
            data_dir,
            bundled_asset,
            temp_db_path,
        })
    }
}

/// The data directory for a mode, before any override.
pub fn default_data_dir(env: &HostEnv, mode: PackagingMode) -> Result<PathBuf, PathError> {
    if mode == PackagingMode::Source {
        let root = env.source_root.as_ref().ok_or(PathError::NoSourceRoot)?;
        return Ok(root.join("data"));
    }

    match env.os {
        HostOs::Windows => {
            let base = match &env.appdata {
                Some(appdata) => appdata.clone(),
                None => env
                    .home
                    .as_ref()
                    .ok_or(PathError::NoHome)?
                    .join("AppData")
                    .join("Roaming"),
            };
            Ok(base.join("WitchyCLI"))
        }
        HostOs::MacOs => Ok(env
            .home
            .as_ref()
            .ok_or(PathError::NoHome)?
            .join("Library")
            .join("Application Support")
            .join("WitchyCLI")),
        HostOs::Other => Ok(env
            .home
            .as_ref()
            .ok_or(PathError::NoHome)?
            .join(".local")
            .join("share")
            .join("witchy-cli")),
    }
}

/// `<exe dir>/witchy.db`, else `<exe dir>/assets/witchy.db`, if either exists.
fn find_bundled_asset(env: &HostEnv) -> Option<PathBuf> {
    let exe_dir = env.exe_dir.as_ref()?;
    [
        exe_dir.join(DB_FILE_NAME),
        exe_dir.join("assets").join(DB_FILE_NAME),
    ]
    .into_iter()
    .find(|p| p.is_file())
}

#[cfg(test)]
#[path = "tests/paths_tests.rs"]
mod tests;
