use std::path::Path;
use std::sync::Arc;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use witchy_catalog::SeedData;
use witchy_lib::{AppPaths, Migrator};

use crate::cli_types::DbAction;
use crate::spinner::Spinner;
use crate::CliError;

/// `db` subcommands operate on the writable database in the data directory,
/// never on a packaged executable's temp copy.
pub(crate) fn run_db(
    action: DbAction,
    paths: &AppPaths,
    seed: Arc<SeedData>,
    quiet: bool,
) -> Result<(), CliError> {
    let migrator =
        Migrator::new(&paths.db_path, seed.clone()).with_bundled_asset(paths.bundled_asset.clone());
    match action {
        DbAction::Status => run_status(&migrator, paths),
        DbAction::Migrate => run_migrate(&migrator, quiet),
        DbAction::Reset => run_reset(&migrator, quiet),
        DbAction::BuildAsset { path } => run_build_asset(&path, &seed, quiet),
    }
}

fn run_status(migrator: &Migrator, paths: &AppPaths) -> Result<(), CliError> {
    let stats = migrator
        .stats()
        .map_err(|e| CliError::database(format!("Failed to read database: {}", e)))?;

    log::info!(
        "{}",
        "\u{1F52E} Database Status".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Mode:      {}", paths.mode);
    log::info!("  Data dir:  {}", paths.data_dir.display());
    log::info!("  Database:  {}", stats.path.display());
    if let Some(asset) = &paths.bundled_asset {
        log::info!("  Bundled:   {}", asset.display());
    }
    crate::log_blank();

    if !stats.exists {
        log::warn!("Database does not exist yet.");
        log::info!("Run 'witchy db migrate' to create it.");
        return Ok(());
    }

    log::info!("  Size:      {}", format_bytes(stats.size_bytes));
    crate::log_blank();
    for table in &stats.tables {
        let mark = if table.is_complete() {
            "\u{2714}".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "\u{2718}".if_supports_color(Stdout, |t| t.red()).to_string()
        };
        let count = table
            .count
            .map_or_else(|| "missing".to_string(), |c| c.to_string());
        log::info!(
            "  {} {:<12} {:>8} / {}",
            mark,
            table.kind.plural(),
            count,
            table.expected,
        );
    }
    crate::log_blank();
    log::info!("  Total records: {}", stats.total_records());

    if !stats.is_fully_seeded() {
        crate::log_blank();
        log::warn!("Some tables are incomplete. Run 'witchy db migrate' to repair.");
    }
    Ok(())
}

fn run_migrate(migrator: &Migrator, quiet: bool) -> Result<(), CliError> {
    let spinner = Spinner::start("Checking database...", quiet);
    let result = migrator.ensure_ready(quiet, false);
    spinner.finish();

    let changed = result.map_err(|e| CliError::database(format!("Migration failed: {}", e)))?;
    if changed {
        log::info!(
            "{}",
            "Database is ready.".if_supports_color(Stdout, |t| t.bold())
        );
    } else {
        log::info!("Database is already up to date.");
    }
    log::info!("  Path: {}", migrator.target().display());
    Ok(())
}

fn run_reset(migrator: &Migrator, quiet: bool) -> Result<(), CliError> {
    let spinner = Spinner::start("Rebuilding database...", quiet);
    let result = migrator.reset(quiet);
    spinner.finish();

    let stats = result.map_err(|e| CliError::database(format!("Reset failed: {}", e)))?;
    log::info!(
        "{}",
        "Database reset completed.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path:    {}", migrator.target().display());
    log::info!("  Records: {}", stats.total());
    Ok(())
}

fn run_build_asset(path: &Path, seed: &SeedData, quiet: bool) -> Result<(), CliError> {
    let spinner = Spinner::start(format!("Building {}...", path.display()), quiet);
    let result = witchy_lib::build_asset(path, seed);
    spinner.finish();

    let stats = result.map_err(|e| CliError::database(format!("Build failed: {}", e)))?;
    let size = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    log::info!(
        "{}",
        "Pre-populated database written.".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Path:    {}", path.display());
    log::info!("  Records: {}", stats.total());
    log::info!("  Size:    {}", format_bytes(size));
    crate::log_blank();
    log::info!("Ship it beside the executable as witchy.db or assets/witchy.db.");
    Ok(())
}

/// Human-readable byte count.
fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 bytes");
        assert_eq!(format_bytes(512), "512 bytes");
        assert_eq!(format_bytes(2048), "2.0 KB");
        assert_eq!(format_bytes(3 * 1024 * 1024 / 2), "1.5 MB");
    }
}
