//! witchy CLI
//!
//! Look up magical correspondences for herbs, crystals, colors, moon phases,
//! metals and days of the week.

mod cli_types;
mod commands;
mod error;
mod highlight;
mod interactive;
mod logging;
mod present;
mod spinner;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use witchy_catalog::SeedData;
use witchy_lib::{lifecycle, AppPaths, Datastore, HostEnv, Readiness};

use crate::cli_types::{Cli, Commands};
use crate::commands::{run_db, run_lookup, Query};
use crate::spinner::Spinner;

pub(crate) use crate::error::CliError;
pub(crate) use crate::logging::log_blank;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not usage errors
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            return ExitCode::from(code);
        }
    };

    logging::init(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let seed = Arc::new(SeedData::bundled()?);
    let env = HostEnv::detect()?
        .with_data_dir(cli.data_dir.clone())
        .with_mode(cli.mode);
    let paths = AppPaths::resolve(&env)?;

    if let Some(Commands::Db { action }) = &cli.command {
        return run_db(action.clone(), &paths, seed, cli.quiet);
    }

    // Setup notices stay short unless --quiet silences them entirely.
    let store = Datastore::open(paths, seed).with_output(cli.quiet, !cli.quiet);
    if let Some(temp) = store.temp_database() {
        lifecycle::spawn_interrupt_watcher(temp.path().to_path_buf());
    }

    let spinner = Spinner::start("Preparing the grimoire...", cli.quiet);
    let readiness = store.ready().await;
    spinner.finish();
    if let Readiness::Unavailable(reason) = readiness {
        log::debug!("Database not prepared: {}", reason);
    }

    match cli.command.as_ref().and_then(Commands::lookup) {
        Some((kind, args)) => {
            let query = Query::from_args(&args.words)?;
            run_lookup(&store, kind, &query).await;
            Ok(())
        }
        None => interactive::run_interactive(&store).await,
    }
}
