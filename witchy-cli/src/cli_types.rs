//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use witchy_catalog::EntityKind;
use witchy_lib::PackagingMode;

#[derive(Parser)]
#[command(name = "witchy")]
#[command(about = "Your magical reference companion: herbs, crystals, colors, moon phases, metals and days", long_about = None)]
#[command(version)]
pub(crate) struct Cli {
    /// Suppress setup messages and the progress spinner
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the database (overrides WITCHY_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Deployment mode: source, installed or packaged (overrides WITCHY_MODE)
    #[arg(long, global = true)]
    pub mode: Option<PackagingMode>,

    /// Omit to start the interactive prompt
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Words after the lookup type: `<name...>` or `use <term...>`.
#[derive(Args, Clone, Debug)]
pub(crate) struct LookupArgs {
    /// Name to look up, or `use` followed by a property to search for
    #[arg(required = true, num_args = 1..)]
    pub words: Vec<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Discover magical plants and their ritual uses
    #[command(visible_alias = "herbs")]
    Herb(LookupArgs),

    /// Explore gemstones and their mystical properties
    #[command(visible_alias = "crystals")]
    Crystal(LookupArgs),

    /// Learn about color magic and meanings
    #[command(visible_alias = "colors", alias = "colour", alias = "colours")]
    Color(LookupArgs),

    /// Find moon phases perfect for your spellwork
    #[command(alias = "moons")]
    Moon(LookupArgs),

    /// Understand metallic energies and correspondences
    #[command(visible_alias = "metals")]
    Metal(LookupArgs),

    /// Discover which days are best for specific magical work
    #[command(visible_alias = "days")]
    Day(LookupArgs),

    /// Manage the local database
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

impl Commands {
    /// The entity kind and words of a lookup command.
    pub(crate) fn lookup(&self) -> Option<(EntityKind, &LookupArgs)> {
        match self {
            Commands::Herb(args) => Some((EntityKind::Herb, args)),
            Commands::Crystal(args) => Some((EntityKind::Crystal, args)),
            Commands::Color(args) => Some((EntityKind::Color, args)),
            Commands::Moon(args) => Some((EntityKind::Moon, args)),
            Commands::Metal(args) => Some((EntityKind::Metal, args)),
            Commands::Day(args) => Some((EntityKind::Day, args)),
            Commands::Db { .. } => None,
        }
    }
}

#[derive(Subcommand, Clone, Debug)]
pub(crate) enum DbAction {
    /// Show database location and record counts
    #[command(alias = "stats")]
    Status,

    /// Ensure the database exists and is fully populated
    Migrate,

    /// Delete and recreate the database
    Reset,

    /// Write a pre-populated database for packaged builds
    BuildAsset {
        /// Output file (e.g. dist/assets/witchy.db)
        path: PathBuf,
    },
}
