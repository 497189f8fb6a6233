//! `env_logger` setup. User-facing output goes through `log::info!`, so the
//! info format is the bare message.

use std::io::Write;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

/// Install the global logger. `RUST_LOG` still overrides the level.
pub(crate) fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .parse_default_env()
        .target(Target::Stdout)
        .format(move |buf, record| {
            if verbose {
                write!(buf, "{} ", buf.timestamp_millis())?;
            }
            match record.level() {
                Level::Info if !verbose => writeln!(buf, "{}", record.args()),
                Level::Error => writeln!(
                    buf,
                    "{} {}",
                    "error:".if_supports_color(Stdout, |t| t.red()),
                    record.args()
                ),
                Level::Warn => writeln!(
                    buf,
                    "{} {}",
                    "warning:".if_supports_color(Stdout, |t| t.yellow()),
                    record.args()
                ),
                other => writeln!(
                    buf,
                    "{} {}",
                    format!("[{}]", other).if_supports_color(Stdout, |t| t.dimmed()),
                    record.args()
                ),
            }
        });

    // A second init (e.g. in tests) keeps the first logger.
    let _ = builder.try_init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
