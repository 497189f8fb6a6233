//! The `witchy >` prompt started when no command is given.

use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tokio::io::{AsyncBufReadExt, BufReader};
use witchy_catalog::EntityKind;
use witchy_lib::Datastore;

use crate::commands::{run_lookup, Query};
use crate::CliError;

const PROMPT: &str = "\u{1FA84} witchy > ";

/// One line of prompt input.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Empty,
    Help,
    Clear,
    Exit,
    Lookup(EntityKind, Query),
    Invalid(String),
}

fn parse_line(line: &str) -> Input {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((first, rest)) = words.split_first() else {
        return Input::Empty;
    };

    match first.to_lowercase().as_str() {
        "help" | "?" => return Input::Help,
        "clear" => return Input::Clear,
        "exit" | "quit" => return Input::Exit,
        _ => {}
    }

    let kind = match first.parse::<EntityKind>() {
        Ok(kind) => kind,
        Err(e) => return Input::Invalid(e.to_string()),
    };
    match Query::from_words(rest) {
        Some(query) => Input::Lookup(kind, query),
        None => Input::Invalid("Please provide at least a type and search term.".to_string()),
    }
}

/// Read commands until `exit` or end of input.
pub(crate) async fn run_interactive(store: &Datastore) -> Result<(), CliError> {
    show_welcome();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match parse_line(&line) {
            Input::Empty => {}
            Input::Help => show_help(),
            Input::Clear => {
                clear_screen()?;
                show_welcome();
            }
            Input::Exit => break,
            Input::Lookup(kind, query) => run_lookup(store, kind, &query).await,
            Input::Invalid(msg) => {
                log::info!("\u{274C} {}", msg);
                log::info!("   Example: herb rosemary");
                log::info!("   Type \"help\" for more information.");
                crate::log_blank();
            }
        }
    }

    log::info!("\u{2728} Blessed be! Goodbye!");
    Ok(())
}

fn prompt() -> Result<(), CliError> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}", PROMPT.if_supports_color(Stdout, |t| t.magenta()))?;
    stdout.flush()?;
    Ok(())
}

fn clear_screen() -> Result<(), CliError> {
    let mut stdout = std::io::stdout();
    write!(stdout, "\x1b[2J\x1b[H")?;
    stdout.flush()?;
    Ok(())
}

fn show_welcome() {
    log::info!(
        "{}",
        "\u{2728}\u{1F52E} Welcome to Witchy Lookup! \u{1F52E}\u{2728}"
            .if_supports_color(Stdout, |t| t.bold())
    );
    crate::log_blank();
    show_help();
}

/// Shared by the prompt and the no-argument usage text.
pub(crate) fn show_help() {
    log::info!("\u{1F31F} Available Lookup Types:");
    log::info!("  \u{1F33F} herbs    - Discover magical plants and their ritual uses");
    log::info!("  \u{1F48E} crystals - Explore gemstones and their mystical properties");
    log::info!("  \u{1F3A8} colors   - Learn about color magic and meanings");
    log::info!("  \u{1F319} moon     - Find moon phases perfect for your spellwork");
    log::info!("  \u{1FAA8} metals   - Understand metallic energies and correspondences");
    log::info!("  \u{1F4C5} days     - Discover which days are best for specific magical work");
    crate::log_blank();
    log::info!("\u{1F4D6} Command Formats:");
    log::info!("  <type> <name>      - Look up by name");
    log::info!("  <type> use <term>  - Search by magical use/property");
    crate::log_blank();
    log::info!("\u{2728} Examples:");
    log::info!("  herb rosemary");
    log::info!("  crystal use protection");
    log::info!("  day monday");
    log::info!("  moon use banishing");
    crate::log_blank();
    log::info!("\u{26A1} Quick Commands:");
    log::info!("  help  - Show this help");
    log::info!("  clear - Clear the screen");
    log::info!("  exit  - Exit the program");
    crate::log_blank();
}
