//! The textbites command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::{
    io::{self, IsTerminal, Write},
    path::Path,
    process,
};

use clap::Parser;
use log::{debug, LevelFilter};
use termcolor::{ColorChoice, StandardStream};

use crate::{
    errors::{io_error, print_error, Result},
    resource::Resource,
    search,
};

pub mod args;
pub mod logging;
pub mod output;

use args::{ColorMode, Command, TextbitesArgs};

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = TextbitesArgs::parse();
    let color = color_choice(args.color);
    init_logging(args.level_filter(), color);

    if let Err(e) = execute(&args.command, color) {
        print_error(e);
        process::exit(1);
    }
}

/// Runs one subcommand, writing its output to stdout.
pub fn execute(command: &Command, color: ColorChoice) -> Result<()> {
    let mut stdout = StandardStream::stdout(color);

    let written = match command {
        Command::Show {
            file,
            reference,
            children,
        } => {
            let resource = load(file)?;
            let reference = resource.reference(reference)?;
            if *children {
                output::write_children(&mut stdout, &reference)
            } else {
                let text = reference.text()?;
                output::write_reference(&mut stdout, &reference, &text)
            }
        }

        Command::Search {
            file,
            pattern,
            within,
            first_chapter,
            last_chapter,
            first_line,
            last_line,
        } => {
            let resource = load(file)?;
            let regex = search::compile_pattern(pattern)?;
            let hits = match within {
                Some(text) => resource.reference(text)?.search_regex(&regex),
                None => {
                    let filter =
                        args::search_filter(*first_chapter, *last_chapter, *first_line, *last_line);
                    search::search(resource.document(), &regex, &filter)
                }
            };
            debug!("{} hit(s) for /{}/", hits.len(), pattern);
            output::write_hits(&mut stdout, &hits, &regex)
        }

        Command::Chapters { file } => {
            let resource = load(file)?;
            output::write_chapters(&mut stdout, &resource)
        }
    };

    written
        .and_then(|()| stdout.flush())
        .map_err(|e| io_error(Path::new("<stdout>"), e))
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn load(file: &Path) -> Result<Resource> {
    debug!("loading {}", file.display());
    Resource::from_path(file)
}

/// `auto` only colours when stdout is a terminal.
fn color_choice(mode: ColorMode) -> ColorChoice {
    match mode {
        ColorMode::Auto if !io::stdout().is_terminal() => ColorChoice::Never,
        other => other.into(),
    }
}

fn init_logging(level: LevelFilter, color: ColorChoice) {
    if let Err(e) = logging::init(level, color) {
        eprintln!("textbites: logger already installed: {e}");
    }
}
