//! Defines the command-line arguments and subcommands for the textbites CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use termcolor::ColorChoice;

use crate::search::SearchFilter;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "textbites",
    version,
    about = "Address and search passages of chaptered texts."
)]
pub struct TextbitesArgs {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log level when no -v flag is given.
    #[arg(long, env = "TEXTBITES_LOG", value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// When to colour output.
    #[arg(long, env = "TEXTBITES_COLOR", value_enum, default_value_t = ColorMode::Auto, global = true)]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Command,
}

impl TextbitesArgs {
    /// The configured level, raised by each `-v`.
    pub fn level_filter(&self) -> LevelFilter {
        let from_flags = match self.verbose {
            0 => LevelFilter::Off,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        from_flags.max(self.log_level.into())
    }
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the label and text of a reference.
    Show {
        /// The document file (.json, .yaml or .yml).
        #[arg(required = true)]
        file: PathBuf,
        /// A reference such as "2", "chapter 2-3" or "2:1-3".
        #[arg(required = true)]
        reference: String,
        /// List the reference's children instead of its text.
        #[arg(long)]
        children: bool,
    },
    /// Print every line matching a regular expression.
    Search {
        /// The document file (.json, .yaml or .yml).
        #[arg(required = true)]
        file: PathBuf,
        /// The regular expression to look for.
        #[arg(required = true)]
        pattern: String,
        /// Restrict the search to a reference.
        #[arg(
            long = "in",
            value_name = "REFERENCE",
            conflicts_with_all = ["first_chapter", "last_chapter", "first_line", "last_line"]
        )]
        within: Option<String>,
        #[arg(long, value_name = "N")]
        first_chapter: Option<u32>,
        #[arg(long, value_name = "N")]
        last_chapter: Option<u32>,
        #[arg(long, value_name = "N")]
        first_line: Option<u32>,
        #[arg(long, value_name = "N")]
        last_line: Option<u32>,
    },
    /// List chapters with their line counts.
    Chapters {
        /// The document file (.json, .yaml or .yml).
        #[arg(required = true)]
        file: PathBuf,
    },
}

/// Builds the search filter from the individual bound flags.
pub fn search_filter(
    first_chapter: Option<u32>,
    last_chapter: Option<u32>,
    first_line: Option<u32>,
    last_line: Option<u32>,
) -> SearchFilter {
    SearchFilter {
        first_chapter,
        last_chapter,
        first_line,
        last_line,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for ColorChoice {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}
