//! Command-line argument parsing.
//!
//! Arguments are parsed by hand: there are two subcommands and a handful of
//! flags. Global flags may appear before or after the subcommand.

use std::path::PathBuf;

use thiserror::Error;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
Celestial Hymns presenter

USAGE:
    hymn-presenter [OPTIONS] [dock]
    hymn-presenter [OPTIONS] display <LOCATION>
    hymn-presenter [OPTIONS] display --window <NAME>
    hymn-presenter [OPTIONS] display --html <LOCATION>

COMMANDS:
    dock        Operator control panel (default)
    display     Presentation surface for one location, e.g.
                \"/display?number=12&theme=dark&slide=2\"

OPTIONS:
    --content <PATH>   Hymn collection JSON (overrides config)
    --config <PATH>    Config file (default: per-user config directory)
    --help, -h         Show this help message
    --version, -V      Show version

DOCK KEYS:
    Up / Down          Select hymn
    Left / Right       Previous / next slide
    Enter              Send selection to the display
    / or Ctrl+F        Search
    t v s a            Cycle theme, view, font size, alignment
    b / o              Edit / open background image
    q / Ctrl+C         Quit";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    #[error("unknown argument: {0}")]
    UnknownArgument(String),
    #[error("{0} requires a value")]
    MissingValue(&'static str),
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayTarget {
    /// Render one location given on the command line.
    Location(String),
    /// Follow a named output window.
    Window(String),
    /// Print one location as an HTML page and exit.
    Html(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dock,
    Display(DisplayTarget),
    Help,
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    pub command: Command,
    pub content: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Split `--flag=value` or take the next argument as the value.
fn flag_value<I>(
    arg: &str,
    flag: &'static str,
    rest: &mut I,
) -> Result<Option<String>, CliError>
where
    I: Iterator<Item = String>,
{
    if arg == flag {
        return rest.next().map(Some).ok_or(CliError::MissingValue(flag));
    }
    match arg.strip_prefix(flag).and_then(|tail| tail.strip_prefix('=')) {
        Some(value) => Ok(Some(value.to_string())),
        None => Ok(None),
    }
}

impl Cli {
    pub fn parse<I>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut content = None;
        let mut config = None;
        let mut subcommand: Option<String> = None;
        let mut target: Option<DisplayTarget> = None;

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Ok(Self::bare(Command::Help));
            }
            if arg == "--version" || arg == "-V" {
                return Ok(Self::bare(Command::Version));
            }
            if let Some(value) = flag_value(&arg, "--content", &mut args)? {
                content = Some(PathBuf::from(value));
                continue;
            }
            if let Some(value) = flag_value(&arg, "--config", &mut args)? {
                config = Some(PathBuf::from(value));
                continue;
            }

            let in_display = subcommand.as_deref() == Some("display");
            if in_display && target.is_none() {
                if let Some(name) = flag_value(&arg, "--window", &mut args)? {
                    target = Some(DisplayTarget::Window(name));
                    continue;
                }
                if let Some(location) = flag_value(&arg, "--html", &mut args)? {
                    target = Some(DisplayTarget::Html(location));
                    continue;
                }
                // Bare queries start with '?', which never looks like a flag.
                if !arg.starts_with("--") {
                    target = Some(DisplayTarget::Location(arg));
                    continue;
                }
            }

            if subcommand.is_none() && (arg == "dock" || arg == "display") {
                subcommand = Some(arg);
                continue;
            }
            if subcommand.is_none() || arg.starts_with('-') {
                return Err(CliError::UnknownArgument(arg));
            }
            return Err(CliError::UnexpectedArgument(arg));
        }

        let command = match subcommand.as_deref() {
            Some("display") => {
                Command::Display(target.unwrap_or(DisplayTarget::Location(String::new())))
            }
            _ => Command::Dock,
        };
        Ok(Self {
            command,
            content,
            config,
        })
    }

    fn bare(command: Command) -> Self {
        Self {
            command,
            content: None,
            config: None,
        }
    }
}
