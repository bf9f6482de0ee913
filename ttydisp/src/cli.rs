/*!
    Command line parsing.

    Parsing happens in two phases: clap collects the raw flags into [`Args`],
    then [`Args::validate`] checks how they combine and produces a [`Command`].
*/

use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::{ArgAction, CommandFactory, Parser};

use crate::config::RenderConfig;
use crate::error::ConfigError;
use crate::logger::LOG_FILE_NAME;

/**
    Raw command line arguments.
*/
#[derive(Parser, Debug)]
#[command(name = "ttydisp")]
#[command(about = "Play a video file in the terminal using 256-color cells")]
#[command(disable_help_flag = true)]
pub struct Args {
    /// Show a status line and write the log to ttydisp.log
    #[arg(short, long)]
    pub verbose: bool,

    /// Output width in columns (defaults to the terminal width)
    #[arg(short, long, value_parser = parse_dimension)]
    pub width: Option<NonZeroU32>,

    /// Output height in rows (defaults to the terminal height)
    #[arg(short = 'h', long, value_parser = parse_dimension)]
    pub height: Option<NonZeroU32>,

    /// Print this help and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub help: bool,

    /// Video file to play
    pub filename: Option<PathBuf>,
}

/**
    What the program was asked to do.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Play(RenderConfig),
}

impl Args {
    /**
        Check the parsed flags against each other.

        Without a terminal to measure, both dimensions must be given. A file
        name is always required, unless help was requested.
    */
    pub fn validate(self, is_terminal: bool) -> Result<Command, ConfigError> {
        if self.help {
            return Ok(Command::Help);
        }

        if !is_terminal && (self.width.is_none() || self.height.is_none()) {
            return Err(ConfigError::DimensionsRequired);
        }

        let path = self.filename.ok_or(ConfigError::MissingFilename)?;

        Ok(Command::Play(RenderConfig {
            path,
            width: self.width,
            height: self.height,
            verbose: self.verbose,
        }))
    }
}

/**
    Returns the help text.
*/
pub fn usage() -> String {
    let mut command = Args::command().after_help(format!(
        "In verbose mode the log is written to {LOG_FILE_NAME} in the current directory."
    ));
    command.render_help().to_string()
}

/**
    Accept canonical decimal integers of at least one: no sign, no leading zeros.
*/
fn parse_dimension(value: &str) -> Result<NonZeroU32, String> {
    let canonical = value.bytes().all(|b| b.is_ascii_digit())
        && !value.is_empty()
        && !value.starts_with('0');
    if !canonical {
        return Err(format!("`{value}' is not a positive integer"));
    }
    value
        .parse()
        .map_err(|_| format!("`{value}' is too large"))
}
