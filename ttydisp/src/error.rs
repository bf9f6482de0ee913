use std::io;

use thiserror::Error;

/**
    Invalid combination of command line arguments.
*/
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("both -w and -h are required when output is not a terminal")]
    DimensionsRequired,

    #[error("no input file given")]
    MissingFilename,
}

/**
    Failure to open the input before playback starts.
*/
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Error reading video format")]
    Format(#[source] ffmpeg_types::Error),

    #[error("Error reading video codec")]
    Codec(#[source] ffmpeg_types::Error),
}

/**
    Failure that aborts a running playback loop.
*/
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("error decoding frame: {0}")]
    Decode(#[source] ffmpeg_types::Error),

    #[error("error scaling frame: {0}")]
    Scale(#[source] ffmpeg_types::Error),

    #[error("error writing to terminal: {0}")]
    Terminal(#[from] io::Error),

    #[error("could not determine terminal size, pass both -w and -h")]
    TerminalSize,
}

/**
    Render an error followed by the chain of errors that caused it.
*/
pub fn describe(error: &dyn std::error::Error) -> String {
    let mut text = error.to_string();
    let mut cause = error.source();
    while let Some(inner) = cause {
        let inner_text = inner.to_string();
        // Variants that print their cause inline already
        if !text.contains(&inner_text) {
            text.push_str(": ");
            text.push_str(&inner_text);
        }
        cause = inner.source();
    }
    text
}
