/*!
    Validated playback settings and their per-frame resolution.
*/

use std::num::NonZeroU32;
use std::path::PathBuf;

use crate::error::PlaybackError;
use crate::terminal::TerminalProbe;

/**
    Settings for one playback session, fixed once playback starts.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Video file to play.
    pub path: PathBuf,
    /// Explicit width in columns, or None to follow the terminal.
    pub width: Option<NonZeroU32>,
    /// Explicit height in rows, or None to follow the terminal.
    pub height: Option<NonZeroU32>,
    /// Show the status line and echo the log to a file.
    pub verbose: bool,
}

impl RenderConfig {
    /**
        Rows kept free below the picture for the status line.
    */
    pub fn status_rows(&self) -> u32 {
        u32::from(self.verbose)
    }

    /**
        Returns the name shown in the status line.
    */
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or(self.path.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /**
        Resolve the target size for the next frame.

        Explicit dimensions win. The terminal is only asked for the ones
        left unset, and is asked again on every call so resizes take effect
        on the next frame.
    */
    pub fn resolve(&self, probe: &dyn TerminalProbe) -> Result<TargetSize, PlaybackError> {
        let probed = match (self.width, self.height) {
            (Some(_), Some(_)) => None,
            _ => probe.size(),
        };

        let width = self
            .width
            .map(NonZeroU32::get)
            .or(probed.map(|(columns, _)| columns))
            .ok_or(PlaybackError::TerminalSize)?;
        let height = self
            .height
            .map(NonZeroU32::get)
            .or(probed.map(|(_, rows)| rows))
            .ok_or(PlaybackError::TerminalSize)?;

        Ok(TargetSize {
            width,
            height,
            status_rows: self.status_rows(),
        })
    }
}

/**
    Size of the area drawn for one frame, status line included.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetSize {
    pub width: u32,
    pub height: u32,
    pub status_rows: u32,
}

impl TargetSize {
    /**
        Rows of picture, never less than one.
    */
    pub fn render_height(&self) -> u32 {
        self.height.saturating_sub(self.status_rows).max(1)
    }

    /**
        Cursor-up moves needed to return from the last drawn row to the first.
    */
    pub fn redraw_lines(&self) -> u32 {
        (self.render_height() + self.status_rows).saturating_sub(1)
    }
}
