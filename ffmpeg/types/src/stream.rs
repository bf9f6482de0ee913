/*!
    Stream metadata and frame timing.
*/

use std::fmt;
use std::time::Duration;

use crate::{MediaDuration, PixelFormat, Rational};

/**
    Frame rate assumed when a stream reports no usable rate.
*/
pub const FALLBACK_FRAME_RATE: Rational = Rational { num: 25, den: 1 };

/**
    Timing metadata for a constant frame rate stream.

    One frame lasts `ticks_per_frame` ticks of `time_base` seconds each.
    Variable frame rates are not modeled.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTiming {
    /// Seconds per tick.
    pub time_base: Rational,
    /// Ticks per displayed frame, values below one count as one.
    pub ticks_per_frame: i64,
}

impl FrameTiming {
    /**
        Create timing from a time base and tick count.
    */
    pub const fn new(time_base: Rational, ticks_per_frame: i64) -> Self {
        Self {
            time_base,
            ticks_per_frame,
        }
    }

    /**
        Create timing from a frame rate, one tick per frame.

        Returns None if the rate is zero, negative or unknown.
    */
    pub fn from_frame_rate(rate: Rational) -> Option<Self> {
        rate.is_positive().then(|| Self::new(rate.invert(), 1))
    }

    /**
        Returns the wall-clock duration of one frame.
    */
    pub fn frame_duration(&self) -> Duration {
        MediaDuration(self.ticks_per_frame.max(1)).to_duration(self.time_base)
    }
}

impl Default for FrameTiming {
    fn default() -> Self {
        Self::new(FALLBACK_FRAME_RATE.invert(), 1)
    }
}

/**
    Metadata of the selected video stream, available once its codec is open.
*/
#[derive(Clone, Debug, PartialEq)]
pub struct VideoStreamInfo {
    /// Index of the stream within its container.
    pub index: usize,
    /// Codec name, as reported by the decoder.
    pub codec: String,
    /// Coded width in pixels.
    pub width: u32,
    /// Coded height in pixels.
    pub height: u32,
    /// Decoder output format, if it is one this ecosystem handles.
    pub format: Option<PixelFormat>,
    /// Time base of the stream's timestamps.
    pub time_base: Rational,
    /// Frame rate used for pacing.
    pub frame_rate: Rational,
}

impl VideoStreamInfo {
    /**
        Returns the pacing information for this stream.
    */
    pub fn timing(&self) -> FrameTiming {
        FrameTiming::from_frame_rate(self.frame_rate).unwrap_or_default()
    }
}

impl fmt::Display for VideoStreamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stream #{}: {} {}x{}",
            self.index, self.codec, self.width, self.height
        )?;
        match self.format {
            Some(format) => write!(f, " {format:?}")?,
            None => write!(f, " (unknown pixel format)")?,
        }
        write!(
            f,
            ", {:.3} fps, time base {}",
            self.frame_rate.to_f64(),
            self.time_base
        )
    }
}
