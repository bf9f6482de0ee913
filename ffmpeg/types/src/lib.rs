/*!
    Shared types for the ffmpeg crate ecosystem.

    This crate defines the vocabulary of the ecosystem: the types that cross crate
    boundaries. It has no dependency on FFmpeg, so the terminal player and its tests
    can build frames and timing values without touching FFmpeg bindings.

    # Core Types

    - [`Rational`] - Rational numbers for time bases and frame rates
    - [`MediaDuration`] - Durations in time_base units
    - [`VideoFrame`] and [`Plane`] - Decoded or scaled planar frame data
    - [`PixelFormat`] - Video pixel formats

    # Stream Information

    - [`VideoStreamInfo`] - Metadata of the selected video stream
    - [`FrameTiming`] - Time base and ticks per frame, used for pacing

    # Error Handling

    - [`Error`] and [`Result`] - Common error types
*/

mod error;
mod format;
mod frame;
mod rational;
mod stream;
mod timestamp;

pub use error::{Error, Result};
pub use format::PixelFormat;
pub use frame::{Plane, VideoFrame};
pub use rational::Rational;
pub use stream::{FALLBACK_FRAME_RATE, FrameTiming, VideoStreamInfo};
pub use timestamp::MediaDuration;
