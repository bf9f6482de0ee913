/*!
    Media decoding for the ffmpeg crate ecosystem.

    This crate turns a media file into a sequence of raw video frames. Opening
    happens in two steps, mirroring how failures are reported to users:

    1. [`open`] opens the container and selects its best video stream.
    2. [`VideoDecoder::new`] opens a decoder for that stream.

    # Example

    ```ignore
    use ffmpeg_decode::{open, VideoDecoder};

    let source = open("video.mp4")?;
    let mut decoder = VideoDecoder::new(source)?;
    let timing = decoder.stream_info().timing();

    while let Some(frame) = decoder.next_frame()? {
        // Process frame, it is overwritten by the next call
    }
    ```

    # Buffer Reuse

    The decoder owns the frame it hands out and refills the same buffers on
    every call. Callers borrow the frame until their next call to
    [`VideoDecoder::next_frame`] and copy anything they need to keep.

    # Logging

    FFmpeg writes its own diagnostics to stderr by default, which would land
    in the middle of a terminal drawing. Call [`silence_library_logging`]
    before opening anything; failures are still reported through [`Error`]
    values carrying FFmpeg's message.
*/

pub use ffmpeg_types::{Error, Result, VideoFrame, VideoStreamInfo};

mod pixel;
mod source;
mod video;

pub use source::{MediaSource, open};
pub use video::VideoDecoder;

/**
    Stop FFmpeg from printing its own log messages.
*/
pub fn silence_library_logging() {
    ffmpeg_next::util::log::set_level(ffmpeg_next::util::log::Level::Quiet);
}
