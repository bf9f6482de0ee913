/*!
    Media frame transformation for the ffmpeg crate ecosystem.

    This crate resizes video frames and converts them between pixel formats.
    Decoders output frames at the stream's resolution in whatever format the
    codec specifies; this crate converts them to the size and layout a
    consumer needs.

    # Video Transformation

    ```ignore
    use ffmpeg_transform::{VideoTransform, VideoTransformConfig};

    // Convert any video frame to YUV 4:2:0 sized for an 80x24 terminal
    let mut transform = VideoTransform::new(VideoTransformConfig::default());

    for frame in decoded_frames {
        let small = transform.transform(&frame, 80, 24)?;
        // Draw small
    }
    ```

    # Lazy Initialization

    The scaling context is created on first use and cached. It is keyed on the
    source size and format and the target size and format; when any of those
    change (a terminal resize, or a stream switching resolution) the context
    is rebuilt. [`VideoTransform::rebuilds`] counts how often that happened.
*/

pub use ffmpeg_types::{Error, PixelFormat, Result, VideoFrame};

mod video;

pub use video::{VideoTransform, VideoTransformConfig};
