/*!
    Seams between the playback loop and the FFmpeg crates.
*/

use ffmpeg_decode::VideoDecoder;
use ffmpeg_transform::VideoTransform;
use ffmpeg_types::{FrameTiming, Result, VideoFrame};

/**
    Yields decoded frames in presentation order.
*/
pub trait FrameSource {
    /**
        Timing used to pace the frames, known once the source is open.
    */
    fn timing(&self) -> FrameTiming;

    /**
        Decode the next frame, or return None once the stream is exhausted.

        The frame is borrowed until the next call.
    */
    fn next_frame(&mut self) -> Result<Option<&VideoFrame>>;
}

/**
    Resizes frames to the 4:2:0 layout the renderer paints.
*/
pub trait FrameScaler {
    /**
        Scale `frame` to exactly `width` x `height`. Both must be at least one.
    */
    fn scale(&mut self, frame: &VideoFrame, width: u32, height: u32) -> Result<VideoFrame>;
}

impl FrameSource for VideoDecoder {
    fn timing(&self) -> FrameTiming {
        self.stream_info().timing()
    }

    fn next_frame(&mut self) -> Result<Option<&VideoFrame>> {
        VideoDecoder::next_frame(self)
    }
}

impl FrameScaler for VideoTransform {
    fn scale(&mut self, frame: &VideoFrame, width: u32, height: u32) -> Result<VideoFrame> {
        self.transform(frame, width, height)
    }
}
