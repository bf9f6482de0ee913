/*!
    In-memory stand-ins for the decoder and scaler.
*/

use std::collections::VecDeque;
use std::time::Duration;

use ffmpeg_types::{Error, FrameTiming, Rational, Result, VideoFrame};

use super::{FrameScaler, FrameSource};
use crate::context::CancelToken;

/**
    Solid 4:2:0 frame.
*/
pub fn solid(width: u32, height: u32, (y, u, v): (u8, u8, u8)) -> VideoFrame {
    let (w, h) = (width as usize, height as usize);
    let chroma = w.div_ceil(2) * h.div_ceil(2);
    VideoFrame::yuv420p(width, height, vec![y; w * h], vec![u; chroma], vec![v; chroma])
}

/**
    Timing of exactly `millis` per frame.
*/
pub fn timing_ms(millis: i32) -> FrameTiming {
    FrameTiming::new(Rational::new(1, 1000), i64::from(millis))
}

/**
    Plays back a fixed list of frames, optionally failing after them.
*/
pub struct FakeSource {
    frames: VecDeque<VideoFrame>,
    current: VideoFrame,
    timing: FrameTiming,
    failure: Option<Error>,
    pulled: usize,
}

impl FakeSource {
    pub fn new(frames: Vec<VideoFrame>, timing: FrameTiming) -> Self {
        Self {
            frames: frames.into(),
            current: VideoFrame::empty(),
            timing,
            failure: None,
            pulled: 0,
        }
    }

    /**
        Fail with `error` once the frames run out, instead of ending.
    */
    pub fn failing_with(mut self, error: Error) -> Self {
        self.failure = Some(error);
        self
    }

    /**
        Number of calls to `next_frame` that returned a frame.
    */
    pub fn pulled(&self) -> usize {
        self.pulled
    }
}

impl FrameSource for FakeSource {
    fn timing(&self) -> FrameTiming {
        self.timing
    }

    fn next_frame(&mut self) -> Result<Option<&VideoFrame>> {
        match self.frames.pop_front() {
            Some(frame) => {
                self.current = frame;
                self.pulled += 1;
                Ok(Some(&self.current))
            }
            None => match self.failure.take() {
                Some(error) => Err(error),
                None => Ok(None),
            },
        }
    }
}

/**
    Nearest-neighbor scaler that records the sizes it was asked for.
*/
#[derive(Default)]
pub struct NearestScaler {
    pub sizes: Vec<(u32, u32)>,
    /// Cancel this token while scaling the given frame (1-based).
    pub cancel_on: Option<(usize, CancelToken)>,
    /// Extra time spent on every frame.
    pub delay: Duration,
    /// Extra time spent on the first frame only.
    pub first_delay: Duration,
}

impl FrameScaler for NearestScaler {
    fn scale(&mut self, frame: &VideoFrame, width: u32, height: u32) -> Result<VideoFrame> {
        assert!(width >= 1 && height >= 1);
        self.sizes.push((width, height));
        if let Some((at, token)) = &self.cancel_on {
            if *at == self.sizes.len() {
                token.cancel();
            }
        }
        if self.sizes.len() == 1 {
            std::thread::sleep(self.first_delay);
        }
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        let pick = |x: u32, y: u32| {
            let sx = (x as u64 * frame.width as u64 / width as u64) as usize;
            let sy = (y as u64 * frame.height as u64 / height as u64) as usize;
            frame.yuv_at(sx, sy)
        };

        let luma = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| pick(x, y).0)
            .collect();
        let (cw, ch) = (width.div_ceil(2), height.div_ceil(2));
        let chroma: Vec<_> = (0..ch)
            .flat_map(|y| (0..cw).map(move |x| (x * 2, y * 2)))
            .map(|(x, y)| pick(x, y))
            .collect();

        Ok(VideoFrame::yuv420p(
            width,
            height,
            luma,
            chroma.iter().map(|s| s.1).collect(),
            chroma.iter().map(|s| s.2).collect(),
        ))
    }
}
