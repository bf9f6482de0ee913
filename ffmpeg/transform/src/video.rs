/*!
    Video frame scaling and pixel format conversion.
*/

use ffmpeg_next::{
    format::Pixel,
    software::scaling::{Context as ScalingContext, Flags},
    util::frame::video::Video as VideoFrameFFmpeg,
};

use ffmpeg_types::{Error, PixelFormat, Plane, Result, VideoFrame};

/**
    Configuration for video transformation.

    The target size is passed per frame, since it can follow a terminal
    that is being resized.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoTransformConfig {
    /// Pixel format of transformed frames.
    pub format: PixelFormat,
}

impl Default for VideoTransformConfig {
    fn default() -> Self {
        Self {
            format: PixelFormat::Yuv420p,
        }
    }
}

/**
    Everything the scaling context depends on.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScalerKey {
    src_width: u32,
    src_height: u32,
    src_format: PixelFormat,
    dst_width: u32,
    dst_height: u32,
    dst_format: PixelFormat,
}

/**
    A scaling context plus the FFmpeg frame used to stage its input.
*/
struct Scaler {
    key: ScalerKey,
    context: ScalingContext,
    input: VideoFrameFFmpeg,
}

impl Scaler {
    fn new(key: ScalerKey) -> Result<Self> {
        let src_format = to_ffmpeg(key.src_format)?;
        let dst_format = to_ffmpeg(key.dst_format)?;

        let context = ScalingContext::get(
            src_format,
            key.src_width,
            key.src_height,
            dst_format,
            key.dst_width,
            key.dst_height,
            Flags::BICUBIC,
        )
        .map_err(|e| Error::codec(format!("error creating scaler: {e}")))?;

        Ok(Self {
            key,
            context,
            input: VideoFrameFFmpeg::new(src_format, key.src_width, key.src_height),
        })
    }

    fn run(&mut self, frame: &VideoFrame) -> Result<VideoFrame> {
        copy_planes(frame, &mut self.input)?;

        let mut output = VideoFrameFFmpeg::new(
            to_ffmpeg(self.key.dst_format)?,
            self.key.dst_width,
            self.key.dst_height,
        );
        self.context
            .run(&self.input, &mut output)
            .map_err(|e| Error::codec(format!("error scaling frame: {e}")))?;

        let planes = (0..output.planes())
            .map(|index| Plane::new(output.data(index).to_vec(), output.stride(index)))
            .collect();

        Ok(VideoFrame::new(
            self.key.dst_width,
            self.key.dst_height,
            self.key.dst_format,
            planes,
        ))
    }
}

/**
    Video frame transformer.

    Scales frames to a requested size and converts them to the configured
    pixel format. The FFmpeg scaling context is created lazily and reused
    for as long as source and target geometry stay the same.
*/
pub struct VideoTransform {
    config: VideoTransformConfig,
    scaler: Option<Scaler>,
    rebuilds: u64,
}

impl VideoTransform {
    /**
        Create a new transformer. No FFmpeg state is allocated until the first frame.
    */
    pub fn new(config: VideoTransformConfig) -> Self {
        Self {
            config,
            scaler: None,
            rebuilds: 0,
        }
    }

    /**
        Number of times a scaling context has been created.
    */
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /**
        Transform a frame to `width` x `height` in the configured format.

        The input is only borrowed; the returned frame owns its buffers.

        # Panics

        Panics if `width` or `height` is zero.
    */
    pub fn transform(&mut self, frame: &VideoFrame, width: u32, height: u32) -> Result<VideoFrame> {
        assert!(
            width >= 1 && height >= 1,
            "target dimensions must be at least 1x1, got {width}x{height}"
        );

        let key = ScalerKey {
            src_width: frame.width,
            src_height: frame.height,
            src_format: frame.format,
            dst_width: width,
            dst_height: height,
            dst_format: self.config.format,
        };

        let mut scaler = match self.scaler.take() {
            Some(scaler) if scaler.key == key => scaler,
            _ => {
                let scaler = Scaler::new(key)?;
                self.rebuilds += 1;
                scaler
            }
        };

        let result = scaler.run(frame);
        self.scaler = Some(scaler);
        result
    }
}

/**
    Copy every plane of `frame` into `target`, row by row, honoring both strides.
*/
fn copy_planes(frame: &VideoFrame, target: &mut VideoFrameFFmpeg) -> Result<()> {
    let planes = target.planes();
    if frame.planes.len() < planes {
        return Err(Error::invalid_data(format!(
            "{:?} frame needs {planes} planes, got {}",
            frame.format,
            frame.planes.len()
        )));
    }

    for (index, source) in frame.planes.iter().take(planes).enumerate() {
        let rows = target.plane_height(index) as usize;
        let dst_stride = target.stride(index);
        let row_bytes = dst_stride.min(source.stride);

        if rows > 0 && source.data.len() < (rows - 1) * source.stride + row_bytes {
            return Err(Error::invalid_data(format!(
                "plane {index} holds {} bytes, too short for {rows} rows",
                source.data.len()
            )));
        }

        let data = target.data_mut(index);
        for row in 0..rows {
            let src = &source.data[row * source.stride..][..row_bytes];
            data[row * dst_stride..][..row_bytes].copy_from_slice(src);
        }
    }

    Ok(())
}

fn to_ffmpeg(format: PixelFormat) -> Result<Pixel> {
    Ok(match format {
        PixelFormat::Yuv420p => Pixel::YUV420P,
        PixelFormat::Yuvj420p => Pixel::YUVJ420P,
        PixelFormat::Nv12 => Pixel::NV12,
        PixelFormat::Yuv422p => Pixel::YUV422P,
        PixelFormat::Yuv444p => Pixel::YUV444P,
        PixelFormat::Yuv420p10 => Pixel::YUV420P10LE,
        PixelFormat::Bgra => Pixel::BGRA,
        PixelFormat::Rgba => Pixel::RGBA,
        PixelFormat::Rgb24 => Pixel::RGB24,
        PixelFormat::Bgr24 => Pixel::BGR24,
        other => return Err(Error::unsupported_format(format!("{other:?}"))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_from_fn(width: u32, height: u32, f: impl Fn(usize, usize) -> u8) -> VideoFrame {
        let (w, h) = (width as usize, height as usize);
        let (cw, ch) = (w.div_ceil(2), h.div_ceil(2));
        let luma = (0..h).flat_map(|y| (0..w).map(move |x| (x, y))).map(|(x, y)| f(x, y));
        let cb = vec![90u8; cw * ch];
        let cr = vec![160u8; cw * ch];
        VideoFrame::yuv420p(width, height, luma.collect(), cb, cr)
    }

    fn solid(width: u32, height: u32, luma: u8) -> VideoFrame {
        frame_from_fn(width, height, |_, _| luma)
    }

    fn assert_close(actual: u8, expected: u8, what: &str) {
        assert!(
            actual.abs_diff(expected) <= 2,
            "{what}: expected about {expected}, got {actual}"
        );
    }

    #[test]
    fn identity_resize_preserves_pixels() {
        let frame = frame_from_fn(16, 8, |x, y| (x * 12 + y * 7) as u8);
        let mut transform = VideoTransform::new(VideoTransformConfig::default());

        let scaled = transform.transform(&frame, 16, 8).unwrap();

        assert_eq!((scaled.width, scaled.height), (16, 8));
        for y in 0..8 {
            for x in 0..16 {
                let (ey, eu, ev) = frame.yuv_at(x, y);
                let (ay, au, av) = scaled.yuv_at(x, y);
                assert_close(ay, ey, "luma");
                assert_close(au, eu, "cb");
                assert_close(av, ev, "cr");
            }
        }
    }

    #[test]
    fn downscale_produces_target_geometry() {
        let frame = solid(64, 48, 100);
        let mut transform = VideoTransform::new(VideoTransformConfig::default());

        let scaled = transform.transform(&frame, 16, 12).unwrap();

        assert_eq!(scaled.width, 16);
        assert_eq!(scaled.height, 12);
        assert_eq!(scaled.format, PixelFormat::Yuv420p);
        assert_eq!(scaled.planes.len(), 3);
        assert!(scaled.planes[0].stride >= 16);
        assert!(scaled.planes[1].stride >= 8);
        for y in 0..12 {
            for x in 0..16 {
                let (luma, cb, cr) = scaled.yuv_at(x, y);
                assert_close(luma, 100, "luma");
                assert_close(cb, 90, "cb");
                assert_close(cr, 160, "cr");
            }
        }
    }

    #[test]
    fn context_is_reused_for_identical_geometry() {
        let frame = solid(32, 32, 50);
        let mut transform = VideoTransform::new(VideoTransformConfig::default());
        assert_eq!(transform.rebuilds(), 0);

        transform.transform(&frame, 8, 4).unwrap();
        transform.transform(&frame, 8, 4).unwrap();
        assert_eq!(transform.rebuilds(), 1);

        // Terminal resize
        transform.transform(&frame, 10, 4).unwrap();
        assert_eq!(transform.rebuilds(), 2);
        transform.transform(&frame, 10, 4).unwrap();
        assert_eq!(transform.rebuilds(), 2);

        // Source resolution change
        transform.transform(&solid(16, 16, 50), 10, 4).unwrap();
        assert_eq!(transform.rebuilds(), 3);
    }

    #[test]
    fn padded_source_strides_are_honored() {
        let tight = frame_from_fn(8, 4, |x, y| (x * 20 + y) as u8);
        let mut padded = tight.clone();
        for plane in &mut padded.planes {
            let width = plane.stride;
            let padded_stride = width + 24;
            let rows = plane.data.len() / width;
            let mut data = vec![0xEE; padded_stride * rows];
            for row in 0..rows {
                data[row * padded_stride..][..width]
                    .copy_from_slice(&plane.data[row * width..][..width]);
            }
            *plane = Plane::new(data, padded_stride);
        }

        let mut transform = VideoTransform::new(VideoTransformConfig::default());
        let from_tight = transform.transform(&tight, 8, 4).unwrap();
        let from_padded = transform.transform(&padded, 8, 4).unwrap();

        for y in 0..4 {
            for x in 0..8 {
                assert_eq!(from_tight.yuv_at(x, y), from_padded.yuv_at(x, y));
            }
        }
    }

    #[test]
    fn missing_planes_are_invalid_data() {
        let mut frame = solid(8, 8, 10);
        frame.planes.truncate(1);
        let mut transform = VideoTransform::new(VideoTransformConfig::default());

        let result = transform.transform(&frame, 4, 4);
        assert!(matches!(result, Err(Error::InvalidData { .. })));
    }

    #[test]
    #[should_panic(expected = "at least 1x1")]
    fn zero_target_panics() {
        let frame = solid(8, 8, 10);
        let mut transform = VideoTransform::new(VideoTransformConfig::default());
        let _ = transform.transform(&frame, 0, 4);
    }

    #[test]
    fn config_defaults_to_yuv420p() {
        assert_eq!(VideoTransformConfig::default().format, PixelFormat::Yuv420p);
    }
}
