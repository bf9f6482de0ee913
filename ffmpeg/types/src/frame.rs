/*!
    Decoded frame types.
*/

use crate::PixelFormat;

/**
    One plane of pixel data.

    Rows are `stride` bytes apart. The stride may exceed the logical row
    width, decoders and scalers pad rows for alignment.
*/
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plane {
    /// Raw sample bytes, `stride * rows` long.
    pub data: Vec<u8>,
    /// Bytes per row.
    pub stride: usize,
}

impl Plane {
    /**
        Create a new plane.
    */
    pub fn new(data: Vec<u8>, stride: usize) -> Self {
        Self { data, stride }
    }

    /**
        Returns the sample at column `x` of row `y`.

        # Panics

        Panics if the position lies outside the plane.
    */
    #[inline]
    pub fn sample(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.stride + x]
    }
}

/**
    A decoded video frame.

    Contains planar pixel data in the layout specified by `format`. Packed
    formats use a single plane; for 4:2:0 formats plane 0 is luma at full
    resolution and planes 1 and 2 are chroma at half resolution in each
    direction.
*/
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoFrame {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Pixel format of the data.
    pub format: PixelFormat,
    /// Pixel data, one entry per plane.
    pub planes: Vec<Plane>,
}

impl VideoFrame {
    /**
        Create a new video frame.
    */
    pub fn new(width: u32, height: u32, format: PixelFormat, planes: Vec<Plane>) -> Self {
        Self {
            width,
            height,
            format,
            planes,
        }
    }

    /**
        Create an empty frame, to be filled in place by a decoder.
    */
    pub fn empty() -> Self {
        Self::new(0, 0, PixelFormat::Yuv420p, Vec::new())
    }

    /**
        Create a tightly packed YUV 4:2:0 frame from its three planes.

        Chroma planes are `ceil(width / 2)` by `ceil(height / 2)` samples.

        # Panics

        Panics if any plane has the wrong number of samples.
    */
    pub fn yuv420p(width: u32, height: u32, luma: Vec<u8>, cb: Vec<u8>, cr: Vec<u8>) -> Self {
        let (w, h) = (width as usize, height as usize);
        let (cw, ch) = (w.div_ceil(2), h.div_ceil(2));
        assert_eq!(luma.len(), w * h, "luma plane size mismatch");
        assert_eq!(cb.len(), cw * ch, "cb plane size mismatch");
        assert_eq!(cr.len(), cw * ch, "cr plane size mismatch");

        Self::new(
            width,
            height,
            PixelFormat::Yuv420p,
            vec![Plane::new(luma, w), Plane::new(cb, cw), Plane::new(cr, cw)],
        )
    }

    /**
        Returns the (Y, U, V) samples covering pixel (`x`, `y`) of a 4:2:0 frame.
    */
    #[inline]
    pub fn yuv_at(&self, x: usize, y: usize) -> (u8, u8, u8) {
        debug_assert!(self.format.is_yuv420());
        (
            self.planes[0].sample(x, y),
            self.planes[1].sample(x / 2, y / 2),
            self.planes[2].sample(x / 2, y / 2),
        )
    }
}

// Frames cross the decoder/renderer boundary
static_assertions::assert_impl_all!(VideoFrame: Send, Sync);
