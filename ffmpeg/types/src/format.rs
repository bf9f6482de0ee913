/*!
    Pixel format types.
*/

/**
    Video pixel formats.

    This is the subset of formats commonly produced by software decoders.
    Not all FFmpeg pixel formats are represented.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    /// Planar YUV 4:2:0, 12bpp (most common video format)
    Yuv420p,
    /// Planar YUV 4:2:0, 12bpp, full (JPEG) range
    Yuvj420p,
    /// Semi-planar YUV 4:2:0, 12bpp (common hardware decoder output)
    Nv12,
    /// Planar YUV 4:2:2, 16bpp
    Yuv422p,
    /// Planar YUV 4:4:4, 24bpp
    Yuv444p,
    /// Planar YUV 4:2:0, 10-bit little endian (HDR content)
    Yuv420p10,
    /// Packed BGRA, 32bpp
    Bgra,
    /// Packed RGBA, 32bpp
    Rgba,
    /// Packed RGB, 24bpp
    Rgb24,
    /// Packed BGR, 24bpp
    Bgr24,
}

impl PixelFormat {
    /**
        Returns true for three-plane 8-bit 4:2:0 layouts, where both chroma
        planes are subsampled by two in each direction.
    */
    pub const fn is_yuv420(self) -> bool {
        matches!(self, Self::Yuv420p | Self::Yuvj420p)
    }
}
