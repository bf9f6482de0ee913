/*!
    Mapping from FFmpeg pixel formats.
*/

use ffmpeg_next::format::Pixel;

use ffmpeg_types::PixelFormat;

/**
    Map an FFmpeg pixel format to the ecosystem's pixel format.

    Returns None for formats the ecosystem does not represent.
*/
pub(crate) fn from_ffmpeg(format: Pixel) -> Option<PixelFormat> {
    Some(match format {
        Pixel::YUV420P => PixelFormat::Yuv420p,
        Pixel::YUVJ420P => PixelFormat::Yuvj420p,
        Pixel::NV12 => PixelFormat::Nv12,
        Pixel::YUV422P => PixelFormat::Yuv422p,
        Pixel::YUV444P => PixelFormat::Yuv444p,
        Pixel::YUV420P10LE => PixelFormat::Yuv420p10,
        Pixel::BGRA => PixelFormat::Bgra,
        Pixel::RGBA => PixelFormat::Rgba,
        Pixel::RGB24 => PixelFormat::Rgb24,
        Pixel::BGR24 => PixelFormat::Bgr24,
        _ => return None,
    })
}
