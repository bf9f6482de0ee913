/*!
    Terminal frame painter.
*/

use std::io::{self, Write};

use ffmpeg_types::VideoFrame;

use super::quantize;

const RESET: &[u8] = b"\x1b[0m";
const RESET_SHORT: &[u8] = b"\x1b[m";
const CURSOR_UP: &[u8] = b"\x1b[F";

/**
    Paints 4:2:0 frames onto a terminal, one background-colored space per pixel.

    Output for a frame is assembled in a reusable buffer and written with a
    single call, then flushed.
*/
pub struct FrameRenderer<W: Write> {
    out: W,
    buffer: Vec<u8>,
    frames: u64,
}

impl<W: Write> FrameRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buffer: Vec::new(),
            frames: 0,
        }
    }

    #[cfg(test)]
    /**
        Number of frames painted so far.
    */
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /**
        Prepare to paint the next frame.

        For every frame but the first, moves the cursor up `redraw_lines`
        lines so the next frame lands on top of the previous one. Must be
        called before [`render`](Self::render).
    */
    pub fn begin_frame(&mut self, redraw_lines: u32) -> io::Result<()> {
        if self.frames == 0 {
            return Ok(());
        }
        for _ in 0..redraw_lines {
            self.out.write_all(CURSOR_UP)?;
        }
        Ok(())
    }

    /**
        Paint a frame, row by row, and flush.

        Chroma is sampled at half resolution in both directions. Every row
        but the last ends with a reset and a newline, so the cursor stays on
        the last row of the frame afterwards.
    */
    pub fn render(&mut self, frame: &VideoFrame) -> io::Result<()> {
        if !frame.format.is_yuv420() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot render {:?} frames", frame.format),
            ));
        }

        let (width, height) = (frame.width as usize, frame.height as usize);

        self.buffer.clear();
        for y in 0..height {
            for x in 0..width {
                let (luma, cb, cr) = frame.yuv_at(x, y);
                write!(self.buffer, "\x1b[48;5;{}m ", quantize(luma, cb, cr))?;
            }
            self.buffer.extend_from_slice(RESET);
            if y + 1 < height {
                self.buffer.push(b'\n');
            }
        }
        self.buffer.extend_from_slice(RESET_SHORT);

        self.out.write_all(&self.buffer)?;
        self.out.flush()?;
        self.frames += 1;
        Ok(())
    }

    /**
        Write text below the current frame, such as a status line, and flush.
    */
    pub fn write_status(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    /**
        Leave the cursor on a fresh line below the last frame.
    */
    pub fn finish(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    #[cfg(test)]
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use ffmpeg_types::{Plane, PixelFormat};

    use super::*;

    fn solid(width: u32, height: u32, luma: u8) -> VideoFrame {
        let (w, h) = (width as usize, height as usize);
        let chroma = w.div_ceil(2) * h.div_ceil(2);
        VideoFrame::yuv420p(width, height, vec![luma; w * h], vec![128; chroma], vec![128; chroma])
    }

    fn output(renderer: &FrameRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.get_ref().clone()).unwrap()
    }

    #[test]
    fn renders_one_cell_per_pixel() {
        let mut renderer = FrameRenderer::new(Vec::new());
        renderer.render(&solid(2, 2, 0)).unwrap();

        assert_eq!(
            output(&renderer),
            concat!(
                "\x1b[48;5;16m \x1b[48;5;16m \x1b[0m\n",
                "\x1b[48;5;16m \x1b[48;5;16m \x1b[0m\x1b[m",
            )
        );
        assert_eq!(renderer.frames(), 1);
    }

    #[test]
    fn samples_chroma_at_half_resolution() {
        // 4x2 luma, 2x1 chroma: left half neutral, right half strong blue
        let frame = VideoFrame::yuv420p(4, 2, vec![255; 8], vec![128, 255], vec![128, 128]);
        let mut renderer = FrameRenderer::new(Vec::new());
        renderer.render(&frame).unwrap();

        let white = quantize(255, 128, 128);
        let tinted = quantize(255, 255, 128);
        assert_ne!(white, tinted);

        let row = format!(
            "\x1b[48;5;{white}m \x1b[48;5;{white}m \x1b[48;5;{tinted}m \x1b[48;5;{tinted}m \x1b[0m"
        );
        assert_eq!(output(&renderer), format!("{row}\n{row}\x1b[m"));
    }

    #[test]
    fn honors_plane_strides() {
        let mut frame = solid(2, 1, 0);
        frame.planes[0] = Plane::new(vec![0, 255, 9, 9], 4);
        let mut renderer = FrameRenderer::new(Vec::new());
        renderer.render(&frame).unwrap();

        assert_eq!(
            output(&renderer),
            format!(
                "\x1b[48;5;16m \x1b[48;5;{}m \x1b[0m\x1b[m",
                quantize(255, 128, 128)
            )
        );
    }

    #[test]
    fn first_frame_is_not_repositioned() {
        let mut renderer = FrameRenderer::new(Vec::new());
        renderer.begin_frame(3).unwrap();
        assert!(renderer.get_ref().is_empty());
    }

    #[test]
    fn later_frames_move_the_cursor_up_first() {
        let mut renderer = FrameRenderer::new(Vec::new());
        renderer.begin_frame(2).unwrap();
        renderer.render(&solid(1, 3, 0)).unwrap();
        let first = renderer.get_ref().len();

        renderer.begin_frame(2).unwrap();
        renderer.render(&solid(1, 3, 0)).unwrap();

        let second = &output(&renderer)[first..];
        assert!(second.starts_with("\x1b[F\x1b[F\x1b[48;5;"));
        assert_eq!(second.matches("\x1b[F").count(), 2);
        assert_eq!(renderer.frames(), 2);
    }

    #[test]
    fn finish_adds_a_trailing_newline() {
        let mut renderer = FrameRenderer::new(Vec::new());
        renderer.render(&solid(1, 1, 0)).unwrap();
        renderer.finish().unwrap();
        assert!(output(&renderer).ends_with("\x1b[0m\x1b[m\n"));
    }

    #[test]
    fn rejects_packed_frames() {
        let frame = VideoFrame::new(1, 1, PixelFormat::Rgba, vec![Plane::new(vec![0; 4], 4)]);
        let mut renderer = FrameRenderer::new(Vec::new());
        let err = renderer.render(&frame).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
