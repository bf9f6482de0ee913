/*!
    The playback loop.
*/

use std::io::Write;
use std::time::Duration;

use crate::config::RenderConfig;
use crate::context::PlaybackContext;
use crate::error::PlaybackError;
use crate::render::FrameRenderer;
use crate::terminal::TerminalProbe;

use super::pacing::PaceOutcome;
use super::{FrameScaler, FrameSource, PacingScheduler};

/**
    Drives decoding, scaling, painting and pacing, one frame at a time.

    Each iteration pulls a frame, resolves the target size (so terminal
    resizes apply to the next frame), repositions the cursor, scales,
    paints and then waits out the rest of the frame. Cancellation is
    checked only between frames, so the frame in flight always completes.
*/
pub struct PlaybackController<'a, W: Write> {
    ctx: &'a PlaybackContext,
    config: &'a RenderConfig,
    probe: &'a dyn TerminalProbe,
    renderer: FrameRenderer<W>,
    pacing: PacingScheduler,
}

impl<'a, W: Write> PlaybackController<'a, W> {
    pub fn new(
        ctx: &'a PlaybackContext,
        config: &'a RenderConfig,
        probe: &'a dyn TerminalProbe,
        pacing: PacingScheduler,
        out: W,
    ) -> Self {
        Self {
            ctx,
            config,
            probe,
            renderer: FrameRenderer::new(out),
            pacing,
        }
    }

    /**
        Play `source` until it runs out or playback is cancelled.

        Returns the number of frames shown. On success the cursor is left
        on a fresh line below the picture and late frames are summarized in
        the log. Errors abort immediately.
    */
    pub fn run<S, C>(&mut self, source: &mut S, scaler: &mut C) -> Result<u64, PlaybackError>
    where
        S: FrameSource + ?Sized,
        C: FrameScaler + ?Sized,
    {
        let verbose = self.config.verbose;
        let name = self.config.display_name();
        let mut frames: u64 = 0;
        let mut missed: u64 = 0;
        let mut worst = Duration::ZERO;

        while !self.ctx.is_cancelled() {
            let window = self.pacing.begin();

            let Some(frame) = source.next_frame().map_err(PlaybackError::Decode)? else {
                break;
            };
            self.ctx.log(format_args!(
                "Took {} ms to decode",
                window.start().elapsed().as_millis()
            ));

            let target = self.config.resolve(self.probe)?;
            if verbose {
                self.ctx.log(format_args!("Rendering frame {frames}"));
            }

            self.renderer.begin_frame(target.redraw_lines())?;

            let (width, height) = (target.width, target.render_height());
            self.ctx.log(format_args!("Scaling to dims {width}, {height}"));
            let scaled = scaler
                .scale(frame, width, height)
                .map_err(PlaybackError::Scale)?;
            self.renderer.render(&scaled)?;

            if let PaceOutcome::Missed(late) = self.pacing.pace(window, &self.ctx.logger) {
                missed += 1;
                worst = worst.max(late);
            }
            frames += 1;

            if verbose {
                self.ctx.log(format_args!("Rendered frame {}", frames - 1));
                let actual = 1.0 / window.start().elapsed().as_secs_f64();
                self.renderer.write_status(&format!(
                    "\n file: {name} | fps (desired): {:.6} | fps (actual): {actual:.6}",
                    self.pacing.frames_per_second()
                ))?;
            }
        }

        self.renderer.finish()?;
        if missed > 0 {
            self.ctx.log(format_args!(
                "Missed {missed} of {frames} frames, worst by {}ms",
                worst.as_millis()
            ));
        }
        self.ctx.log("Finished displaying");
        Ok(frames)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.renderer.into_inner()
    }
}
