/*!
    Frame pacing.

    Sleeping alone is too coarse to hit frame deadlines, the scheduler may
    wake a thread several milliseconds late. Each frame therefore sleeps
    until shortly before its deadline and busy-waits the rest.
*/

use std::hint;
use std::thread;
use std::time::{Duration, Instant};

use ffmpeg_types::FrameTiming;

use crate::logger::Logger;

/**
    Time left for busy-waiting at the end of each frame.
*/
pub const DEFAULT_SPIN_GUARD: Duration = Duration::from_millis(2);

/**
    Start of one frame's time slot, taken before the frame is decoded.
*/
#[derive(Clone, Copy, Debug)]
pub struct FrameWindow {
    start: Instant,
}

impl FrameWindow {
    pub fn start(&self) -> Instant {
        self.start
    }
}

/**
    Result of waiting out a frame window.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaceOutcome {
    /// The window ended on time.
    OnTime,
    /// The frame's work alone overran the window by this much.
    Missed(Duration),
}

/**
    Holds each frame on screen for the stream's ideal frame duration.

    Late frames are reported, never skipped or made up for.
*/
#[derive(Clone, Copy, Debug)]
pub struct PacingScheduler {
    ideal: Duration,
    spin_guard: Duration,
}

impl PacingScheduler {
    /**
        Create a scheduler for the given stream timing.
    */
    pub fn new(timing: &FrameTiming) -> Self {
        Self::with_ideal(ideal_frame_duration(timing))
    }

    /**
        Create a scheduler with a fixed frame duration.
    */
    pub fn with_ideal(ideal: Duration) -> Self {
        Self {
            ideal,
            spin_guard: DEFAULT_SPIN_GUARD,
        }
    }

    #[cfg(test)]
    pub fn with_spin_guard(mut self, spin_guard: Duration) -> Self {
        self.spin_guard = spin_guard;
        self
    }

    #[cfg(test)]
    pub fn ideal_frame_duration(&self) -> Duration {
        self.ideal
    }

    /**
        Frames per second this scheduler paces to.
    */
    pub fn frames_per_second(&self) -> f64 {
        let seconds = self.ideal.as_secs_f64();
        if seconds > 0.0 { 1.0 / seconds } else { 0.0 }
    }

    /**
        Open the window for a new frame, starting now.
    */
    pub fn begin(&self) -> FrameWindow {
        FrameWindow {
            start: Instant::now(),
        }
    }

    /**
        Block until the window ends.

        Sleeps until `spin_guard` before the end, then spins. If the end has
        already passed, logs how late the frame is and returns immediately.
    */
    pub fn pace(&self, window: FrameWindow, logger: &Logger) -> PaceOutcome {
        let end = window.start + self.ideal;
        let wake = window.start + self.ideal.saturating_sub(self.spin_guard);

        let now = Instant::now();
        if now > end {
            let late = now - end;
            logger.log(format_args!("Missed frame by {}ms", late.as_millis()));
            return PaceOutcome::Missed(late);
        }

        if now < wake {
            thread::sleep(wake - now);
        }
        while Instant::now() < end {
            hint::spin_loop();
        }

        PaceOutcome::OnTime
    }
}

/**
    Duration of one frame: the time base times the ticks per frame, with
    fewer than one tick counted as one.
*/
pub fn ideal_frame_duration(timing: &FrameTiming) -> Duration {
    timing.frame_duration()
}

#[cfg(test)]
mod tests {
    use ffmpeg_types::Rational;

    use super::*;

    fn missed(logger: &Logger) -> usize {
        logger
            .lines()
            .iter()
            .filter(|line| line.contains("Missed frame by"))
            .count()
    }

    #[test]
    fn ideal_duration_from_timing() {
        let timing = FrameTiming::new(Rational::new(1, 1000), 33);
        assert_eq!(ideal_frame_duration(&timing), Duration::from_millis(33));

        let timing = FrameTiming::new(Rational::new(1, 30), 0);
        let scheduler = PacingScheduler::new(&timing);
        let expected = Duration::from_secs(1) / 30;
        assert!(scheduler.ideal_frame_duration().abs_diff(expected) < Duration::from_micros(1));
        assert!((scheduler.frames_per_second() - 30.0).abs() < 1e-6);
    }

    #[test]
    fn waits_out_the_rest_of_the_frame() {
        let logger = Logger::new();
        let scheduler = PacingScheduler::with_ideal(Duration::from_millis(33));

        let window = scheduler.begin();
        thread::sleep(Duration::from_millis(5));
        let outcome = scheduler.pace(window, &logger);

        assert_eq!(outcome, PaceOutcome::OnTime);
        assert!(window.start().elapsed() >= Duration::from_millis(33));
        assert_eq!(missed(&logger), 0);
    }

    #[test]
    fn spin_phase_reaches_the_exact_end() {
        let logger = Logger::new();
        // A guard longer than the frame means no sleeping at all
        let scheduler = PacingScheduler::with_ideal(Duration::from_millis(3))
            .with_spin_guard(Duration::from_millis(10));

        let window = scheduler.begin();
        assert_eq!(scheduler.pace(window, &logger), PaceOutcome::OnTime);
        assert!(window.start().elapsed() >= Duration::from_millis(3));
    }

    #[test]
    fn late_frames_are_reported_not_delayed() {
        let logger = Logger::new();
        let scheduler = PacingScheduler::with_ideal(Duration::from_millis(33));

        let window = scheduler.begin();
        thread::sleep(Duration::from_millis(40));
        let before = Instant::now();
        let outcome = scheduler.pace(window, &logger);

        assert!(matches!(outcome, PaceOutcome::Missed(late) if late >= Duration::from_millis(7)));
        assert!(before.elapsed() < Duration::from_millis(5));
        assert_eq!(missed(&logger), 1);
    }
}
