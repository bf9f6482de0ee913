/*!
    Tick counts in stream time base units.
*/

use std::time::Duration;

use crate::Rational;

/**
    Duration in time_base units.

    A raw tick count from the media stream. To convert it to a wall-clock
    duration, you need the stream's time base.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaDuration(pub i64);

impl MediaDuration {
    /**
        Convert this duration to a std Duration using the given time base.

        Negative values and negative time bases are clamped to zero.
    */
    #[inline]
    pub fn to_duration(self, time_base: Rational) -> Duration {
        if self.0 <= 0 {
            return Duration::ZERO;
        }
        let seconds = self.0 as f64 * time_base.to_f64();
        Duration::from_secs_f64(seconds.max(0.0))
    }
}
