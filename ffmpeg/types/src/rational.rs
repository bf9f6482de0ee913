/*!
    Rational number type for time bases and frame rates.
*/

use std::fmt;

/**
    A rational number represented as a numerator and denominator.

    Used for time bases (e.g., 1/90000 for MPEG-TS) and frame rates
    (e.g., 24000/1001 for 23.976 fps). Values read from containers are not
    validated, so a zero or negative rational can show up in stream metadata.
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    pub num: i32,
    pub den: i32,
}

impl Rational {
    /**
        Create a new rational number.

        # Panics

        Panics if `den` is zero.
    */
    #[inline]
    pub const fn new(num: i32, den: i32) -> Self {
        assert!(den != 0, "denominator cannot be zero");
        Self { num, den }
    }

    /**
        Convert to f64.
    */
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.num as f64 / self.den as f64
    }

    /**
        Returns true if both numerator and denominator are strictly positive.

        Stream metadata uses 0/0 or 0/1 for "unknown", which this rejects.
    */
    #[inline]
    pub const fn is_positive(self) -> bool {
        self.num > 0 && self.den > 0
    }

    /**
        Invert the rational (swap numerator and denominator).

        # Panics

        Panics if numerator is zero.
    */
    #[inline]
    pub const fn invert(self) -> Self {
        assert!(self.num != 0, "cannot invert zero");
        Self {
            num: self.den,
            den: self.num,
        }
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "denominator cannot be zero")]
    fn zero_denominator_panics() {
        Rational::new(1, 0);
    }

    #[test]
    fn common_time_bases_as_seconds() {
        assert_eq!(Rational::new(1, 1000).to_f64(), 0.001);
        assert_eq!(Rational::new(1, 2).to_f64(), 0.5);
        assert!((Rational::new(1001, 30000).to_f64() - 0.033_366).abs() < 1e-6);
    }

    #[test]
    fn frame_rate_inverts_to_frame_duration() {
        let rate = Rational::new(24000, 1001);
        assert_eq!(rate.invert(), Rational::new(1001, 24000));
        assert_eq!(rate.invert().invert(), rate);
    }

    #[test]
    #[should_panic(expected = "cannot invert zero")]
    fn unknown_rate_cannot_be_inverted() {
        Rational::new(0, 1).invert();
    }

    #[test]
    fn unknown_rates_are_not_positive() {
        assert!(Rational::new(30000, 1001).is_positive());
        assert!(!Rational::new(0, 1).is_positive());
        assert!(!Rational::new(-1, 25).is_positive());
        assert!(!Rational { num: 0, den: 0 }.is_positive());
        assert!(!Rational { num: 25, den: -1 }.is_positive());
    }

    #[test]
    fn formats_as_fraction() {
        assert_eq!(Rational::new(1, 12800).to_string(), "1/12800");
        assert_eq!(format!("{:?}", Rational::new(25, 1)), "25/1");
    }
}
