//! Clamped linear value scale.

use crate::error::{GaugeError, Result};
use serde::{Deserialize, Serialize};

/// Maps a value domain onto a vertical pixel range.
///
/// Values outside the domain clamp to the nearest bound. The range runs from
/// `+half` at `min` to `-half` at `max`, so larger values sit higher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    min: f64,
    max: f64,
    start: f64,
    end: f64,
}

impl LinearScale {
    /// Create a scale from `[min, max]` to `[start, end]`.
    pub fn new(min: f64, max: f64, start: f64, end: f64) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return Err(GaugeError::config(format!(
                "scale domain [{min}, {max}] is empty"
            )));
        }
        Ok(Self {
            min,
            max,
            start,
            end,
        })
    }

    /// Scale for a fill area of `inner_height` with a wave of `amplitude`.
    ///
    /// The range is `[(h + A) / 2, -(h + A) / 2]`.
    pub fn for_fill(min: f64, max: f64, inner_height: f32, amplitude: f32) -> Result<Self> {
        let half = (f64::from(inner_height) + f64::from(amplitude)) / 2.0;
        Self::new(min, max, half, -half)
    }

    /// Map a value to its pixel offset.
    ///
    /// NaN maps to the start of the range.
    #[must_use]
    pub fn map(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.start;
        }
        let clamped = value.clamp(self.min, self.max);
        let t = (clamped - self.min) / (self.max - self.min);
        (self.end - self.start).mul_add(t, self.start)
    }

    /// Domain bounds.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Range endpoints.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        (self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fill_scale() -> LinearScale {
        LinearScale::for_fill(0.0, 100.0, 200.0, 3.0).unwrap()
    }

    #[test]
    fn test_endpoints() {
        let scale = fill_scale();
        assert_eq!(scale.map(0.0), 101.5);
        assert_eq!(scale.map(100.0), -101.5);
        assert_eq!(scale.range(), (101.5, -101.5));
    }

    #[test]
    fn test_fifty_five_percent() {
        let scale = fill_scale();
        assert!((scale.map(55.0) - (-10.15)).abs() < 1e-9);
    }

    #[test]
    fn test_clamps_out_of_domain() {
        let scale = fill_scale();
        assert_eq!(scale.map(-40.0), scale.map(0.0));
        assert_eq!(scale.map(1e9), scale.map(100.0));
        assert_eq!(scale.map(f64::NAN), 101.5);
    }

    #[test]
    fn test_rejects_empty_domain() {
        assert!(LinearScale::new(5.0, 5.0, 1.0, -1.0).is_err());
        assert!(LinearScale::new(10.0, 0.0, 1.0, -1.0).is_err());
        assert!(LinearScale::new(0.0, f64::INFINITY, 1.0, -1.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_clamped_below_and_above(v in -1e6f64..1e6) {
            let scale = fill_scale();
            if v < 0.0 {
                prop_assert_eq!(scale.map(v), scale.map(0.0));
            }
            if v > 100.0 {
                prop_assert_eq!(scale.map(v), scale.map(100.0));
            }
        }

        #[test]
        fn prop_monotonically_non_increasing(a in -50f64..150.0, b in -50f64..150.0) {
            let scale = fill_scale();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(scale.map(lo) >= scale.map(hi));
        }
    }
}
