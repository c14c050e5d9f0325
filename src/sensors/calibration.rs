//! Integer linear rescaling of raw ADC readings.
//!
//! Implements the classic microcontroller `map()`:
//!
//! ```text
//! out = (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
//! ```
//!
//! with integer division truncating toward zero. An inverted output range
//! (`out_min > out_max`) flips the polarity, which is how the soil probes
//! are read: a higher raw voltage means drier soil.

/// A raw-to-calibrated linear mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    raw_min: i32,
    raw_max: i32,
    out_min: i32,
    out_max: i32,
}

impl Calibration {
    /// Soil moisture percentage: `0..=adc_max` maps to `100..=0`.
    pub const fn moisture(adc_max: u16) -> Self {
        Self::new(0, adc_max as i32, 100, 0)
    }

    /// Temperature channel: `0..=adc_max` maps to `15..=150`.
    pub const fn temperature(adc_max: u16) -> Self {
        Self::new(0, adc_max as i32, 15, 150)
    }

    /// Build a mapping. `raw_max` must differ from `raw_min`.
    pub const fn new(raw_min: i32, raw_max: i32, out_min: i32, out_max: i32) -> Self {
        Self {
            raw_min,
            raw_max,
            out_min,
            out_max,
        }
    }

    /// Rescale `raw` into the calibrated range.
    ///
    /// Readings beyond the raw span are clamped to it first, so the result
    /// always lies between `out_min` and `out_max`.
    pub fn apply(&self, raw: u16) -> i32 {
        let (lo, hi) = if self.raw_min <= self.raw_max {
            (self.raw_min, self.raw_max)
        } else {
            (self.raw_max, self.raw_min)
        };
        let x = (raw as i32).clamp(lo, hi);
        (x - self.raw_min) * (self.out_max - self.out_min) / (self.raw_max - self.raw_min)
            + self.out_min
    }
}
