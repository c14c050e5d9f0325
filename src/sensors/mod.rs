//! Sensor subsystem — the [`SensorSampler`] and the snapshot it maintains.
//!
//! The sampler reads every soil channel and the temperature channel through
//! the [`SensorPort`], calibrates the raw values and keeps the last
//! calibrated reading of each. It reports a change only when at least one
//! calibrated value actually moved, which is what the controller debounces
//! on.

pub mod calibration;

use heapless::Vec;
use log::debug;
use serde::Serialize;

use crate::app::ports::SensorPort;
use calibration::Calibration;

/// Upper bound on soil channels a board may wire up.
pub const MAX_SOIL_SENSORS: usize = 8;

/// The latest calibrated reading of every sensor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SensorSnapshot {
    /// Soil moisture per channel, 0–100 %.
    pub moistures: Vec<u8, MAX_SOIL_SENSORS>,
    /// Calibrated temperature, 15–150.
    pub temperature: u8,
    /// Floor of the mean of `moistures`.
    pub avg_moisture: u8,
}

impl SensorSnapshot {
    /// A zeroed snapshot for `channels` soil probes.
    pub fn zeroed(channels: usize) -> Self {
        let mut moistures = Vec::new();
        for _ in 0..channels.min(MAX_SOIL_SENSORS) {
            // Capacity checked by the `min` above.
            let _ = moistures.push(0);
        }
        Self {
            moistures,
            temperature: 0,
            avg_moisture: 0,
        }
    }
}

/// Floor of the arithmetic mean. An empty set averages to 0.
pub fn average_moisture(values: &[u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let sum: u32 = values.iter().map(|&v| v as u32).sum();
    (sum / values.len() as u32) as u8
}

/// Reads, calibrates and change-detects the soil and temperature channels.
///
/// Hardware reads are assumed infallible (see [`SensorPort`]).
pub struct SensorSampler {
    moisture_cal: Calibration,
    temperature_cal: Calibration,
    snapshot: SensorSnapshot,
}

impl SensorSampler {
    /// `channels` is clamped to [`MAX_SOIL_SENSORS`]; callers validate it
    /// through `IrrigationConfig::validate` first.
    pub fn new(channels: usize, adc_max_raw: u16) -> Self {
        Self {
            moisture_cal: Calibration::moisture(adc_max_raw),
            temperature_cal: Calibration::temperature(adc_max_raw),
            snapshot: SensorSnapshot::zeroed(channels),
        }
    }

    /// Sample every channel once.
    ///
    /// Returns the updated snapshot and whether any calibrated value
    /// differs from the previous sample.
    pub fn sample(&mut self, hw: &mut impl SensorPort) -> (SensorSnapshot, bool) {
        let mut changed = false;

        for (channel, stored) in self.snapshot.moistures.iter_mut().enumerate() {
            let value = self.moisture_cal.apply(hw.read_soil_raw(channel)) as u8;
            if *stored != value {
                *stored = value;
                changed = true;
            }
        }
        self.snapshot.avg_moisture = average_moisture(&self.snapshot.moistures);

        let temperature = self.temperature_cal.apply(hw.read_temperature_raw()) as u8;
        if self.snapshot.temperature != temperature {
            self.snapshot.temperature = temperature;
            changed = true;
        }

        if changed {
            debug!(
                "sensors: moistures={:?} avg={} temp={}",
                self.snapshot.moistures.as_slice(),
                self.snapshot.avg_moisture,
                self.snapshot.temperature
            );
        }

        (self.snapshot.clone(), changed)
    }

    /// Last stored snapshot, without touching the hardware.
    pub fn snapshot(&self) -> &SensorSnapshot {
        &self.snapshot
    }

    /// Number of soil channels sampled.
    pub fn channel_count(&self) -> usize {
        self.snapshot.moistures.len()
    }
}
