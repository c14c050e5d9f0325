//! System configuration parameters
//!
//! Boot-time settings for the irrigation controller. Nothing here is
//! persisted: the two runtime-tunable parameters (moisture threshold and
//! watering time) start from these values and live in RAM afterwards.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sensors::MAX_SOIL_SENSORS;

/// Highest accepted moisture threshold (percent).
pub const MAX_MIN_MOISTURE: u8 = 99;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrrigationConfig {
    // --- Sensors ---
    /// Number of soil-moisture channels sampled each tick (1..=8)
    pub soil_sensor_count: u8,
    /// Full-scale raw ADC reading
    pub adc_max_raw: u16,

    // --- Watering policy ---
    /// Average moisture (%) at or below which the pump starts
    pub min_moisture_percent: u8,
    /// Minimum pump run time once started (seconds)
    pub water_time_secs: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds)
    pub control_loop_interval_ms: u32,
}

impl Default for IrrigationConfig {
    fn default() -> Self {
        Self {
            soil_sensor_count: 5,
            adc_max_raw: 1023, // 10-bit full scale

            min_moisture_percent: 50,
            water_time_secs: 30,

            control_loop_interval_ms: 1000, // 1 Hz
        }
    }
}

impl IrrigationConfig {
    /// Reject out-of-range values. Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.soil_sensor_count == 0 || self.soil_sensor_count as usize > MAX_SOIL_SENSORS {
            return Err(ConfigError::ValidationFailed("soil_sensor_count must be 1..=8"));
        }
        if self.adc_max_raw == 0 {
            return Err(ConfigError::ValidationFailed("adc_max_raw must be > 0"));
        }
        if self.min_moisture_percent > MAX_MIN_MOISTURE {
            return Err(ConfigError::ValidationFailed("min_moisture_percent must be 0..=99"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("control_loop_interval_ms must be > 0"));
        }
        Ok(())
    }
}
