//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Reads the soil and temperature probes through the ADC1 one-shot unit
//! and drives the pump relay through [`PumpDriver`]. This is the only
//! module in the system that touches actual hardware. On non-espidf
//! targets the ADC reads come from the simulation table in
//! [`hw_init`](crate::drivers::hw_init).

use embedded_hal::digital::OutputPin;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::hw_init;
use crate::drivers::pump::PumpDriver;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P: OutputPin> {
    soil_channels: &'static [u32],
    temp_channel: u32,
    pump: PumpDriver<P>,
}

impl<P: OutputPin> HardwareAdapter<P> {
    /// `soil_channels[i]` is the ADC1 channel wired to soil probe `i`.
    pub fn new(soil_channels: &'static [u32], temp_channel: u32, pump: PumpDriver<P>) -> Self {
        Self {
            soil_channels,
            temp_channel,
            pump,
        }
    }

    pub fn pump(&self) -> &PumpDriver<P> {
        &self.pump
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P: OutputPin> SensorPort for HardwareAdapter<P> {
    fn read_soil_raw(&mut self, channel: usize) -> u16 {
        // Unwired probes read as fully wet (raw 0).
        self.soil_channels
            .get(channel)
            .map_or(0, |&adc| hw_init::adc1_read(adc))
    }

    fn read_temperature_raw(&mut self) -> u16 {
        hw_init::adc1_read(self.temp_channel)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<P: OutputPin> ActuatorPort for HardwareAdapter<P> {
    fn set_pump(&mut self, on: bool) {
        self.pump.set(on);
    }
}
