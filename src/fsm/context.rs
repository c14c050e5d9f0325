//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: the current monotonic time, the latest sensor snapshot and
//! the irrigation state block (pump flag, timer, tunable parameters).

use crate::sensors::SensorSnapshot;

// ---------------------------------------------------------------------------
// Irrigation state (pump + tunable parameters)
// ---------------------------------------------------------------------------

/// Pump state and the two runtime-tunable parameters.
///
/// `pump_on` and `timer_start_ms` are written by the state handlers only;
/// `min_moisture` and `water_time_secs` are written by `set` commands only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IrrigationState {
    /// Pump relay is energised.
    pub pump_on: bool,
    /// When the pump was last switched on. Meaningful only while `pump_on`.
    pub timer_start_ms: u64,
    /// Average moisture (%) at or below which watering starts.
    pub min_moisture: u8,
    /// Minimum run time of a watering cycle (seconds).
    pub water_time_secs: u32,
}

impl IrrigationState {
    pub fn new(min_moisture: u8, water_time_secs: u32) -> Self {
        Self {
            pump_on: false,
            timer_start_ms: 0,
            min_moisture,
            water_time_secs,
        }
    }

    /// Milliseconds since the pump was switched on (0 while idle).
    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        if self.pump_on {
            now_ms.saturating_sub(self.timer_start_ms)
        } else {
            0
        }
    }

    /// `true` while the pump runs and its minimum run time has not elapsed.
    pub fn window_open(&self, now_ms: u64) -> bool {
        self.pump_on && self.elapsed_ms(now_ms) < u64::from(self.water_time_secs) * 1000
    }

    /// Whole seconds of watering left; 0 when idle or overdue.
    pub fn time_left_secs(&self, now_ms: u64) -> u32 {
        if !self.pump_on {
            return 0;
        }
        let elapsed_secs = self.elapsed_ms(now_ms) / 1000;
        u64::from(self.water_time_secs).saturating_sub(elapsed_secs) as u32
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    /// Monotonic time of the current tick (ms).
    pub now_ms: u64,
    /// Latest calibrated sensor readings.
    pub sensors: SensorSnapshot,
    /// Whether `sensors` differs from the previous sample.
    pub sensors_changed: bool,
    /// Pump flag, timer and parameters.
    pub irrigation: IrrigationState,
}

impl FsmContext {
    pub fn new(irrigation: IrrigationState, sensors: SensorSnapshot) -> Self {
        Self {
            now_ms: 0,
            sensors,
            sensors_changed: false,
            irrigation,
        }
    }
}
