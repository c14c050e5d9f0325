//! Outbound application events.
//!
//! The [`IrrigationController`](super::service::IrrigationController) and
//! the [`CommandInterpreter`](super::interpreter::CommandInterpreter) emit
//! these through the [`EventSink`](super::ports::EventSink) port.

use core::fmt;

use heapless::Vec;
use serde::Serialize;

use super::commands::Variable;
use crate::sensors::MAX_SOIL_SENSORS;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has started (carries the initial parameters).
    Started { min_moisture: u8, water_time_secs: u32 },

    /// A sample differed from the previous one.
    SensorsChanged { avg_moisture: u8, temperature: u8 },

    /// Average moisture fell to the threshold; the pump was switched on.
    PumpStarted { avg_moisture: u8, threshold: u8 },

    /// The watering window elapsed; the pump was switched off.
    PumpStopped { ran_secs: u64 },

    /// A `set` command changed a parameter.
    ParameterChanged { variable: Variable, value: u32 },
}

/// A point-in-time status snapshot, rendered by the `log` command.
///
/// `Display` produces the wire payload, which is also valid JSON:
///
/// ```text
/// { "temperature": 80, "moistures": [55, 61], "avg_moisture": 58, "pump_on": false, "time_left": 0, "min_moisture": 50, "water_time": 30 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub temperature: u8,
    pub moistures: Vec<u8, MAX_SOIL_SENSORS>,
    pub avg_moisture: u8,
    pub pump_on: bool,
    pub time_left: u32,
    pub min_moisture: u8,
    pub water_time: u32,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ \"temperature\": {}, \"moistures\": [", self.temperature)?;
        for (i, m) in self.moistures.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", m)?;
        }
        write!(
            f,
            "], \"avg_moisture\": {}, \"pump_on\": {}, \"time_left\": {}, \
             \"min_moisture\": {}, \"water_time\": {} }}",
            self.avg_moisture, self.pump_on, self.time_left, self.min_moisture, self.water_time
        )
    }
}
