//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to            |
//! |------------|---------------|------------------------|
//! | `hardware` | SensorPort    | ESP32 ADC1 one-shot    |
//! |            | ActuatorPort  | Pump relay GPIO        |
//! | `log_sink` | EventSink     | Serial log output      |
//! | `time`     | ClockPort     | ESP32 system timer     |

pub mod hardware;
pub mod log_sink;
pub mod time;
