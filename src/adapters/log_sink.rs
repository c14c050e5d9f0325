//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                min_moisture,
                water_time_secs,
            } => {
                info!(
                    "START | min_moisture={}% water_time={}s",
                    min_moisture, water_time_secs
                );
            }
            AppEvent::SensorsChanged {
                avg_moisture,
                temperature,
            } => {
                info!("SENSE | avg={}% temp={}", avg_moisture, temperature);
            }
            AppEvent::PumpStarted {
                avg_moisture,
                threshold,
            } => {
                info!("PUMP  | on avg={}% threshold={}%", avg_moisture, threshold);
            }
            AppEvent::PumpStopped { ran_secs } => {
                info!("PUMP  | off after {}s", ran_secs);
            }
            AppEvent::ParameterChanged { variable, value } => {
                info!("PARAM | {}={}", variable.name(), value);
            }
        }
    }
}
