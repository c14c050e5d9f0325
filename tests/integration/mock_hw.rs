//! Mock hardware adapter for integration tests.
//!
//! Serves injectable raw ADC readings and records every pump command so
//! tests can assert on the full actuator history without touching real
//! GPIO or ADC registers.

use std::cell::Cell;

use greenhouse::app::events::AppEvent;
use greenhouse::app::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};

/// Raw reading of a bone-dry probe at 10-bit full scale (0 % moisture).
pub const DRY: u16 = 1023;
/// Raw reading of a saturated probe (100 % moisture).
pub const WET: u16 = 0;
/// Raw reading that maps to exactly 50 % moisture.
pub const HALF: u16 = 512;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub soil_raw: Vec<u16>,
    pub temperature_raw: u16,
    /// Every `set_pump` argument, in call order.
    pub pump_calls: Vec<bool>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(channels: usize) -> Self {
        Self {
            soil_raw: vec![WET; channels],
            temperature_raw: 0,
            pump_calls: Vec::new(),
        }
    }

    /// Set every soil probe to the same raw value.
    pub fn set_all_soil(&mut self, raw: u16) {
        self.soil_raw.iter_mut().for_each(|r| *r = raw);
    }

    pub fn pump_on(&self) -> bool {
        self.pump_calls.last().copied().unwrap_or(false)
    }
}

impl SensorPort for MockHardware {
    fn read_soil_raw(&mut self, channel: usize) -> u16 {
        self.soil_raw.get(channel).copied().unwrap_or(WET)
    }

    fn read_temperature_raw(&mut self) -> u16 {
        self.temperature_raw
    }
}

impl ActuatorPort for MockHardware {
    fn set_pump(&mut self, on: bool) {
        self.pump_calls.push(on);
    }
}

// ── ManualClock ───────────────────────────────────────────────

/// Clock that only moves when told to.
#[derive(Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ms(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.now.set(self.now.get() + secs * 1000);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that keeps everything it is given.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
