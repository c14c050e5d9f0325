//! Water pump relay driver.
//!
//! On/off control through a single digital output. The driver is generic
//! over `embedded-hal`'s [`OutputPin`], so it runs against an ESP-IDF
//! `PinDriver` on target and against any in-memory pin on the host.
//!
//! ## Safety contract
//!
//! The driver is a dumb actuator: it never decides to water. The pin is
//! driven LOW (relay released) on construction. A failed pin write is
//! logged and leaves [`PumpState`] unchanged, so `state()` always reflects
//! the last write that reached the pin.

use embedded_hal::digital::OutputPin;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Stopped,
    Running,
}

pub struct PumpDriver<P: OutputPin> {
    pin: P,
    state: PumpState,
    /// Number of off→on switches since construction.
    starts: u32,
}

impl<P: OutputPin> PumpDriver<P> {
    pub fn new(pin: P) -> Self {
        let mut driver = Self {
            pin,
            state: PumpState::Running,
            starts: 0,
        };
        driver.stop();
        driver
    }

    pub fn start(&mut self) {
        if let Err(e) = self.pin.set_high() {
            warn!("pump: GPIO set_high failed: {:?}", e);
            return;
        }
        if self.state == PumpState::Stopped {
            self.starts = self.starts.wrapping_add(1);
        }
        self.state = PumpState::Running;
    }

    pub fn stop(&mut self) {
        if let Err(e) = self.pin.set_low() {
            warn!("pump: GPIO set_low failed: {:?}", e);
            return;
        }
        self.state = PumpState::Stopped;
    }

    pub fn set(&mut self, on: bool) {
        if on {
            self.start();
        } else {
            self.stop();
        }
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == PumpState::Running
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }
}
