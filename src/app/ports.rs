//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ IrrigationController (domain)
//! ```
//!
//! Driven adapters (ADC, pump relay, clock, event sinks) implement these
//! traits. The controller consumes them via generics, so the domain core
//! never touches hardware directly.

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw analog reads.
///
/// Reads are infallible by contract: a failing ADC conversion must be
/// mapped to *some* raw value by the adapter (the ESP32 adapter returns 0).
/// The domain has no way to tell a bad read from a real one.
pub trait SensorPort {
    /// Raw reading of soil probe `channel` (0-based).
    fn read_soil_raw(&mut self, channel: usize) -> u16;

    /// Raw reading of the temperature probe.
    fn read_temperature_raw(&mut self) -> u16;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to switch the pump.
///
/// Writes are infallible by contract, like [`SensorPort`] reads. The
/// controller records `pump_on` as soon as it calls `set_pump`, so an
/// adapter that cannot drive its relay must log the fault itself (the ESP32
/// adapter does, via [`PumpDriver`](crate::drivers::pump::PumpDriver)).
/// Until then the reported pump state may disagree with the hardware.
pub trait ActuatorPort {
    /// Energise (`true`) or release (`false`) the pump relay.
    fn set_pump(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source. Never goes backwards, unaffected by wall-clock
/// adjustments.
pub trait ClockPort {
    /// Milliseconds since an arbitrary fixed origin (usually boot).
    fn now_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
