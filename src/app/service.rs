//! Irrigation controller — the hexagonal core.
//!
//! [`IrrigationController`] owns the pump FSM, the sensor sampler and the
//! irrigation state block. All I/O flows through port traits injected at
//! call sites, making the controller testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!   ClockPort ──▶ │  IrrigationController    │
//! ActuatorPort ◀──│  Sampler · FSM · State   │
//!                 └──────────────────────────┘
//! ```
//!
//! Per tick:
//!
//! 1. While watering and the window is still open, do nothing else.
//! 2. If the window has elapsed, switch the pump off.
//! 3. Sample the sensors; stop if nothing changed.
//! 4. If the average moisture is at or below the threshold, start watering.

use log::info;

use crate::config::{IrrigationConfig, MAX_MIN_MOISTURE};
use crate::error::{CommandError, ConfigError};
use crate::fsm::context::{FsmContext, IrrigationState};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};
use crate::sensors::{SensorSampler, SensorSnapshot};

use super::commands::Variable;
use super::events::{AppEvent, StatusReport};
use super::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// IrrigationController
// ───────────────────────────────────────────────────────────────

/// Owns the pump state machine and its parameters.
pub struct IrrigationController {
    fsm: Fsm,
    ctx: FsmContext,
    sampler: SensorSampler,
    tick_count: u64,
}

impl IrrigationController {
    /// Construct the controller from a validated configuration.
    ///
    /// Does **not** touch the hardware — call [`start`](Self::start) next.
    pub fn new(config: &IrrigationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let sampler = SensorSampler::new(config.soil_sensor_count as usize, config.adc_max_raw);
        let irrigation =
            IrrigationState::new(config.min_moisture_percent, config.water_time_secs);
        let ctx = FsmContext::new(irrigation, sampler.snapshot().clone());
        let fsm = Fsm::new(build_state_table(), StateId::Idle);

        Ok(Self {
            fsm,
            ctx,
            sampler,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter Idle and make sure the pump relay is released.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx);
        hw.set_pump(false);
        sink.emit(&AppEvent::Started {
            min_moisture: self.ctx.irrigation.min_moisture,
            water_time_secs: self.ctx.irrigation.water_time_secs,
        });
        info!(
            "IrrigationController started (threshold={}%, water_time={}s, channels={})",
            self.ctx.irrigation.min_moisture,
            self.ctx.irrigation.water_time_secs,
            self.sampler.channel_count()
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;
        self.ctx.now_ms = clock.now_ms();

        // 1–2. An open watering window suppresses sampling entirely.
        if self.fsm.current_state() == StateId::Watering {
            let started_ms = self.ctx.irrigation.timer_start_ms;
            if self.fsm.update(&mut self.ctx) == StateId::Watering {
                return;
            }
            hw.set_pump(false);
            sink.emit(&AppEvent::PumpStopped {
                ran_secs: self.ctx.now_ms.saturating_sub(started_ms) / 1000,
            });
        }

        // 3. Sample; identical readings end the tick.
        let (snapshot, changed) = self.sampler.sample(hw);
        self.ctx.sensors = snapshot;
        self.ctx.sensors_changed = changed;
        if !changed {
            return;
        }
        sink.emit(&AppEvent::SensorsChanged {
            avg_moisture: self.ctx.sensors.avg_moisture,
            temperature: self.ctx.sensors.temperature,
        });

        // 4–5. Threshold decision.
        if self.fsm.update(&mut self.ctx) == StateId::Watering {
            hw.set_pump(true);
            sink.emit(&AppEvent::PumpStarted {
                avg_moisture: self.ctx.sensors.avg_moisture,
                threshold: self.ctx.irrigation.min_moisture,
            });
        }
    }

    // ── Parameter writes ──────────────────────────────────────

    /// Set the moisture threshold. Values above 99 are rejected.
    pub fn set_min_moisture(&mut self, value: u32) -> Result<(), CommandError> {
        if value > u32::from(MAX_MIN_MOISTURE) {
            return Err(CommandError::InvalidValue);
        }
        self.ctx.irrigation.min_moisture = value as u8;
        info!("Threshold set to {}%", value);
        Ok(())
    }

    /// Set the watering time. Takes effect from the next evaluation of
    /// the window, including a window already in progress.
    pub fn set_water_time(&mut self, secs: u32) {
        self.ctx.irrigation.water_time_secs = secs;
        info!("Water time set to {}s", secs);
    }

    /// Dispatch a `set` to the matching parameter.
    pub fn apply(&mut self, variable: Variable, value: u32) -> Result<(), CommandError> {
        match variable {
            Variable::MinMoisture => self.set_min_moisture(value),
            Variable::WaterTime => {
                self.set_water_time(value);
                Ok(())
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a status snapshot at `now_ms`.
    pub fn status(&self, now_ms: u64) -> StatusReport {
        let sensors = &self.ctx.sensors;
        let irrigation = &self.ctx.irrigation;
        StatusReport {
            temperature: sensors.temperature,
            moistures: sensors.moistures.clone(),
            avg_moisture: sensors.avg_moisture,
            pump_on: irrigation.pump_on,
            time_left: irrigation.time_left_secs(now_ms),
            min_moisture: irrigation.min_moisture,
            water_time: irrigation.water_time_secs,
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn is_pump_on(&self) -> bool {
        self.ctx.irrigation.pump_on
    }

    pub fn min_moisture(&self) -> u8 {
        self.ctx.irrigation.min_moisture
    }

    pub fn water_time_secs(&self) -> u32 {
        self.ctx.irrigation.water_time_secs
    }

    /// Whole seconds of watering left at `now_ms`.
    pub fn time_left_secs(&self, now_ms: u64) -> u32 {
        self.ctx.irrigation.time_left_secs(now_ms)
    }

    /// Latest sensor snapshot.
    pub fn snapshot(&self) -> &SensorSnapshot {
        &self.ctx.sensors
    }

    /// Copy of the irrigation state block.
    pub fn irrigation(&self) -> IrrigationState {
        self.ctx.irrigation
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
