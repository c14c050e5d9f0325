//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!          [sensors changed && avg <= threshold]
//!  IDLE ─────────────────────────────────────────▶ WATERING
//!    ▲                                               │
//!    └──────────[water_time elapsed]─────────────────┘
//! ```
//!
//! WATERING ignores sensor readings entirely: once started, the pump runs
//! for at least `water_time_secs`.

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Idle
        StateDescriptor {
            id: StateId::Idle,
            name: "Idle",
            on_enter: Some(idle_enter),
            on_update: idle_update,
        },
        // Index 1 — Watering
        StateDescriptor {
            id: StateId::Watering,
            name: "Watering",
            on_enter: Some(watering_enter),
            on_update: watering_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    ctx.irrigation.pump_on = false;
}

fn idle_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Debounce: identical readings never re-trigger a decision.
    if !ctx.sensors_changed {
        return None;
    }
    if ctx.sensors.avg_moisture <= ctx.irrigation.min_moisture {
        info!(
            "Idle: avg moisture {}% <= threshold {}% -> watering",
            ctx.sensors.avg_moisture, ctx.irrigation.min_moisture
        );
        return Some(StateId::Watering);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  WATERING state
// ═══════════════════════════════════════════════════════════════════════════

fn watering_enter(ctx: &mut FsmContext) {
    ctx.irrigation.pump_on = true;
    ctx.irrigation.timer_start_ms = ctx.now_ms;
}

fn watering_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.irrigation.window_open(ctx.now_ms) {
        return None;
    }
    info!(
        "Watering: {}s window elapsed -> idle",
        ctx.irrigation.water_time_secs
    );
    Some(StateId::Idle)
}
