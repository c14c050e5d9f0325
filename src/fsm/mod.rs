//! Function-pointer finite state machine engine.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  StateTable                              │
//! │  ┌──────────┬───────────┬─────────────┐  │
//! │  │ StateId  │ on_enter  │ on_update   │  │
//! │  ├──────────┼───────────┼─────────────┤  │
//! │  │ Idle     │ fn(ctx)   │ fn(ctx)->.. │  │
//! │  │ Watering │ fn(ctx)   │ fn(ctx)->.. │  │
//! │  └──────────┴───────────┴─────────────┘  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Each evaluation the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine runs `on_enter` for the next
//! state and updates the current pointer. All functions receive `&mut FsmContext`.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Pump states. Must stay in sync with [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Idle = 0,
    Watering = 1,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 2;

    /// Convert a table index back to `StateId`. Out-of-range indices
    /// assert in debug builds and fall back to `Idle` (pump off).
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Watering,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for the `on_enter` action.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Number of transitions taken since construction.
    transitions: u64,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            transitions: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `update()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Evaluate the current state once and take the transition it asks for.
    ///
    /// Returns the state the machine is in afterwards.
    pub fn update(&mut self, ctx: &mut FsmContext) -> StateId {
        if let Some(next_id) = (self.table[self.current].on_update)(ctx) {
            self.transition(next_id, ctx);
        }
        self.current_state()
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// Transitions taken so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        self.current = next_idx;
        self.transitions += 1;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}
