//! Greenhouse irrigation firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod sensors;
pub mod serial;

// Hardware-facing modules compile on the host too; their peripheral code
// is swapped for simulation stubs by cfg attributes inside.
pub mod adapters;
pub mod drivers;
