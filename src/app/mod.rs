//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the watering policy and the serial command
//! language. All interaction with hardware happens through **port traits**
//! defined in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod commands;
pub mod events;
pub mod interpreter;
pub mod ports;
pub mod service;
