//! Error types for the greenhouse firmware.
//!
//! Command errors never leave the command boundary: the interpreter turns
//! each one into a reply line and the control loop keeps ticking. Their
//! `Display` output is the exact text sent over the serial link.

use core::fmt;

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

/// Why a command line was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The value is not a non-negative integer literal.
    InvalidArgument,
    /// The value parsed but lies outside the variable's accepted domain.
    InvalidValue,
    /// Unrecognised verb or wrong argument count.
    UnknownCommand,
    /// `set` named a variable that does not exist.
    UnknownVariable,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => write!(f, "ERROR: Invalid argument!"),
            Self::InvalidValue => write!(f, "ERROR: Invalid value!"),
            Self::UnknownCommand => write!(f, "ERROR: Unknown command!"),
            Self::UnknownVariable => write!(f, "ERROR: Unknown variable!"),
        }
    }
}

impl std::error::Error for CommandError {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from [`IrrigationConfig::validate`](crate::config::IrrigationConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` names the field and the accepted range.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
