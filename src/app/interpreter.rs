//! Serial command interpreter.
//!
//! Turns one received line into one [`Reply`]. Every error is recovered
//! here and rendered as text; nothing a client sends can disturb the
//! control loop beyond the two `set`-able parameters.

use core::fmt;

use log::{debug, warn};

use crate::error::CommandError;

use super::commands::Command;
use super::events::{AppEvent, StatusReport};
use super::ports::{ClockPort, EventSink};
use super::service::IrrigationController;

/// Longest reply the firmware produces (8 channels at 3 digits each fit
/// comfortably).
pub const MAX_REPLY_LEN: usize = 256;

/// The outcome of one command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Blank input: nothing is sent back.
    Empty,
    /// Bare acknowledgment of a successful `set`.
    Ok,
    /// `log` output.
    Status(StatusReport),
    /// Rejected command.
    Error(CommandError),
}

impl Reply {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Write the reply as it goes on the wire: the text plus `\n`, or
    /// nothing at all for [`Reply::Empty`].
    pub fn write_line<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        writeln!(out, "{}", self)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Ok => f.write_str("OK"),
            Self::Status(report) => write!(f, "OK: {}", report),
            Self::Error(e) => write!(f, "{}", e),
        }
    }
}

/// Stateless apart from counters; the state it reads and writes belongs
/// to the [`IrrigationController`] passed into each call.
#[derive(Debug, Default)]
pub struct CommandInterpreter {
    handled: u64,
    rejected: u64,
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and execute one line against `controller`.
    pub fn handle(
        &mut self,
        line: &str,
        controller: &mut IrrigationController,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Reply {
        let reply = match Command::parse(line) {
            Ok(None) => return Reply::Empty,
            Ok(Some(cmd)) => self.execute(cmd, controller, clock, sink),
            Err(e) => Reply::Error(e),
        };

        self.handled += 1;
        if let Reply::Error(e) = &reply {
            self.rejected += 1;
            warn!("Command {:?} rejected: {}", line.trim(), e);
        } else {
            debug!("Command {:?} ok", line.trim());
        }
        reply
    }

    /// Answer a line the serial link could not decode (overlong or not
    /// UTF-8). It is treated like any other unrecognised command.
    pub fn reject_undecodable(&mut self) -> Reply {
        self.handled += 1;
        self.rejected += 1;
        warn!("Command rejected: undecodable line");
        Reply::Error(CommandError::UnknownCommand)
    }

    fn execute(
        &mut self,
        cmd: Command,
        controller: &mut IrrigationController,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) -> Reply {
        match cmd {
            Command::Log => Reply::Status(controller.status(clock.now_ms())),
            Command::Set { variable, value } => match controller.apply(variable, value) {
                Ok(()) => {
                    sink.emit(&AppEvent::ParameterChanged { variable, value });
                    Reply::Ok
                }
                Err(e) => Reply::Error(e),
            },
        }
    }

    /// Non-blank lines processed.
    pub fn handled(&self) -> u64 {
        self.handled
    }

    /// Non-blank lines that produced an error reply.
    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}
