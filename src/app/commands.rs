//! Inbound commands to the application core.
//!
//! A command line is split on ASCII whitespace (runs of separators
//! collapse, `\r`/`\n` count as separators) and matched against the fixed
//! grammar:
//!
//! ```text
//! log
//! set min_moisture <digits>
//! set water_time <digits>
//! ```

use heapless::Vec;

use crate::error::CommandError;

/// Tokens considered per line. Anything longer cannot match the grammar.
pub const MAX_TOKENS: usize = 4;

/// Runtime-tunable parameters addressable by `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variable {
    /// Moisture threshold (%), accepted range 0..=99.
    MinMoisture,
    /// Minimum watering time (seconds).
    WaterTime,
}

impl Variable {
    /// Name used on the wire.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MinMoisture => "min_moisture",
            Self::WaterTime => "water_time",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "min_moisture" => Some(Self::MinMoisture),
            "water_time" => Some(Self::WaterTime),
            _ => None,
        }
    }
}

/// A parsed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Render a status snapshot.
    Log,
    /// Change a parameter. The value is parsed but not yet range-checked.
    Set { variable: Variable, value: u32 },
}

impl Command {
    /// Tokenize and parse one line.
    ///
    /// Returns `Ok(None)` for a line with no tokens. For `set`, the
    /// variable name is checked before the value is parsed.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut tokens: Vec<&str, MAX_TOKENS> = Vec::new();
        for token in line.split_ascii_whitespace() {
            tokens.push(token).map_err(|_| CommandError::UnknownCommand)?;
        }

        match tokens.as_slice() {
            [] => Ok(None),
            ["log"] => Ok(Some(Self::Log)),
            ["set", name, value] => {
                let variable = Variable::from_name(name).ok_or(CommandError::UnknownVariable)?;
                let value = parse_unsigned(value)?;
                Ok(Some(Self::Set { variable, value }))
            }
            _ => Err(CommandError::UnknownCommand),
        }
    }
}

/// Strict decimal parser: one or more ASCII digits, nothing else.
///
/// Signs, whitespace, an empty string and values that overflow `u32` are
/// all [`CommandError::InvalidArgument`].
pub fn parse_unsigned(s: &str) -> Result<u32, CommandError> {
    if s.is_empty() {
        return Err(CommandError::InvalidArgument);
    }
    s.bytes().try_fold(0u32, |acc, b| {
        if !b.is_ascii_digit() {
            return Err(CommandError::InvalidArgument);
        }
        acc.checked_mul(10)
            .and_then(|v| v.checked_add((b - b'0') as u32))
            .ok_or(CommandError::InvalidArgument)
    })
}
