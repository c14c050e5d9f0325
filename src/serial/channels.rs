//! Serial inter-task communication channels.
//!
//! Uses `embassy-sync` bounded MPMC channels to bridge the async I/O
//! thread with the synchronous control loop. Both sides share these
//! static channels without heap allocation.
//!
//! ```text
//! ┌──────────────┐   Inbound   ┌──────────────┐
//! │  I/O thread  │────────────▶│ Control loop │
//! │  (async)     │◀────────────│ (sync)       │
//! └──────────────┘  ReplyMsg   └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

use super::codec::MAX_LINE_LEN;
use crate::app::interpreter::MAX_REPLY_LEN;

/// One complete command line, terminator stripped.
pub type LineMsg = String<MAX_LINE_LEN>;

/// What the I/O thread hands to the control loop per terminated line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// A decoded command line.
    Line(LineMsg),
    /// A line that could not be decoded (overlong or not UTF-8). It still
    /// gets an error reply.
    Invalid,
}

/// One rendered reply, terminator included.
pub type ReplyMsg = String<MAX_REPLY_LEN>;

/// Channel depth for inbound lines.
const LINE_DEPTH: usize = 4;

/// Channel depth for outbound replies.
const REPLY_DEPTH: usize = 4;

/// Inbound line channel: I/O thread → control loop.
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, Inbound, LINE_DEPTH> = Channel::new();

/// Outbound reply channel: control loop → I/O thread.
pub static REPLY_CHANNEL: Channel<CriticalSectionRawMutex, ReplyMsg, REPLY_DEPTH> = Channel::new();
