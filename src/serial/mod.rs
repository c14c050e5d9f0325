//! Serial command link.
//!
//! ```text
//! UART ──▶ LineDecoder ──▶ LINE_CHANNEL ──▶ control loop ──▶ REPLY_CHANNEL ──▶ UART
//!          (I/O thread)                     (interpreter)                     (I/O thread)
//! ```
//!
//! The I/O thread only moves bytes. Every command is executed on the
//! control loop, which is the sole owner of the irrigation state.

pub mod channels;
pub mod codec;
pub mod io_task;
pub mod transport;
