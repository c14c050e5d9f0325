//! Newline-delimited line decoder.
//!
//! Wire format: ASCII text, one command per line, terminated by `\n`.
//! A `\r` anywhere is dropped, so both `\n` and `\r\n` endings work.
//!
//! The decoder accumulates incoming bytes and yields complete lines. A
//! single `Transport::read` may return part of a line, exactly one line or
//! several lines back to back.
//!
//! Runs of blanks collapse to a single space while buffering, so padding
//! between tokens never counts against [`MAX_LINE_LEN`]. A line that still
//! does not fit, or is not UTF-8, is reported as [`Frame::Invalid`] once its
//! terminator arrives.

use heapless::String;
use log::warn;

/// Longest accepted line after blank collapsing, excluding the terminator.
pub const MAX_LINE_LEN: usize = 64;

/// One terminated line as seen by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// A complete line with blank runs collapsed.
    Line(&'a str),
    /// The line overflowed the buffer or was not valid UTF-8.
    Invalid,
}

/// Streaming line decoder.
pub struct LineDecoder {
    buf: [u8; MAX_LINE_LEN],
    len: usize,
    /// Set after an overlong line until its terminator has been seen.
    discarding: bool,
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            buf: [0; MAX_LINE_LEN],
            len: 0,
            discarding: false,
        }
    }

    /// Feed bytes into the decoder, calling `on_frame` once for every
    /// terminated line.
    pub fn feed(&mut self, data: &[u8], mut on_frame: impl FnMut(Frame<'_>)) {
        for &byte in data {
            match byte {
                b'\r' => {}
                b'\n' => {
                    if self.discarding {
                        self.discarding = false;
                        on_frame(Frame::Invalid);
                    } else {
                        match core::str::from_utf8(&self.buf[..self.len]) {
                            Ok(line) => on_frame(Frame::Line(line)),
                            Err(_) => {
                                warn!("serial: non-UTF-8 line");
                                on_frame(Frame::Invalid);
                            }
                        }
                    }
                    self.len = 0;
                }
                _ if self.discarding => {}
                b if b.is_ascii_whitespace() => {
                    // Leading blanks and repeats carry no token information.
                    if self.len > 0 && self.buf[self.len - 1] != b' ' {
                        self.push(b' ');
                    }
                }
                b => self.push(b),
            }
        }
    }

    fn push(&mut self, byte: u8) {
        if self.len == MAX_LINE_LEN {
            warn!("serial: line exceeds {} bytes, discarding", MAX_LINE_LEN);
            self.discarding = true;
            self.len = 0;
            return;
        }
        self.buf[self.len] = byte;
        self.len += 1;
    }

    /// Reset decoder state (e.g. after a transport error).
    pub fn reset(&mut self) {
        self.len = 0;
        self.discarding = false;
    }

    /// Bytes buffered towards the next line.
    pub fn pending(&self) -> usize {
        self.len
    }
}

/// Copy a decoded line into an owned fixed-capacity string.
pub fn to_owned_line(line: &str) -> Option<String<MAX_LINE_LEN>> {
    let mut owned = String::new();
    owned.push_str(line).ok()?;
    Some(owned)
}
