//! Fuzz target: `LineDecoder::feed`
//!
//! Drives arbitrary byte sequences into the serial line decoder and
//! asserts that it never panics, never yields an overlong, multi-line or
//! uncollapsed result, and never buffers past its capacity.
//!
//! cargo fuzz run fuzz_line_decoder

#![no_main]

use greenhouse::serial::codec::{Frame, LineDecoder, MAX_LINE_LEN};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = LineDecoder::new();

    // Split the input to exercise lines straddling reads.
    let (a, b) = data.split_at(data.len() / 2);
    for chunk in [a, b] {
        decoder.feed(chunk, |frame| {
            if let Frame::Line(line) = frame {
                assert!(line.len() <= MAX_LINE_LEN, "line exceeds MAX_LINE_LEN");
                assert!(!line.contains('\n') && !line.contains('\r'));
                assert!(!line.contains("  "), "blank runs must collapse");
            }
        });
        assert!(decoder.pending() <= MAX_LINE_LEN);
    }

    decoder.reset();
    assert_eq!(decoder.pending(), 0);
});
