//! Fuzz target: `CommandInterpreter::handle`
//!
//! Runs arbitrary text through the interpreter against a live controller
//! and asserts that every reply fits the reply buffer, that parameters
//! stay in range, and that nothing panics.
//!
//! cargo fuzz run fuzz_command_line

#![no_main]

use greenhouse::app::events::AppEvent;
use greenhouse::app::interpreter::CommandInterpreter;
use greenhouse::app::ports::{ClockPort, EventSink};
use greenhouse::app::service::IrrigationController;
use greenhouse::config::{IrrigationConfig, MAX_MIN_MOISTURE};
use greenhouse::serial::channels::ReplyMsg;
use libfuzzer_sys::fuzz_target;

struct Epoch;

impl ClockPort for Epoch {
    fn now_ms(&self) -> u64 {
        0
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(mut ctrl) = IrrigationController::new(&IrrigationConfig::default()) else {
        return;
    };
    let mut interp = CommandInterpreter::new();

    for line in text.split('\n') {
        let reply = interp.handle(line, &mut ctrl, &Epoch, &mut Discard);
        let mut out = ReplyMsg::new();
        assert!(reply.write_line(&mut out).is_ok(), "reply overflowed buffer");
        assert!(ctrl.min_moisture() <= MAX_MIN_MOISTURE);
    }
});
