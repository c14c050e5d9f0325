//! End-to-end tests of the serial command surface: a line goes in, the
//! exact bytes that would be written back come out.

use greenhouse::app::commands::Variable;
use greenhouse::app::events::AppEvent;
use greenhouse::app::interpreter::{CommandInterpreter, Reply};
use greenhouse::app::service::IrrigationController;
use greenhouse::config::IrrigationConfig;
use greenhouse::serial::channels::ReplyMsg;

use crate::mock_hw::{DRY, ManualClock, MockHardware, RecordingSink};

struct Rig {
    ctrl: IrrigationController,
    interp: CommandInterpreter,
    hw: MockHardware,
    clock: ManualClock,
    sink: RecordingSink,
}

impl Rig {
    fn new(channels: u8) -> Self {
        let config = IrrigationConfig {
            soil_sensor_count: channels,
            ..IrrigationConfig::default()
        };
        let mut ctrl = IrrigationController::new(&config).unwrap();
        let mut hw = MockHardware::new(channels as usize);
        let mut sink = RecordingSink::new();
        ctrl.start(&mut hw, &mut sink);
        Self {
            ctrl,
            interp: CommandInterpreter::new(),
            hw,
            clock: ManualClock::new(),
            sink,
        }
    }

    /// Send one line and return what goes on the wire.
    fn send(&mut self, line: &str) -> String {
        let reply = self
            .interp
            .handle(line, &mut self.ctrl, &self.clock, &mut self.sink);
        let mut out = ReplyMsg::new();
        reply.write_line(&mut out).unwrap();
        out.as_str().to_owned()
    }

    fn tick(&mut self) {
        self.ctrl.tick(&mut self.hw, &self.clock, &mut self.sink);
    }
}

#[test]
fn log_reports_defaults_before_first_sample() {
    let mut rig = Rig::new(5);
    assert_eq!(
        rig.send("log"),
        "OK: { \"temperature\": 0, \"moistures\": [0, 0, 0, 0, 0], \"avg_moisture\": 0, \
         \"pump_on\": false, \"time_left\": 0, \"min_moisture\": 50, \"water_time\": 30 }\n"
    );
}

#[test]
fn set_water_time_then_log() {
    let mut rig = Rig::new(2);
    assert_eq!(rig.send("set water_time 45"), "OK\n");
    let out = rig.send("log");
    assert!(out.ends_with("\"water_time\": 45 }\n"), "got {out}");
    assert_eq!(rig.ctrl.water_time_secs(), 45);
    assert!(rig.sink.events.contains(&AppEvent::ParameterChanged {
        variable: Variable::WaterTime,
        value: 45
    }));
}

#[test]
fn min_moisture_range_is_0_to_99() {
    let mut rig = Rig::new(1);
    assert_eq!(rig.send("set min_moisture 99"), "OK\n");
    assert_eq!(rig.send("set min_moisture 100"), "ERROR: Invalid value!\n");
    assert_eq!(rig.send("set min_moisture 0"), "OK\n");
    assert_eq!(rig.ctrl.min_moisture(), 0);
}

#[test]
fn non_numeric_values_are_invalid_arguments() {
    let mut rig = Rig::new(1);
    for line in [
        "set min_moisture abc",
        "set min_moisture -5",
        "set min_moisture 4x",
        "set water_time 99999999999",
    ] {
        assert_eq!(rig.send(line), "ERROR: Invalid argument!\n", "line {line:?}");
    }
    assert_eq!(rig.ctrl.min_moisture(), 50);
    assert_eq!(rig.ctrl.water_time_secs(), 30);
}

#[test]
fn unknown_input_is_rejected() {
    let mut rig = Rig::new(1);
    assert_eq!(rig.send("status"), "ERROR: Unknown command!\n");
    assert_eq!(rig.send("set"), "ERROR: Unknown command!\n");
    assert_eq!(rig.send("set water_time"), "ERROR: Unknown command!\n");
    assert_eq!(rig.send("LOG"), "ERROR: Unknown command!\n");
    assert_eq!(rig.send("set pump_speed 3"), "ERROR: Unknown variable!\n");
    assert_eq!(rig.send("set pump_speed abc"), "ERROR: Unknown variable!\n");
    assert_eq!(rig.interp.rejected(), 6);
}

#[test]
fn blank_lines_produce_no_output() {
    let mut rig = Rig::new(1);
    assert_eq!(rig.send(""), "");
    assert_eq!(rig.send("  \r"), "");
    assert_eq!(rig.interp.handled(), 0);
}

#[test]
fn log_reports_countdown_while_watering() {
    let mut rig = Rig::new(3);
    rig.hw.set_all_soil(DRY);
    rig.clock.set_ms(2_000);
    rig.tick();

    rig.clock.set_ms(12_500);
    let out = rig.send("log");
    assert!(out.contains("\"pump_on\": true"), "got {out}");
    assert!(out.contains("\"time_left\": 20"), "got {out}");
    assert!(out.contains("\"moistures\": [0, 0, 0]"), "got {out}");
}

#[test]
fn log_payload_is_valid_json() {
    let mut rig = Rig::new(4);
    rig.tick();
    let reply = rig
        .interp
        .handle("log", &mut rig.ctrl, &rig.clock, &mut rig.sink);
    let Reply::Status(report) = reply else {
        panic!("expected status, got {reply:?}");
    };
    let v: serde_json::Value = serde_json::from_str(&report.to_string()).unwrap();
    assert_eq!(v["moistures"].as_array().unwrap().len(), 4);
    assert_eq!(v["avg_moisture"], 100);
    assert_eq!(v["temperature"], 15);
}

#[test]
fn set_during_watering_keeps_pump_running() {
    let mut rig = Rig::new(1);
    rig.hw.set_all_soil(DRY);
    rig.tick();
    assert_eq!(rig.send("set min_moisture 10"), "OK\n");
    rig.clock.set_ms(5_000);
    rig.tick();
    assert!(rig.ctrl.is_pump_on());
}
