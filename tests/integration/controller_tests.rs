//! Integration tests for the IrrigationController → FSM → pump pipeline.
//!
//! Each test drives the controller tick by tick with a manual clock and
//! asserts on the pump commands and events that come out.

use greenhouse::app::events::AppEvent;
use greenhouse::app::service::IrrigationController;
use greenhouse::config::IrrigationConfig;
use greenhouse::fsm::StateId;

use crate::mock_hw::{DRY, HALF, ManualClock, MockHardware, RecordingSink, WET};

const CHANNELS: usize = 5;

fn make_controller() -> (IrrigationController, MockHardware, ManualClock, RecordingSink) {
    let config = IrrigationConfig::default();
    let mut ctrl = IrrigationController::new(&config).unwrap();
    let mut hw = MockHardware::new(CHANNELS);
    let mut sink = RecordingSink::new();
    ctrl.start(&mut hw, &mut sink);
    (ctrl, hw, ManualClock::new(), sink)
}

fn is_pump_started(e: &AppEvent) -> bool {
    matches!(e, AppEvent::PumpStarted { .. })
}

fn is_sensors_changed(e: &AppEvent) -> bool {
    matches!(e, AppEvent::SensorsChanged { .. })
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_releases_pump_and_reports_defaults() {
    let (ctrl, hw, _clock, sink) = make_controller();
    assert_eq!(ctrl.state(), StateId::Idle);
    assert_eq!(hw.pump_calls, vec![false]);
    assert_eq!(
        sink.events,
        vec![AppEvent::Started {
            min_moisture: 50,
            water_time_secs: 30
        }]
    );
}

// ── Threshold decision ────────────────────────────────────────

#[test]
fn dry_soil_starts_pump() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    hw.set_all_soil(DRY);
    clock.set_ms(5_000);

    ctrl.tick(&mut hw, &clock, &mut sink);

    assert_eq!(ctrl.state(), StateId::Watering);
    assert!(ctrl.is_pump_on());
    assert!(hw.pump_on());
    assert_eq!(ctrl.irrigation().timer_start_ms, 5_000);
    assert!(sink.events.contains(&AppEvent::PumpStarted {
        avg_moisture: 0,
        threshold: 50
    }));
}

#[test]
fn average_at_threshold_waters() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    hw.set_all_soil(HALF);
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert_eq!(ctrl.snapshot().avg_moisture, 50);
    assert!(ctrl.is_pump_on());
}

#[test]
fn average_above_threshold_stays_idle() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    // 511 maps to 51 %.
    hw.set_all_soil(HALF - 1);
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert_eq!(ctrl.snapshot().avg_moisture, 51);
    assert_eq!(ctrl.state(), StateId::Idle);
    assert!(!hw.pump_on());
    assert_eq!(sink.count(is_pump_started), 0);
}

#[test]
fn average_is_floor_of_mean() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    // 100, 100, 100, 100, 0 → mean 80.
    hw.soil_raw = vec![WET, WET, WET, WET, DRY];
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert_eq!(ctrl.snapshot().avg_moisture, 80);

    // 100, 100, 100, 0, 0 → mean 60.
    hw.soil_raw[3] = DRY;
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert_eq!(ctrl.snapshot().avg_moisture, 60);

    // 100, 100, 0, 0, 1 → mean 40.2 → 40.
    hw.soil_raw = vec![WET, WET, DRY, DRY, 1020];
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert_eq!(ctrl.snapshot().moistures[4], 1);
    assert_eq!(ctrl.snapshot().avg_moisture, 40);
}

// ── Watering window ───────────────────────────────────────────

#[test]
fn pump_runs_full_window_regardless_of_readings() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    hw.set_all_soil(DRY);
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert!(ctrl.is_pump_on());

    // Soil is soaked immediately, but the window holds.
    hw.set_all_soil(WET);
    for ms in [1_000, 10_000, 29_999] {
        clock.set_ms(ms);
        ctrl.tick(&mut hw, &clock, &mut sink);
        assert!(ctrl.is_pump_on(), "pump must still run at {}ms", ms);
    }

    clock.set_ms(30_000);
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert!(!ctrl.is_pump_on());
    assert!(!hw.pump_on());
    assert_eq!(ctrl.state(), StateId::Idle);
    assert!(sink.events.contains(&AppEvent::PumpStopped { ran_secs: 30 }));
}

#[test]
fn window_close_with_changed_dry_readings_restarts_same_tick() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    hw.set_all_soil(DRY);
    ctrl.tick(&mut hw, &clock, &mut sink);

    // Still dry, but different from the sample taken before watering.
    hw.soil_raw[0] = 1000;
    clock.set_ms(30_000);
    ctrl.tick(&mut hw, &clock, &mut sink);

    assert!(hw.pump_calls.ends_with(&[true, false, true]));
    assert_eq!(sink.count(is_pump_started), 2);
    assert!(sink.events.contains(&AppEvent::PumpStopped { ran_secs: 30 }));
    assert_eq!(ctrl.state(), StateId::Watering);
    assert_eq!(ctrl.irrigation().timer_start_ms, 30_000);
}

#[test]
fn sampling_is_suppressed_while_watering() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    hw.set_all_soil(DRY);
    ctrl.tick(&mut hw, &clock, &mut sink);
    sink.clear();

    hw.set_all_soil(WET);
    hw.temperature_raw = 900;
    clock.set_ms(15_000);
    ctrl.tick(&mut hw, &clock, &mut sink);

    assert_eq!(ctrl.snapshot().avg_moisture, 0, "snapshot frozen during window");
    assert_eq!(sink.count(is_sensors_changed), 0);
}

#[test]
fn zero_water_time_stops_on_next_tick() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    ctrl.set_water_time(0);
    hw.set_all_soil(DRY);
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert!(ctrl.is_pump_on());

    clock.set_ms(1_000);
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert!(!ctrl.is_pump_on());
    assert_eq!(hw.pump_calls, vec![false, true, false]);
}

#[test]
fn shortening_water_time_ends_open_window() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    hw.set_all_soil(DRY);
    ctrl.tick(&mut hw, &clock, &mut sink);

    clock.set_ms(12_000);
    ctrl.set_water_time(10);
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert!(!ctrl.is_pump_on());
}

// ── Change detection ──────────────────────────────────────────

#[test]
fn unchanged_dry_readings_do_not_restart_pump() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    hw.set_all_soil(DRY);
    ctrl.tick(&mut hw, &clock, &mut sink);

    clock.set_ms(30_000);
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert!(!ctrl.is_pump_on());

    // Still dry, but identical to the last sample: nothing happens.
    for s in 31..40 {
        clock.set_ms(s * 1000);
        ctrl.tick(&mut hw, &clock, &mut sink);
        assert!(!ctrl.is_pump_on());
    }
    assert_eq!(sink.count(is_pump_started), 1);

    // Any change re-arms the decision.
    hw.soil_raw[0] = 1000;
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert!(ctrl.is_pump_on());
    assert_eq!(sink.count(is_pump_started), 2);
}

#[test]
fn temperature_change_alone_counts_as_change() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    hw.set_all_soil(DRY);
    ctrl.set_water_time(0);
    ctrl.tick(&mut hw, &clock, &mut sink);
    clock.set_ms(1_000);
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert!(!ctrl.is_pump_on());

    hw.temperature_raw = 500;
    clock.set_ms(2_000);
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert!(ctrl.is_pump_on());
}

#[test]
fn first_sample_always_reports_change() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert_eq!(sink.count(is_sensors_changed), 1);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::SensorsChanged {
            avg_moisture: 100,
            temperature: 15
        })
    );

    ctrl.tick(&mut hw, &clock, &mut sink);
    assert_eq!(sink.count(is_sensors_changed), 1);
    assert_eq!(ctrl.tick_count(), 2);
}

// ── Parameters ────────────────────────────────────────────────

#[test]
fn raised_threshold_takes_effect_on_next_change() {
    let (mut ctrl, mut hw, clock, mut sink) = make_controller();
    hw.set_all_soil(HALF - 1);
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert!(!ctrl.is_pump_on());

    ctrl.set_min_moisture(60).unwrap();
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert!(!ctrl.is_pump_on(), "unchanged readings skip the decision");

    hw.soil_raw[0] = HALF;
    ctrl.tick(&mut hw, &clock, &mut sink);
    assert!(ctrl.is_pump_on());
}

#[test]
fn threshold_above_99_is_rejected() {
    let (mut ctrl, ..) = make_controller();
    assert!(ctrl.set_min_moisture(99).is_ok());
    assert!(ctrl.set_min_moisture(100).is_err());
    assert_eq!(ctrl.min_moisture(), 99);
}
