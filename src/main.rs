//! Greenhouse Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single-owner control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    LogEventSink    MonotonicClock             │
//! │  (Sensor+Actuator)  (EventSink)     (ClockPort)                │
//! │  UartTransport ── serial-io thread ── LINE/REPLY channels      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │        IrrigationController + CommandInterpreter       │    │
//! │  │        FSM (Idle / Watering) · SensorSampler           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use core::fmt::Write as _;
use std::time::Duration;

use anyhow::Result;
use esp_idf_hal::gpio::{AnyIOPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::uart::{UartDriver, config::Config as UartConfig};
use esp_idf_hal::units::Hertz;
use log::{error, info, warn};

use greenhouse::adapters::hardware::HardwareAdapter;
use greenhouse::adapters::log_sink::LogEventSink;
use greenhouse::adapters::time::MonotonicClock;
use greenhouse::app::interpreter::CommandInterpreter;
use greenhouse::app::ports::ClockPort;
use greenhouse::app::service::IrrigationController;
use greenhouse::config::IrrigationConfig;
use greenhouse::drivers::hw_init;
use greenhouse::drivers::pump::PumpDriver;
use greenhouse::pins;
use greenhouse::serial::channels::{Inbound, ReplyMsg};
use greenhouse::serial::io_task;
use greenhouse::serial::transport::UartTransport;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("Greenhouse v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Without the ADC the controller would water on garbage readings.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let peripherals = Peripherals::take()?;
    let pump_pin = PinDriver::output(peripherals.pins.gpio10)?;
    info!("Pump relay on GPIO{}", pins::PUMP_GPIO);
    let mut hw = HardwareAdapter::new(
        &pins::SOIL_ADC_CHANNELS,
        pins::TEMP_ADC_CHANNEL,
        PumpDriver::new(pump_pin),
    );

    let uart = UartDriver::new(
        peripherals.uart0,
        peripherals.pins.gpio43,
        peripherals.pins.gpio44,
        Option::<AnyIOPin>::None,
        Option::<AnyIOPin>::None,
        &UartConfig::default().baudrate(Hertz(pins::UART_BAUD)),
    )?;
    let _io = io_task::spawn(UartTransport::new(uart))?;
    info!(
        "Console on UART0 (tx=GPIO{}, rx=GPIO{}, {} baud)",
        pins::UART_TX_GPIO,
        pins::UART_RX_GPIO,
        pins::UART_BAUD
    );

    // ── 3. Application core ───────────────────────────────────
    let config = IrrigationConfig {
        soil_sensor_count: pins::SOIL_SENSOR_COUNT as u8,
        adc_max_raw: pins::ADC_MAX_RAW,
        ..IrrigationConfig::default()
    };
    let mut controller = IrrigationController::new(&config)?;
    let mut interpreter = CommandInterpreter::new();
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();

    controller.start(&mut hw, &mut sink);
    let interval = Duration::from_millis(u64::from(config.control_loop_interval_ms));

    // ── 4. Control loop ───────────────────────────────────────
    loop {
        std::thread::sleep(interval);
        controller.tick(&mut hw, &clock, &mut sink);

        while let Some(inbound) = io_task::try_recv_line() {
            let reply = match &inbound {
                Inbound::Line(line) => interpreter.handle(line, &mut controller, &clock, &mut sink),
                Inbound::Invalid => interpreter.reject_undecodable(),
            };
            if reply.is_empty() {
                continue;
            }
            let mut out = ReplyMsg::new();
            if reply.write_line(&mut out).is_err() {
                warn!("reply exceeds {} bytes, dropped", out.capacity());
                continue;
            }
            io_task::send_reply(out);
        }

        if controller.tick_count() % 60 == 0 {
            info!(
                "HEARTBEAT | state={:?} avg={}% pump={} t={}ms",
                controller.state(),
                controller.snapshot().avg_moisture,
                controller.is_pump_on(),
                clock.now_ms()
            );
        }
    }
}
