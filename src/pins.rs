//! GPIO / ADC assignments for the greenhouse controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Pump relay
// ---------------------------------------------------------------------------

/// Digital output driving the pump relay (active HIGH).
pub const PUMP_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Number of soil-moisture probes wired on the board.
pub const SOIL_SENSOR_COUNT: usize = 5;

/// ADC1 channels of the capacitive soil probes (GPIO 2..=6 on ESP32-S3
/// map to ADC1_CH1..=CH5).
pub const SOIL_ADC_CHANNELS: [u32; SOIL_SENSOR_COUNT] = [1, 2, 3, 4, 5];

/// Analog temperature probe. ADC1 channel 0 (GPIO 1 on ESP32-S3).
pub const TEMP_ADC_CHANNEL: u32 = 0;

/// Full-scale reading of the ESP32-S3 one-shot ADC at 12-bit width.
pub const ADC_MAX_RAW: u16 = 4095;

// ---------------------------------------------------------------------------
// UART console (command link)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 43;
pub const UART_RX_GPIO: i32 = 44;
/// Console baud rate.
pub const UART_BAUD: u32 = 9_600;
