//! One-shot hardware peripheral initialization and raw ADC access.
//!
//! Configures the ADC1 one-shot unit and its channels using raw ESP-IDF
//! sys calls. Called once from `main()` before the control loop starts.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads real ADC conversions.
//! On host/test: reads from a static table of `AtomicU16` for injection.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    AdcChannelFailed { channel: u32, rc: i32 },
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::AdcChannelFailed { channel, rc } => {
                write!(f, "ADC1 channel {} config failed (rc={})", channel, rc)
            }
        }
    }
}

impl std::error::Error for HwInitError {}

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe { init_adc() }
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// control-loop ADC read path. `init_adc()` completes before the loop
/// starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc() -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };

    let channels = pins::SOIL_ADC_CHANNELS
        .iter()
        .copied()
        .chain(core::iter::once(pins::TEMP_ADC_CHANNEL));
    for channel in channels {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcChannelFailed { channel, rc: ret });
        }
    }

    info!(
        "hw_init: ADC1 configured (soil={:?}, temp=CH{})",
        pins::SOIL_ADC_CHANNELS,
        pins::TEMP_ADC_CHANNEL
    );
    Ok(())
}

/// Raw one-shot conversion. A failed conversion reads as 0.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> u16 {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract — single-threaded control-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return 0;
    }
    raw.max(0) as u16
}

// ── Host simulation ───────────────────────────────────────────

/// ADC1 has ten channels on the ESP32-S3.
#[cfg(not(target_os = "espidf"))]
const SIM_CHANNELS: usize = 10;

#[cfg(not(target_os = "espidf"))]
static SIM_ADC: [AtomicU16; SIM_CHANNELS] = [const { AtomicU16::new(0) }; SIM_CHANNELS];

/// Inject the raw value returned for `channel` on the host.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_adc(channel: u32, raw: u16) {
    if let Some(slot) = SIM_ADC.get(channel as usize) {
        slot.store(raw, Ordering::Relaxed);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(channel: u32) -> u16 {
    SIM_ADC
        .get(channel as usize)
        .map_or(0, |slot| slot.load(Ordering::Relaxed))
}
