//! Transport abstraction — any byte-oriented channel.
//!
//! The firmware links the UART console (ESP32-S3, `target_os = "espidf"`);
//! host tests supply their own in-memory transports.
//!
//! The I/O task is generic over `Transport`, so adding a new link requires
//! zero changes to the command logic.

/// Byte-oriented transport channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `data` to the transport.
    /// Returns the number of bytes actually written.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), Self::Error>;
}

// ── UART (ESP-IDF) ───────────────────────────────────────────

/// UART console transport backed by the ESP-IDF UART driver.
#[cfg(target_os = "espidf")]
pub struct UartTransport {
    driver: esp_idf_hal::uart::UartDriver<'static>,
}

#[cfg(target_os = "espidf")]
impl UartTransport {
    pub fn new(driver: esp_idf_hal::uart::UartDriver<'static>) -> Self {
        Self { driver }
    }
}

#[cfg(target_os = "espidf")]
impl Transport for UartTransport {
    type Error = esp_idf_hal::sys::EspError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.driver.read(buf, esp_idf_hal::delay::NON_BLOCK)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        self.driver.write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.driver.wait_tx_done(esp_idf_hal::delay::BLOCK)
    }
}
