//! ADS1115 16-bit I²C ADC driver.
//!
//! Single-shot, single-ended conversions at GAIN_ONE (±4.096 V full scale),
//! matching the divider sizing in [`crate::pins`].  The driver probes the
//! device once at construction; a failed probe is the fatal
//! `SensorError::NotInitialized` condition — the controller must not cycle
//! on undefined voltage data.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real I²C transactions via the hw_init helpers.
//! On host/test: reads from a static `AtomicU16` for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::error::SensorError;
use crate::pins;
use crate::sensors::AnalogSource;

#[cfg(not(target_os = "espidf"))]
static SIM_RAW_CODE: AtomicU16 = AtomicU16::new(0);

/// Inject the raw code returned by subsequent host-side conversions.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_raw_code(raw: u16) {
    SIM_RAW_CODE.store(raw, Ordering::Relaxed);
}

// ── Register map ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
const REG_CONVERSION: u8 = 0x00;
#[cfg(target_os = "espidf")]
const REG_CONFIG: u8 = 0x01;

/// OS=1 (start single conversion), PGA=±4.096 V, single-shot mode,
/// 128 SPS, comparator disabled.  The MUX bits for "AINx vs GND" are
/// OR-ed in per channel.
#[cfg(target_os = "espidf")]
const CONFIG_BASE: u16 = 0x8000 | 0x0200 | 0x0100 | 0x0080 | 0x0003;

/// MUX = 100b selects AIN0 single-ended; channels 1-3 follow in sequence.
#[cfg(target_os = "espidf")]
const MUX_SINGLE_ENDED: u16 = 0x4000;

/// Conversion completion polls before giving up (128 SPS ≈ 8 ms per
/// conversion; each poll sleeps 1 ms).
#[cfg(target_os = "espidf")]
const CONVERSION_POLL_LIMIT: u32 = 20;

/// ADS1115 at a fixed I²C address.
pub struct Ads1115 {
    addr: u8,
}

impl Ads1115 {
    /// Probe the device.  Errors with `SensorError::NotInitialized` if the
    /// converter does not respond on the bus.
    pub fn new(addr: u8) -> Result<Self, SensorError> {
        let ads = Self { addr };
        ads.probe().map_err(|_| SensorError::NotInitialized)?;
        Ok(ads)
    }

    /// One single-ended conversion of `channel` (0–3).
    #[cfg(target_os = "espidf")]
    pub fn read_single_ended(&mut self, channel: u8) -> Result<u16, SensorError> {
        debug_assert!(channel < 4);
        self.start_conversion(channel)?;
        self.wait_conversion()?;
        let raw = self.read_reg(REG_CONVERSION)?;
        // Single-ended readings near ground can dip slightly negative;
        // clamp to the 15-bit positive range.
        Ok((raw as i16).max(0) as u16)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_single_ended(&mut self, _channel: u8) -> Result<u16, SensorError> {
        Ok(SIM_RAW_CODE.load(Ordering::Relaxed))
    }

    // ── Internal (espidf) ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn probe(&self) -> Result<(), SensorError> {
        // A successful config-register read is proof of presence.
        self.read_reg(REG_CONFIG).map(|_| ())
    }

    #[cfg(target_os = "espidf")]
    fn start_conversion(&self, channel: u8) -> Result<(), SensorError> {
        let mux = MUX_SINGLE_ENDED | (u16::from(channel) << 12);
        self.write_reg(REG_CONFIG, CONFIG_BASE | mux)
    }

    #[cfg(target_os = "espidf")]
    fn wait_conversion(&self) -> Result<(), SensorError> {
        // The OS bit reads 1 once the conversion completes.
        for _ in 0..CONVERSION_POLL_LIMIT {
            if self.read_reg(REG_CONFIG)? & 0x8000 != 0 {
                return Ok(());
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        Err(SensorError::ConversionTimeout)
    }

    #[cfg(target_os = "espidf")]
    fn write_reg(&self, reg: u8, value: u16) -> Result<(), SensorError> {
        let [hi, lo] = value.to_be_bytes();
        crate::drivers::hw_init::i2c_write(self.addr, &[reg, hi, lo])
    }

    #[cfg(target_os = "espidf")]
    fn read_reg(&self, reg: u8) -> Result<u16, SensorError> {
        let mut buf = [0u8; 2];
        crate::drivers::hw_init::i2c_write_read(self.addr, &[reg], &mut buf)?;
        Ok(u16::from_be_bytes(buf))
    }

    // ── Internal (host simulation) ────────────────────────────

    #[cfg(not(target_os = "espidf"))]
    fn probe(&self) -> Result<(), SensorError> {
        let _ = self.addr;
        Ok(())
    }
}

impl AnalogSource for Ads1115 {
    fn sample(&mut self) -> Result<u16, SensorError> {
        self.read_single_ended(pins::ADS1115_BATT_CHANNEL)
    }
}
