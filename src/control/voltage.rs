//! Raw-code → battery-voltage conversion.
//!
//! Pure math, no I/O.  A raw single-ended ADS1115 code is first scaled to
//! the voltage present at the converter input pin, then the resistor-divider
//! attenuation is inverted to recover the true battery voltage, and finally
//! the calibration factor corrects systematic resistor-tolerance error.
//!
//! The divider places R1 between battery-positive and the sense node and R2
//! between the sense node and ground, so `v_sense = v_batt * r2 / (r1 + r2)`.

use crate::config::SystemConfig;

/// Converts averaged raw ADC codes into battery volts.
#[derive(Debug, Clone, Copy)]
pub struct VoltageConverter {
    /// Volts per raw count at the converter input pin.
    volts_per_count: f32,
    /// Divider inversion ratio `(r1 + r2) / r2`.
    divider_gain: f32,
    calibration_factor: f32,
}

impl VoltageConverter {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            volts_per_count: config.adc_full_scale_v / config.adc_max_count,
            divider_gain: (config.r1_ohms + config.r2_ohms) / config.r2_ohms,
            calibration_factor: config.calibration_factor,
        }
    }

    /// Battery voltage for an averaged raw code.  Total — always returns a
    /// finite value for finite input.
    pub fn convert(&self, avg_raw_code: f32) -> f32 {
        avg_raw_code * self.volts_per_count * self.divider_gain * self.calibration_factor
    }

    /// Arithmetic mean of a batch of raw codes.
    pub fn average(codes: &[u16]) -> f32 {
        if codes.is_empty() {
            return 0.0;
        }
        let sum: u32 = codes.iter().map(|&c| u32::from(c)).sum();
        sum as f32 / codes.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn converter() -> VoltageConverter {
        VoltageConverter::new(&SystemConfig::default())
    }

    #[test]
    fn zero_code_is_zero_volts() {
        assert_eq!(converter().convert(0.0), 0.0);
    }

    #[test]
    fn conversion_is_proportional_to_raw_code() {
        let c = converter();
        let k = 5_000.0;
        let v1 = c.convert(k);
        let v2 = c.convert(2.0 * k);
        assert!((v2 - 2.0 * v1).abs() < 1e-4);
    }

    #[test]
    fn mid_scale_code_recovers_battery_voltage() {
        // Half of positive full scale at the pin = 2.048 V, divider gain
        // 46000/26000 → ≈3.623 V at the battery.
        let v = converter().convert(16_383.5);
        assert!((v - 2.048 * (46_000.0 / 26_000.0)).abs() < 0.005);
        assert!((v - 3.623).abs() < 0.01);
    }

    #[test]
    fn calibration_factor_scales_linearly() {
        let config = SystemConfig {
            calibration_factor: 1.02,
            ..SystemConfig::default()
        };
        let cal = VoltageConverter::new(&config);
        let plain = converter();
        let v = plain.convert(10_000.0);
        assert!((cal.convert(10_000.0) - v * 1.02).abs() < 1e-4);
    }

    #[test]
    fn average_of_codes() {
        assert_eq!(VoltageConverter::average(&[]), 0.0);
        assert_eq!(VoltageConverter::average(&[100]), 100.0);
        assert!((VoltageConverter::average(&[100, 101]) - 100.5).abs() < 1e-6);
    }
}
