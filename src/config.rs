//! System configuration parameters
//!
//! All tunable parameters for the BattGuard controller: voltage-divider
//! values, protection thresholds, calibration, and loop timing.  There is no
//! persistence — the compiled-in defaults are the running configuration.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Voltage divider ---
    /// Divider resistor between battery-positive and the ADC sense node (Ω).
    pub r1_ohms: f32,
    /// Divider resistor between the ADC sense node and ground (Ω).
    pub r2_ohms: f32,

    // --- Protection thresholds ---
    /// Below this the discharge path is cut off (V).
    pub v_batt_min: f32,
    /// Above this a discharge cutoff is released (V).
    pub v_batt_min_reenable: f32,
    /// Above this the charge path is cut off (V).
    pub v_batt_max: f32,
    /// Below this a charge cutoff is released (V).
    pub v_batt_max_reenable: f32,

    // --- Calibration ---
    /// Multiplier correcting systematic resistor-tolerance error.
    /// 1.0 = no correction. Not mutable via serial commands.
    pub calibration_factor: f32,

    // --- ADC scaling ---
    /// Full-scale input voltage of the ADS1115 at the configured gain (V).
    pub adc_full_scale_v: f32,
    /// Positive full-scale raw code of the ADS1115 (15-bit single-ended).
    pub adc_max_count: f32,

    // --- Sampling ---
    /// Raw codes averaged per voltage reading.
    pub num_samples: u32,
    /// Delay between consecutive raw samples (milliseconds).
    pub sample_interval_ms: u32,

    // --- Timing ---
    /// Control loop interval (milliseconds).
    pub control_loop_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Divider
            r1_ohms: 20_000.0,
            r2_ohms: 26_000.0,

            // Thresholds (single Li-ion cell)
            v_batt_min: 3.0,
            v_batt_min_reenable: 3.05,
            v_batt_max: 4.2,
            v_batt_max_reenable: 4.15,

            // Calibration
            calibration_factor: 1.0,

            // ADS1115 at GAIN_ONE: ±4.096 V FSR, 15 usable bits single-ended
            adc_full_scale_v: 4.096,
            adc_max_count: 32_767.0,

            // Sampling
            num_samples: 10,
            sample_interval_ms: 5,

            // Timing
            control_loop_interval_ms: 500, // 2 Hz
        }
    }
}

impl SystemConfig {
    /// Validate the hysteresis and divider invariants.
    ///
    /// Each reenable threshold must sit strictly inside its cutoff band,
    /// otherwise the controller can toggle a relay every cycle.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.v_batt_min >= self.v_batt_min_reenable {
            return Err("v_batt_min must be strictly below v_batt_min_reenable");
        }
        if self.v_batt_max_reenable >= self.v_batt_max {
            return Err("v_batt_max_reenable must be strictly below v_batt_max");
        }
        if self.v_batt_min_reenable >= self.v_batt_max_reenable {
            return Err("hysteresis bands must not overlap");
        }
        if self.r1_ohms <= 0.0 || self.r2_ohms <= 0.0 {
            return Err("divider resistances must be positive");
        }
        if self.calibration_factor <= 0.0 {
            return Err("calibration factor must be positive");
        }
        if self.num_samples == 0 {
            return Err("num_samples must be at least 1");
        }
        // At the 5 ms spacing, 1000 samples already stretch one reading to
        // 5 s, ten times the control cycle.
        if self.num_samples > 1_000 {
            return Err("num_samples must be at most 1000");
        }
        if self.control_loop_interval_ms == 0 {
            return Err("control loop interval must be non-zero");
        }
        Ok(())
    }
}
