//! Battery voltage sensor — N-sample averaging over an analog source.
//!
//! Owns the conversion math and the sampling policy (how many raw codes per
//! reading, how far apart).  The ADC itself sits behind [`AnalogSource`] so
//! the sensor can run against the real ADS1115 driver or a test fake.

use crate::config::SystemConfig;
use crate::control::voltage::VoltageConverter;
use crate::error::SensorError;

/// Narrow seam to the analog-to-digital converter: one raw single-ended
/// code per call.  Implemented by the ADS1115 driver and by test fakes.
pub trait AnalogSource {
    fn sample(&mut self) -> Result<u16, SensorError>;
}

/// Averages `num_samples` raw codes (spaced `sample_interval_ms` apart to
/// smooth high-frequency noise) and converts the mean to battery volts.
pub struct BatteryVoltageSensor<A: AnalogSource> {
    source: A,
    converter: VoltageConverter,
    num_samples: u32,
    sample_interval_ms: u32,
}

impl<A: AnalogSource> BatteryVoltageSensor<A> {
    pub fn new(source: A, config: &SystemConfig) -> Self {
        Self {
            source,
            converter: VoltageConverter::new(config),
            num_samples: config.num_samples.max(1),
            sample_interval_ms: config.sample_interval_ms,
        }
    }

    /// One averaged battery-voltage reading.
    ///
    /// Blocks for roughly `num_samples * sample_interval_ms`.  The control
    /// loop is strictly sequential, so this delay is deliberate noise
    /// averaging, not incidental.
    pub fn read(&mut self) -> Result<f32, SensorError> {
        // u64 cannot overflow: even u32::MAX full-scale samples fit.
        let mut sum: u64 = 0;
        for i in 0..self.num_samples {
            sum += u64::from(self.source.sample()?);
            if i + 1 < self.num_samples && self.sample_interval_ms > 0 {
                std::thread::sleep(std::time::Duration::from_millis(
                    u64::from(self.sample_interval_ms),
                ));
            }
        }
        let avg = sum as f32 / self.num_samples as f32;
        Ok(self.converter.convert(avg))
    }
}
