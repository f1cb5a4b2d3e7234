//! Hardware adapter — bridges real peripherals to the domain port traits.
//!
//! Owns the battery voltage sensor and the relay driver, exposing them
//! through [`VoltagePort`] and [`RelayPort`].  This is the only module that
//! touches actual hardware; on non-espidf targets the underlying drivers
//! use cfg-gated simulation stubs.

use crate::app::ports::{RelayPort, VoltagePort};
use crate::drivers::relay::RelayDriver;
use crate::error::SensorError;
use crate::sensors::{AnalogSource, BatteryVoltageSensor};

/// Concrete adapter combining the analog front end and relay outputs.
pub struct HardwareAdapter<A: AnalogSource> {
    sensor: BatteryVoltageSensor<A>,
    relays: RelayDriver,
}

impl<A: AnalogSource> HardwareAdapter<A> {
    pub fn new(sensor: BatteryVoltageSensor<A>, relays: RelayDriver) -> Self {
        Self { sensor, relays }
    }
}

impl<A: AnalogSource> VoltagePort for HardwareAdapter<A> {
    fn read_voltage(&mut self) -> Result<f32, SensorError> {
        self.sensor.read()
    }
}

impl<A: AnalogSource> RelayPort for HardwareAdapter<A> {
    fn set_charge(&mut self, energised: bool) {
        self.relays.set_charge(energised);
    }

    fn set_discharge(&mut self, energised: bool) {
        self.relays.set_discharge(energised);
    }
}
