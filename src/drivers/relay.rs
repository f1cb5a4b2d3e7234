//! Cutoff relay output driver.
//!
//! Two digital outputs, one per relay.  Dumb actuator — the hysteresis
//! controller decides, this driver only drives pins and caches the last
//! commanded levels.
//!
//! Polarity: HIGH energises the relay, which OPENS the corresponding
//! current path (see [`crate::pins`]).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct RelayDriver {
    charge: bool,
    discharge: bool,
}

impl RelayDriver {
    /// Both relays start de-energised, matching the boot state set by
    /// `hw_init::init_peripherals`.
    pub fn new() -> Self {
        Self {
            charge: false,
            discharge: false,
        }
    }

    pub fn set_charge(&mut self, energised: bool) {
        hw_init::gpio_write(pins::PIN_CHARGE_CTRL, energised);
        self.charge = energised;
    }

    pub fn set_discharge(&mut self, energised: bool) {
        hw_init::gpio_write(pins::PIN_DISCHARGE_CTRL, energised);
        self.discharge = energised;
    }

    pub fn charge(&self) -> bool {
        self.charge
    }

    pub fn discharge(&self) -> bool {
        self.discharge
    }
}
