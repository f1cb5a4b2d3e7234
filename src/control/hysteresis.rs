//! Dual-threshold hysteresis controller — the protection core.
//!
//! Owns the operating mode, the operator-forced output flags, and the last
//! commanded relay outputs.  Each control cycle [`HysteresisController::tick`]
//! maps a voltage sample to the next relay outputs:
//!
//! - `Manual`: outputs mirror the forced flags; voltage is ignored.
//! - `Auto`: independent hysteresis per output.  Outputs are sticky — they
//!   change only when the sample crosses outside a dead-band, never inside
//!   it, so a relay cannot chatter near a threshold boundary.
//!
//! ## Polarity convention
//!
//! `true` in [`RelayOutputs`] drives the control pin HIGH, energising the
//! cutoff relay and OPENING that current path.  `discharge: true` therefore
//! means "discharge path interrupted" (undervoltage protection engaged).
//! Verify against the actual relay wiring before deployment.

use crate::config::SystemConfig;

/// Operating mode.  Starts `Auto`; switches to `Manual` only via an accepted
/// forced-output command and back only via an explicit `AUTO` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Auto,
    Manual,
}

/// Operator-forced relay states.  Only consulted while `Mode::Manual`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedOutputs {
    pub charge: bool,
    pub discharge: bool,
}

impl Default for ForcedOutputs {
    fn default() -> Self {
        // Matches the power-on state of the original controller board.
        Self {
            charge: true,
            discharge: true,
        }
    }
}

/// Live relay drive levels — the only state with a physical side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelayOutputs {
    /// Charge-cutoff relay drive (`true` = energised = charge path open).
    pub charge: bool,
    /// Discharge-cutoff relay drive (`true` = energised = discharge path open).
    pub discharge: bool,
}

/// Protection thresholds.  Reenable values sit strictly inside the cutoff
/// band (validated by [`SystemConfig::validate`]); a zero-width band would
/// let the controller oscillate every cycle.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub v_batt_min: f32,
    pub v_batt_min_reenable: f32,
    pub v_batt_max: f32,
    pub v_batt_max_reenable: f32,
}

impl Thresholds {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            v_batt_min: config.v_batt_min,
            v_batt_min_reenable: config.v_batt_min_reenable,
            v_batt_max: config.v_batt_max,
            v_batt_max_reenable: config.v_batt_max_reenable,
        }
    }
}

/// The hysteresis state machine.
pub struct HysteresisController {
    thresholds: Thresholds,
    mode: Mode,
    forced: ForcedOutputs,
    outputs: RelayOutputs,
}

impl HysteresisController {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            mode: Mode::Auto,
            forced: ForcedOutputs::default(),
            outputs: RelayOutputs::default(),
        }
    }

    /// Compute the next relay outputs for one voltage sample.
    ///
    /// Total over its domain — no error conditions.  The caller applies the
    /// returned outputs to the physical pins; this controller never touches
    /// hardware.
    pub fn tick(&mut self, voltage: f32) -> RelayOutputs {
        match self.mode {
            Mode::Manual => {
                self.outputs = RelayOutputs {
                    charge: self.forced.charge,
                    discharge: self.forced.discharge,
                };
            }
            Mode::Auto => {
                let t = &self.thresholds;

                // Discharge path: cut off on undervoltage, release above the
                // reenable threshold, hold inside the dead-band.
                if voltage < t.v_batt_min {
                    self.outputs.discharge = true;
                } else if voltage > t.v_batt_min_reenable {
                    self.outputs.discharge = false;
                }

                // Charge path: cut off on overvoltage, release below the
                // reenable threshold, hold inside the dead-band.
                if voltage > t.v_batt_max {
                    self.outputs.charge = true;
                } else if voltage < t.v_batt_max_reenable {
                    self.outputs.charge = false;
                }
            }
        }
        self.outputs
    }

    // ── Mode / forced-state transitions ───────────────────────

    /// Switch to automatic mode.  Outputs are NOT reset — hysteresis resumes
    /// from whatever was last commanded, on the next tick.
    pub fn set_auto(&mut self) {
        self.mode = Mode::Auto;
    }

    /// Force the charge relay and enter manual mode.  Returns the updated
    /// outputs so the boundary can apply the relay immediately.
    pub fn force_charge(&mut self, on: bool) -> RelayOutputs {
        self.mode = Mode::Manual;
        self.forced.charge = on;
        self.outputs.charge = on;
        self.outputs
    }

    /// Force the discharge relay and enter manual mode.  Returns the updated
    /// outputs so the boundary can apply the relay immediately.
    pub fn force_discharge(&mut self, on: bool) -> RelayOutputs {
        self.mode = Mode::Manual;
        self.forced.discharge = on;
        self.outputs.discharge = on;
        self.outputs
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn outputs(&self) -> RelayOutputs {
        self.outputs
    }

    pub fn forced(&self) -> ForcedOutputs {
        self.forced
    }
}
