//! Application service — cycle orchestration over the port traits.
//!
//! [`AppService`] owns the hysteresis controller and runs one full control
//! cycle per call: sample voltage → handle pending command → controller tick
//! → apply relays → emit status.  All I/O flows through injected ports, so
//! the whole service runs against mocks on the host.
//!
//! ```text
//!  VoltagePort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!  LineSource  ──▶ │       AppService        │
//!    RelayPort ◀── │  hysteresis · commands  │
//!                  └────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::SystemConfig;
use crate::control::hysteresis::{HysteresisController, Mode, RelayOutputs, Thresholds};
use crate::error::SensorError;

use super::commands::Command;
use super::events::{AppEvent, StatusFrame};
use super::ports::{EventSink, LineSource, RelayPort, VoltagePort};

/// The application service orchestrates the protection logic.
pub struct AppService {
    controller: HysteresisController,
    cycle_count: u64,
}

impl AppService {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            controller: HysteresisController::new(Thresholds::from_config(config)),
            cycle_count: 0,
        }
    }

    // ── Per-cycle orchestration ───────────────────────────────
    //
    // Command handling runs between sampling and the tick so that a
    // just-issued manual command is reflected in the same cycle's status
    // line.

    /// Run one full control cycle.  The inter-cycle wait lives in `main`,
    /// not here.
    ///
    /// The `hw` parameter satisfies **both** [`VoltagePort`] and
    /// [`RelayPort`] — this avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl VoltagePort + RelayPort),
        lines: &mut impl LineSource,
        sink: &mut impl EventSink,
    ) -> Result<(), SensorError> {
        self.cycle_count += 1;

        // 1. Acquire an averaged voltage sample.
        let voltage = hw.read_voltage()?;
        debug!("cycle {}: {:.3} V", self.cycle_count, voltage);

        // 2. At most one pending command per cycle.
        if let Some(line) = lines.poll_line() {
            self.handle_line(&line, hw, sink);
        }

        // 3. Controller tick (pure state logic).
        let outputs = self.controller.tick(voltage);

        // 4. Apply relay outputs.
        Self::apply_relays(hw, outputs);

        // 5. Status frame.
        sink.emit(&AppEvent::Status(StatusFrame {
            voltage_v: voltage,
            mode: self.controller.mode(),
            outputs,
        }));

        Ok(())
    }

    // ── Command handling ──────────────────────────────────────

    /// Interpret one input line and apply its effect.
    ///
    /// Forced-output commands write the affected relay immediately rather
    /// than waiting for the next tick.  `AUTO` performs no relay write —
    /// hysteresis resumes from the last commanded outputs.
    pub fn handle_line(&mut self, line: &str, hw: &mut impl RelayPort, sink: &mut impl EventSink) {
        let Some(cmd) = Command::parse(line) else {
            warn!("rejected command line: {:?}", line.trim());
            sink.emit(&AppEvent::CommandRejected);
            return;
        };

        match cmd {
            Command::Auto => {
                self.controller.set_auto();
            }
            Command::ChargeOn => {
                self.controller.force_charge(true);
                hw.set_charge(true);
            }
            Command::ChargeOff => {
                self.controller.force_charge(false);
                hw.set_charge(false);
            }
            Command::DischargeOn => {
                self.controller.force_discharge(true);
                hw.set_discharge(true);
            }
            Command::DischargeOff => {
                self.controller.force_discharge(false);
                hw.set_discharge(false);
            }
        }
        info!("command applied: {:?}", cmd);
        sink.emit(&AppEvent::CommandApplied(cmd));
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current operating mode.
    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    /// Last commanded relay outputs.
    pub fn outputs(&self) -> RelayOutputs {
        self.controller.outputs()
    }

    /// Total control cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_relays(hw: &mut impl RelayPort, outputs: RelayOutputs) {
        hw.set_charge(outputs.charge);
        hw.set_discharge(outputs.discharge);
    }
}
