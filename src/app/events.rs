//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The console adapter on the
//! other side renders them as the serial protocol lines the operator (and
//! the monitoring script) consumes.

use super::commands::Command;
use crate::control::hysteresis::{Mode, RelayOutputs};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Per-cycle status snapshot.
    Status(StatusFrame),

    /// An operator command was accepted and applied.
    CommandApplied(Command),

    /// An input line was not a recognised command; nothing changed.
    CommandRejected,

    /// The controller finished startup and is about to begin cycling.
    Started,
}

/// A point-in-time status snapshot, rendered once per control cycle as
/// `Vbat: <v> V | Mode: <AUTO|MANUAL> | Charge: <ON|OFF> | Disch: <ON|OFF>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusFrame {
    pub voltage_v: f32,
    pub mode: Mode,
    pub outputs: RelayOutputs,
}
