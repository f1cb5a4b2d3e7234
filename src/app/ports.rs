//! Port traits — the boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (the ADS1115 front end, relay GPIOs, the serial console)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.

use crate::error::SensorError;

/// Maximum accepted command-line length.  Generous — the longest valid
/// command is 10 bytes; anything longer is junk the parser rejects.
pub const MAX_LINE_LEN: usize = 64;

/// A single command line as handed over by the input adapter.
pub type CommandLine = heapless::String<MAX_LINE_LEN>;

// ───────────────────────────────────────────────────────────────
// Voltage port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle to obtain an
/// averaged battery-voltage sample.
pub trait VoltagePort {
    /// One averaged battery voltage reading, in volts.
    ///
    /// After a successful startup probe this has no failure path; an error
    /// here means the front end was never initialised.
    fn read_voltage(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive the two cutoff relays.
///
/// `true` = control pin HIGH = relay energised = current path OPEN.  See the
/// polarity note in [`crate::control::hysteresis::RelayOutputs`].
pub trait RelayPort {
    fn set_charge(&mut self, energised: bool);
    fn set_discharge(&mut self, energised: bool);
}

// ───────────────────────────────────────────────────────────────
// Line source (driven adapter: operator input → domain)
// ───────────────────────────────────────────────────────────────

/// Polls for at most one pending newline-terminated command.
///
/// Must never block: the control cycle checks for input exactly once per
/// tick and moves on.
pub trait LineSource {
    fn poll_line(&mut self) -> Option<CommandLine>;
}

// ───────────────────────────────────────────────────────────────
// Event sink (driven adapter: domain → console / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  The console adapter renders them as the serial
/// protocol lines; a test sink records them.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
