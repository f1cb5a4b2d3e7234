//! Serial console adapters — command input and status output.
//!
//! [`ConsoleLineSource`] reads newline-terminated commands from stdin (the
//! UART console under ESP-IDF) on a dedicated reader thread and hands
//! complete lines to the control task over a bounded channel, so the control
//! loop never blocks on input.  All controller state stays on the control
//! task; only finished lines cross the thread boundary.
//!
//! [`ConsoleStatusSink`] renders [`AppEvent`]s as the line protocol the
//! operator and the monitoring script consume.  Protocol lines are printed
//! directly (machine-parseable, stable format); diagnostics go through
//! `log` instead.

use core::fmt;
use std::io::BufRead;
use std::sync::mpsc;

use log::warn;

use crate::app::commands::Command;
use crate::app::events::{AppEvent, StatusFrame};
use crate::app::ports::{CommandLine, EventSink, LineSource};
use crate::control::hysteresis::Mode;

// ───────────────────────────────────────────────────────────────
// Line source
// ───────────────────────────────────────────────────────────────

/// Pending lines the control task has not yet drained.  The loop polls at
/// 2 Hz and an operator types far slower; excess lines are dropped.
const LINE_QUEUE_CAP: usize = 8;

pub struct ConsoleLineSource {
    rx: mpsc::Receiver<CommandLine>,
}

impl ConsoleLineSource {
    /// Spawn the stdin reader thread.
    pub fn spawn() -> std::io::Result<Self> {
        let (tx, rx) = mpsc::sync_channel::<CommandLine>(LINE_QUEUE_CAP);

        std::thread::Builder::new()
            .name("console-rx".into())
            .spawn(move || {
                let stdin = std::io::stdin();
                let mut buf = String::new();
                loop {
                    buf.clear();
                    match stdin.lock().read_line(&mut buf) {
                        Ok(0) => break, // EOF — console detached
                        Ok(_) => {
                            let mut line = CommandLine::new();
                            for ch in buf.trim_end_matches(['\r', '\n']).chars() {
                                if line.push(ch).is_err() {
                                    // Oversize line: truncated copy will be
                                    // rejected by the parser.
                                    break;
                                }
                            }
                            if tx.try_send(line).is_err() {
                                warn!("command dropped: line queue full");
                            }
                        }
                        Err(e) => {
                            warn!("console read error: {e}");
                            break;
                        }
                    }
                }
            })?;

        Ok(Self { rx })
    }
}

impl LineSource for ConsoleLineSource {
    fn poll_line(&mut self) -> Option<CommandLine> {
        self.rx.try_recv().ok()
    }
}

// ───────────────────────────────────────────────────────────────
// Status sink
// ───────────────────────────────────────────────────────────────

/// Renders a [`StatusFrame`] as one status line.
///
/// The format is an external contract — the monitoring script greps these
/// lines — so it lives in a displayable type the tests can pin down, not
/// inline in the print call.
struct StatusLine<'a>(&'a StatusFrame);

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        let mode = match s.mode {
            Mode::Auto => "AUTO",
            Mode::Manual => "MANUAL",
        };
        write!(
            f,
            "Vbat: {:.3} V | Mode: {} | Charge: {} | Disch: {}",
            s.voltage_v,
            mode,
            if s.outputs.charge { "ON" } else { "OFF" },
            if s.outputs.discharge { "ON" } else { "OFF" },
        )
    }
}

/// Operator acknowledgement printed for an accepted command.
fn ack_message(cmd: Command) -> &'static str {
    match cmd {
        Command::Auto => "Automatic mode enabled.",
        Command::ChargeOn => "Manual mode: charge forced ON.",
        Command::ChargeOff => "Manual mode: charge forced OFF.",
        Command::DischargeOn => "Manual mode: discharge forced ON.",
        Command::DischargeOff => "Manual mode: discharge forced OFF.",
    }
}

/// Adapter that prints every [`AppEvent`] as a serial protocol line.
pub struct ConsoleStatusSink;

impl ConsoleStatusSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for ConsoleStatusSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Status(s) => println!("{}", StatusLine(s)),
            AppEvent::CommandApplied(cmd) => println!("{}", ack_message(*cmd)),
            AppEvent::CommandRejected => println!("Invalid command."),
            AppEvent::Started => {
                println!("System started.");
                println!("Commands: AUTO | CHARGE ON | CHARGE OFF | DISCH ON | DISCH OFF");
            }
        }
    }
}
