//! Serial command grammar.
//!
//! Five commands, case-insensitive after trimming surrounding whitespace:
//! `AUTO`, `CHARGE ON`, `CHARGE OFF`, `DISCH ON`, `DISCH OFF`.  Anything
//! else is rejected without touching any state.

/// A recognised operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Return to automatic hysteresis control.
    Auto,
    /// Enter manual mode and energise the charge-cutoff relay.
    ChargeOn,
    /// Enter manual mode and de-energise the charge-cutoff relay.
    ChargeOff,
    /// Enter manual mode and energise the discharge-cutoff relay.
    DischargeOn,
    /// Enter manual mode and de-energise the discharge-cutoff relay.
    DischargeOff,
}

impl Command {
    /// Parse one input line.  `None` means the line is not a command; the
    /// boundary reports the rejection to the operator.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        // Longest valid command is 10 bytes; bail before uppercasing
        // arbitrary junk.
        if trimmed.is_empty() || trimmed.len() > 10 {
            return None;
        }
        let mut upper = heapless::String::<10>::new();
        for ch in trimmed.chars() {
            upper.push(ch.to_ascii_uppercase()).ok()?;
        }
        match upper.as_str() {
            "AUTO" => Some(Self::Auto),
            "CHARGE ON" => Some(Self::ChargeOn),
            "CHARGE OFF" => Some(Self::ChargeOff),
            "DISCH ON" => Some(Self::DischargeOn),
            "DISCH OFF" => Some(Self::DischargeOff),
            _ => None,
        }
    }
}
