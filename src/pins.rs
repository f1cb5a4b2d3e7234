//! GPIO / peripheral pin assignments for the BattGuard board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Relay control outputs
// ---------------------------------------------------------------------------
//
// Polarity convention (verify against relay wiring before deployment!):
// driving a control pin HIGH energises the corresponding cutoff relay and
// OPENS that current path.  HIGH on `PIN_DISCHARGE_CTRL` therefore means
// "discharge path interrupted" (undervoltage protection engaged).

/// Digital output: charge-cutoff relay drive (HIGH = relay energised).
pub const PIN_CHARGE_CTRL: i32 = 25;
/// Digital output: discharge-cutoff relay drive (HIGH = relay energised).
pub const PIN_DISCHARGE_CTRL: i32 = 26;

// ---------------------------------------------------------------------------
// I²C bus (ADS1115 analog front end)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// I²C bus clock. The ADS1115 supports fast mode (400 kHz).
pub const I2C_FREQ_HZ: u32 = 400_000;

// ---------------------------------------------------------------------------
// ADS1115 analog-to-digital converter
// ---------------------------------------------------------------------------

/// 7-bit I²C address (ADDR pin tied to VDD).
pub const ADS1115_ADDR: u8 = 0x49;
/// Single-ended input channel wired to the battery divider sense node.
pub const ADS1115_BATT_CHANNEL: u8 = 0;
