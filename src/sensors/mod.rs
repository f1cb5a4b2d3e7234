//! Sensor subsystem — the battery voltage front end.

pub mod battery;

pub use battery::{AnalogSource, BatteryVoltageSensor};
