//! Protection control logic — pure, hardware-free.

pub mod hysteresis;
pub mod voltage;
