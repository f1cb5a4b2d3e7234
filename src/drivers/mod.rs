//! Hardware drivers and one-shot peripheral initialisation.

pub mod ads1115;
pub mod hw_init;
pub mod relay;
