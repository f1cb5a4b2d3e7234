//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements              | Connects to               |
//! |------------|-------------------------|---------------------------|
//! | `hardware` | VoltagePort, RelayPort  | ADS1115 (I²C), relay GPIO |
//! | `console`  | LineSource, EventSink   | Serial console (UART)     |

pub mod console;
pub mod hardware;
