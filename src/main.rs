//! BattGuard Firmware — Main Entry Point
//!
//! Boot sequence: logger → config validation → peripheral init → ADS1115
//! startup probe → control loop.  A failed probe halts cycling permanently:
//! operating the relays without voltage data would risk overcharging or
//! over-discharging the cell.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                 │
//! │                                                       │
//! │  HardwareAdapter        ConsoleLineSource             │
//! │  (Voltage+RelayPort)    ConsoleStatusSink             │
//! │                                                       │
//! │  ──────────── Port Trait Boundary ────────────        │
//! │                                                       │
//! │  ┌──────────────────────────────────────────────┐     │
//! │  │          AppService (pure logic)             │     │
//! │  │  hysteresis · voltage conversion · commands  │     │
//! │  └──────────────────────────────────────────────┘     │
//! └──────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::Result;
use log::{error, info};

use battguard::adapters::console::{ConsoleLineSource, ConsoleStatusSink};
use battguard::adapters::hardware::HardwareAdapter;
use battguard::app::events::AppEvent;
use battguard::app::ports::EventSink;
use battguard::app::service::AppService;
use battguard::config::SystemConfig;
use battguard::drivers::ads1115::Ads1115;
use battguard::drivers::hw_init;
use battguard::drivers::relay::RelayDriver;
use battguard::error::Error;
use battguard::pins;
use battguard::sensors::BatteryVoltageSensor;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("BattGuard v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration (compiled-in defaults, no persistence) ──
    let config = SystemConfig::default();
    if let Err(msg) = config.validate() {
        error!("{} — halting", Error::Config(msg));
        halt();
    }

    // ── 3. Peripherals ────────────────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        error!("HAL init failed: {} — halting", e);
        halt();
    }

    // ── 4. Analog front end startup probe ─────────────────────
    // Refuse to cycle without a working converter rather than drive
    // the relays on undefined voltage data.
    let ads = match Ads1115::new(pins::ADS1115_ADDR) {
        Ok(ads) => ads,
        Err(e) => {
            error!("{} — halting", Error::Sensor(e));
            halt();
        }
    };

    // ── 5. Adapters + service ─────────────────────────────────
    let sensor = BatteryVoltageSensor::new(ads, &config);
    let mut hw = HardwareAdapter::new(sensor, RelayDriver::new());
    let mut lines = ConsoleLineSource::spawn()?;
    let mut sink = ConsoleStatusSink::new();
    let mut app = AppService::new(&config);

    sink.emit(&AppEvent::Started);
    info!(
        "entering control loop ({} ms cycle, {} samples/reading)",
        config.control_loop_interval_ms, config.num_samples
    );

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        if let Err(e) = app.run_cycle(&mut hw, &mut lines, &mut sink) {
            // No recoverable read errors exist after a successful probe.
            error!("{} — halting", Error::Sensor(e));
            halt();
        }
        std::thread::sleep(Duration::from_millis(u64::from(
            config.control_loop_interval_ms,
        )));
    }
}

/// Stop cycling permanently.  No recovery path is defined; the operator
/// power-cycles the board after fixing the fault.
fn halt() -> ! {
    loop {
        std::thread::sleep(Duration::from_secs(1));
    }
}
