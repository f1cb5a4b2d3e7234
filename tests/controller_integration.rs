//! Integration tests: AppService → hysteresis controller → relay port.

use std::collections::VecDeque;

use battguard::app::commands::Command;
use battguard::app::events::AppEvent;
use battguard::app::ports::{CommandLine, EventSink, LineSource, RelayPort, VoltagePort};
use battguard::app::service::AppService;
use battguard::config::SystemConfig;
use battguard::control::hysteresis::Mode;
use battguard::error::SensorError;

// ── Mock implementations ──────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RelayCall {
    Charge(bool),
    Discharge(bool),
}

struct MockHw {
    voltage: f32,
    calls: Vec<RelayCall>,
    charge: bool,
    discharge: bool,
}

impl MockHw {
    fn new(voltage: f32) -> Self {
        Self {
            voltage,
            calls: Vec::new(),
            charge: false,
            discharge: false,
        }
    }
}

impl VoltagePort for MockHw {
    fn read_voltage(&mut self) -> Result<f32, SensorError> {
        Ok(self.voltage)
    }
}

impl RelayPort for MockHw {
    fn set_charge(&mut self, energised: bool) {
        self.charge = energised;
        self.calls.push(RelayCall::Charge(energised));
    }

    fn set_discharge(&mut self, energised: bool) {
        self.discharge = energised;
        self.calls.push(RelayCall::Discharge(energised));
    }
}

struct ScriptedLines {
    lines: VecDeque<CommandLine>,
}

impl ScriptedLines {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|s| line(s)).collect(),
        }
    }

    fn empty() -> Self {
        Self {
            lines: VecDeque::new(),
        }
    }
}

impl LineSource for ScriptedLines {
    fn poll_line(&mut self) -> Option<CommandLine> {
        self.lines.pop_front()
    }
}

struct RecordingSink {
    events: Vec<AppEvent>,
}

impl RecordingSink {
    fn new() -> Self {
        Self { events: Vec::new() }
    }

    fn last_status(&self) -> &battguard::app::events::StatusFrame {
        self.events
            .iter()
            .rev()
            .find_map(|e| match e {
                AppEvent::Status(s) => Some(s),
                _ => None,
            })
            .expect("no status frame emitted")
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

fn line(s: &str) -> CommandLine {
    let mut l = CommandLine::new();
    l.push_str(s).unwrap();
    l
}

fn service() -> AppService {
    AppService::new(&SystemConfig::default())
}

// ── Automatic mode ────────────────────────────────────────────

#[test]
fn nominal_voltage_keeps_both_relays_released() {
    let mut app = service();
    let mut hw = MockHw::new(3.627);
    let mut sink = RecordingSink::new();

    app.run_cycle(&mut hw, &mut ScriptedLines::empty(), &mut sink)
        .unwrap();

    assert!(!hw.charge);
    assert!(!hw.discharge);
    let status = sink.last_status();
    assert_eq!(status.mode, Mode::Auto);
    assert!((status.voltage_v - 3.627).abs() < 1e-6);
}

#[test]
fn undervoltage_engages_discharge_cutoff() {
    let mut app = service();
    let mut hw = MockHw::new(2.9);
    let mut sink = RecordingSink::new();

    app.run_cycle(&mut hw, &mut ScriptedLines::empty(), &mut sink)
        .unwrap();

    assert!(hw.discharge, "discharge cutoff must engage below 3.0 V");
    assert!(!hw.charge);
}

#[test]
fn discharge_cutoff_holds_through_deadband_then_releases() {
    let mut app = service();
    let mut lines = ScriptedLines::empty();
    let mut sink = RecordingSink::new();

    let mut hw = MockHw::new(2.9);
    app.run_cycle(&mut hw, &mut lines, &mut sink).unwrap();
    assert!(hw.discharge);

    // Inside the dead-band the relay must not move.
    hw.voltage = 3.02;
    app.run_cycle(&mut hw, &mut lines, &mut sink).unwrap();
    assert!(hw.discharge);

    hw.voltage = 3.1;
    app.run_cycle(&mut hw, &mut lines, &mut sink).unwrap();
    assert!(!hw.discharge);
}

#[test]
fn overvoltage_engages_charge_cutoff() {
    let mut app = service();
    let mut hw = MockHw::new(4.25);
    let mut sink = RecordingSink::new();

    app.run_cycle(&mut hw, &mut ScriptedLines::empty(), &mut sink)
        .unwrap();

    assert!(hw.charge, "charge cutoff must engage above 4.2 V");
    assert!(!hw.discharge);
}

// ── Commands ──────────────────────────────────────────────────

#[test]
fn disch_off_switches_to_manual_and_drops_relay_immediately() {
    let mut app = service();
    let mut hw = MockHw::new(2.5); // deep undervoltage
    let mut lines = ScriptedLines::new(&["DISCH OFF"]);
    let mut sink = RecordingSink::new();

    app.run_cycle(&mut hw, &mut lines, &mut sink).unwrap();

    // Despite the undervoltage, the forced-off discharge relay stays off.
    assert_eq!(app.mode(), Mode::Manual);
    assert!(!hw.discharge);
    assert!(sink
        .events
        .contains(&AppEvent::CommandApplied(Command::DischargeOff)));

    // The same cycle's status line reflects the command.
    let status = sink.last_status();
    assert_eq!(status.mode, Mode::Manual);
    assert!(!status.outputs.discharge);
}

#[test]
fn command_writes_relay_before_the_tick() {
    let mut app = service();
    let mut hw = MockHw::new(3.6);
    let mut sink = RecordingSink::new();

    app.handle_line("CHARGE ON", &mut hw, &mut sink);

    // Applied immediately, without a run_cycle.
    assert_eq!(hw.calls, vec![RelayCall::Charge(true)]);
    assert!(hw.charge);
    assert_eq!(app.mode(), Mode::Manual);
}

#[test]
fn manual_mode_ignores_voltage_samples() {
    let mut app = service();
    let mut hw = MockHw::new(3.6);
    let mut lines = ScriptedLines::new(&["CHARGE OFF", "DISCH OFF"]);
    let mut sink = RecordingSink::new();

    // One command per cycle; two cycles drain the script.
    app.run_cycle(&mut hw, &mut lines, &mut sink).unwrap();
    app.run_cycle(&mut hw, &mut lines, &mut sink).unwrap();
    assert_eq!(app.mode(), Mode::Manual);

    // Sweep extreme voltages: no sample may move either relay.
    for v in [0.0, 2.0, 3.0, 4.3, 5.0] {
        hw.voltage = v;
        app.run_cycle(&mut hw, &mut ScriptedLines::empty(), &mut sink)
            .unwrap();
        assert!(!hw.charge, "charge moved at {v} V in manual mode");
        assert!(!hw.discharge, "discharge moved at {v} V in manual mode");
    }
}

#[test]
fn auto_command_resumes_hysteresis_without_reset() {
    let mut app = service();
    let mut hw = MockHw::new(3.6);
    let mut sink = RecordingSink::new();

    app.handle_line("DISCH ON", &mut hw, &mut sink);
    assert!(hw.discharge);

    app.handle_line("AUTO", &mut hw, &mut sink);
    assert_eq!(app.mode(), Mode::Auto);
    // AUTO performs no immediate relay write.
    assert_eq!(hw.calls, vec![RelayCall::Discharge(true)]);

    // 3.02 V sits inside the dead-band: the last commanded state holds.
    hw.voltage = 3.02;
    app.run_cycle(&mut hw, &mut ScriptedLines::empty(), &mut sink)
        .unwrap();
    assert!(hw.discharge);

    // A genuine crossing releases it.
    hw.voltage = 3.2;
    app.run_cycle(&mut hw, &mut ScriptedLines::empty(), &mut sink)
        .unwrap();
    assert!(!hw.discharge);
}

#[test]
fn unrecognised_line_changes_nothing() {
    let mut app = service();
    let mut hw = MockHw::new(3.627);
    let mut sink = RecordingSink::new();

    app.run_cycle(&mut hw, &mut ScriptedLines::empty(), &mut sink)
        .unwrap();
    let charge_before = hw.charge;
    let discharge_before = hw.discharge;

    let mut lines = ScriptedLines::new(&["FOO"]);
    app.run_cycle(&mut hw, &mut lines, &mut sink).unwrap();

    assert!(sink.events.contains(&AppEvent::CommandRejected));
    assert_eq!(app.mode(), Mode::Auto);
    assert_eq!(hw.charge, charge_before);
    assert_eq!(hw.discharge, discharge_before);
}

#[test]
fn cycle_count_tracks_completed_cycles() {
    let mut app = service();
    let mut hw = MockHw::new(3.6);
    let mut sink = RecordingSink::new();

    assert_eq!(app.cycle_count(), 0);
    for _ in 0..3 {
        app.run_cycle(&mut hw, &mut ScriptedLines::empty(), &mut sink)
            .unwrap();
    }
    assert_eq!(app.cycle_count(), 3);
}

#[test]
fn at_most_one_command_consumed_per_cycle() {
    let mut app = service();
    let mut hw = MockHw::new(3.6);
    let mut lines = ScriptedLines::new(&["CHARGE ON", "AUTO"]);
    let mut sink = RecordingSink::new();

    app.run_cycle(&mut hw, &mut lines, &mut sink).unwrap();
    assert_eq!(app.mode(), Mode::Manual);

    app.run_cycle(&mut hw, &mut lines, &mut sink).unwrap();
    assert_eq!(app.mode(), Mode::Auto);
}

// ── Full hardware stack on the host simulator ─────────────────

#[cfg(not(target_os = "espidf"))]
#[test]
fn simulated_adc_reads_through_the_whole_stack() {
    use battguard::adapters::hardware::HardwareAdapter;
    use battguard::drivers::ads1115::{Ads1115, sim_set_raw_code};
    use battguard::drivers::relay::RelayDriver;
    use battguard::pins;
    use battguard::sensors::BatteryVoltageSensor;

    let config = SystemConfig {
        sample_interval_ms: 0, // no sleeping in tests
        ..SystemConfig::default()
    };

    // Mid-scale code → ≈3.623 V, comfortably inside both dead-bands.
    sim_set_raw_code(16_384);

    let ads = Ads1115::new(pins::ADS1115_ADDR).unwrap();
    let sensor = BatteryVoltageSensor::new(ads, &config);
    let mut hw = HardwareAdapter::new(sensor, RelayDriver::new());
    let mut app = AppService::new(&config);
    let mut sink = RecordingSink::new();

    app.run_cycle(&mut hw, &mut ScriptedLines::empty(), &mut sink)
        .unwrap();

    let status = sink.last_status();
    assert!((status.voltage_v - 3.624).abs() < 0.01);
    assert!(!status.outputs.charge);
    assert!(!status.outputs.discharge);
    assert_eq!(status.mode, Mode::Auto);
}
