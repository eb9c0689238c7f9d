//! Two-button internet-radio control simulator.
//!
//! The classic demo for the engine: one automaton distinguishes short
//! presses (nudge the volume once), long holds (ramp the volume on a
//! repeat timer) and near-simultaneous presses of both buttons (toggle
//! play/pause), all from four raw GPIO-style edge events.
//!
//! Prints the machine as Graphviz DOT at startup, then replays a scripted
//! button sequence and prints the resulting status line after every
//! transition. An optional first CLI argument names a JSON config file.

use core::fmt;
use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam::channel::{self, Sender};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use timedfa::{Automaton, ControlLoop, RuntimeConfig, StateChangeListener, Trigger};

// ── States and events ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RadioState {
    Idle,
    VolumeUpOrToggle,
    VolumeDownOrToggle,
    VolumeUp,
    VolumeDown,
    NudgeUp,
    NudgeDown,
    TogglePlayPause,
}

impl fmt::Display for RadioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::VolumeUpOrToggle => "volume_up_or_toggle",
            Self::VolumeDownOrToggle => "volume_down_or_toggle",
            Self::VolumeUp => "volume_up",
            Self::VolumeDown => "volume_down",
            Self::NudgeUp => "nudge_up",
            Self::NudgeDown => "nudge_down",
            Self::TogglePlayPause => "toggle_play_pause",
        };
        f.write_str(name)
    }
}

/// Raw edge events from the two volume buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Button {
    UpPressed,
    UpReleased,
    DownPressed,
    DownReleased,
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UpPressed => "volume+pressed",
            Self::UpReleased => "volume+released",
            Self::DownPressed => "volume-pressed",
            Self::DownReleased => "volume-released",
        };
        f.write_str(name)
    }
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RadioConfig {
    /// Window in which the second button still counts as "both at once"
    /// and a release still counts as a nudge (ms).
    same_time_threshold_ms: u64,
    /// Volume step interval while a button stays held (ms).
    repeat_interval_ms: u64,
    min_volume: u8,
    max_volume: u8,
    /// Control loop poll cadence (ms).
    poll_interval_ms: u64,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            same_time_threshold_ms: 300,
            repeat_interval_ms: 500,
            min_volume: 1,
            max_volume: 11,
            poll_interval_ms: 100,
        }
    }
}

fn load_config() -> Result<RadioConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            let config = serde_json::from_str(&text)
                .with_context(|| format!("parsing config file {path}"))?;
            Ok(config)
        }
        None => Ok(RadioConfig::default()),
    }
}

// ── Radio status and listeners ───────────────────────────────────────

#[derive(Debug)]
struct RadioStatus {
    volume: u8,
    playing: bool,
}

/// Applies volume and play/pause effects on state entry.
struct VolumeControl {
    status: Rc<RefCell<RadioStatus>>,
    min: u8,
    max: u8,
}

impl StateChangeListener<RadioState, Button> for VolumeControl {
    fn on_transition(&mut self, _from: &RadioState, to: &RadioState, _trigger: &Trigger<Button>) {
        let mut status = self.status.borrow_mut();
        match to {
            RadioState::VolumeUp | RadioState::NudgeUp => {
                status.volume = status.volume.saturating_add(1).min(self.max);
            }
            RadioState::VolumeDown | RadioState::NudgeDown => {
                status.volume = status.volume.saturating_sub(1).max(self.min);
            }
            RadioState::TogglePlayPause => status.playing = !status.playing,
            _ => {}
        }
    }
}

/// Prints the status line after every transition, like a front panel.
struct StatusPrinter {
    status: Rc<RefCell<RadioStatus>>,
}

impl StateChangeListener<RadioState, Button> for StatusPrinter {
    fn on_transition(&mut self, _from: &RadioState, to: &RadioState, _trigger: &Trigger<Button>) {
        let status = self.status.borrow();
        println!(
            "Playing: {}, Volume: {}, State: {}",
            status.playing, status.volume, to
        );
    }
}

// ── Automaton wiring ─────────────────────────────────────────────────

fn build_automaton(config: &RadioConfig) -> Result<Automaton<RadioState, Button>> {
    use Button::*;
    use RadioState::*;

    let same_time = Duration::from_millis(config.same_time_threshold_ms);
    let repeat = Duration::from_millis(config.repeat_interval_ms);

    let mut tfa = Automaton::new(Idle);
    for state in [
        VolumeUp,
        VolumeDown,
        NudgeUp,
        NudgeDown,
        VolumeUpOrToggle,
        VolumeDownOrToggle,
        TogglePlayPause,
    ] {
        tfa.add_state(state)?;
    }

    // Waiting for either a volume change or a play/pause toggle.
    tfa.add_transition(Idle, VolumeUpOrToggle, Trigger::Event(UpPressed))?;
    tfa.add_transition(Idle, VolumeDownOrToggle, Trigger::Event(DownPressed))?;

    // Held past the window: commit to volume mode, then re-enter on the
    // repeat timer for as long as the button stays down.
    tfa.add_transition(VolumeUpOrToggle, VolumeUp, Trigger::After(same_time))?;
    tfa.add_transition(VolumeDownOrToggle, VolumeDown, Trigger::After(same_time))?;
    tfa.add_transition(VolumeUp, VolumeUp, Trigger::After(repeat))?;
    tfa.add_transition(VolumeDown, VolumeDown, Trigger::After(repeat))?;
    tfa.add_transition(VolumeUp, Idle, Trigger::Event(UpReleased))?;
    tfa.add_transition(VolumeDown, Idle, Trigger::Event(DownReleased))?;

    // Released inside the window: nudge the volume once instead.
    tfa.add_transition(VolumeUpOrToggle, NudgeUp, Trigger::Event(UpReleased))?;
    tfa.add_transition(NudgeUp, Idle, Trigger::Epsilon)?;
    tfa.add_transition(VolumeDownOrToggle, NudgeDown, Trigger::Event(DownReleased))?;
    tfa.add_transition(NudgeDown, Idle, Trigger::Epsilon)?;

    // The other button inside the window: toggle play/pause and settle.
    tfa.add_transition(VolumeUpOrToggle, TogglePlayPause, Trigger::Event(DownPressed))?;
    tfa.add_transition(VolumeDownOrToggle, TogglePlayPause, Trigger::Event(UpPressed))?;
    tfa.add_transition(TogglePlayPause, Idle, Trigger::Epsilon)?;

    Ok(tfa)
}

// ── Scripted button producer ─────────────────────────────────────────

/// The demo script: one nudge up, hold volume+ to the ceiling, hold
/// volume− back to the floor, then both buttons for play/pause.
fn simulate_button_presses(tx: &Sender<Button>) {
    use Button::*;

    let press = |event| {
        let _ = tx.send(event);
    };

    thread::sleep(Duration::from_secs(1));
    press(UpPressed);
    press(UpReleased);
    thread::sleep(Duration::from_secs(3));

    press(UpPressed);
    thread::sleep(Duration::from_secs(7));
    press(UpReleased);

    press(DownPressed);
    thread::sleep(Duration::from_secs(7));
    press(DownReleased);

    press(DownPressed);
    thread::sleep(Duration::from_millis(100));
    press(UpPressed);
    press(DownReleased);
    press(UpReleased);
}

fn main() -> Result<()> {
    env_logger::init();
    info!("radiosim {}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    info!("config: {config:?}");

    let status = Rc::new(RefCell::new(RadioStatus {
        volume: config.min_volume,
        playing: true,
    }));

    let mut tfa = build_automaton(&config)?;
    tfa.add_listener(VolumeControl {
        status: Rc::clone(&status),
        min: config.min_volume,
        max: config.max_volume,
    });
    tfa.add_listener(StatusPrinter { status: Rc::clone(&status) });

    // Pipe through `dot -Tpng` to render the control graph.
    println!("{}", tfa.dot());

    let (tx, rx) = channel::unbounded();
    let producer = thread::spawn(move || simulate_button_presses(&tx));

    let runtime = RuntimeConfig {
        poll_interval_ms: config.poll_interval_ms,
        ..RuntimeConfig::default()
    };
    let mut control = ControlLoop::new(tfa, rx, &runtime);
    control.run()?;

    if producer.join().is_err() {
        warn!("button producer thread panicked");
    }

    let final_status = status.borrow();
    info!(
        "final status: volume {}, playing {}",
        final_status.volume, final_status.playing
    );
    Ok(())
}
