//! End-to-end automaton scenarios built on the public API.
//!
//! The volume-ramp tests mirror the hold-to-repeat button scheme the
//! demo binary wires up: a press arms a decision window, holding past
//! the window ramps the volume on a repeat timer, releasing inside it
//! nudges once.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use timedfa::{Automaton, Error, StateChangeListener, Trigger};

use crate::recorder::{Observed, Recorder};

type Tfa = Automaton<&'static str, &'static str>;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// idle ──"volume+pressed"──▶ up_or_toggle ──0.3s──▶ up ⟲ 0.5s
fn volume_ramp_machine() -> Tfa {
    let mut tfa = Automaton::new("idle");
    tfa.add_state("up_or_toggle").unwrap();
    tfa.add_state("up").unwrap();
    tfa.add_transition("idle", "up_or_toggle", Trigger::Event("volume+pressed")).unwrap();
    tfa.add_transition("up_or_toggle", "up", Trigger::After(ms(300))).unwrap();
    tfa.add_transition("up", "up", Trigger::After(ms(500))).unwrap();
    tfa
}

/// Counts entries into "up", clamped to a ceiling, like a volume knob.
struct VolumeKnob {
    volume: Rc<RefCell<u8>>,
    max: u8,
}

impl StateChangeListener<&'static str, &'static str> for VolumeKnob {
    fn on_transition(
        &mut self,
        _from: &&'static str,
        to: &&'static str,
        _trigger: &Trigger<&'static str>,
    ) {
        if *to == "up" {
            let mut volume = self.volume.borrow_mut();
            *volume = volume.saturating_add(1).min(self.max);
        }
    }
}

#[test]
fn held_button_ramps_volume_once_per_repeat_interval() {
    let mut tfa = volume_ramp_machine();
    let volume = Rc::new(RefCell::new(1u8));
    tfa.add_listener(VolumeKnob { volume: Rc::clone(&volume), max: 11 });
    let recorder: Recorder<&'static str, &'static str> = Recorder::new();
    tfa.add_listener(recorder.clone());

    tfa.feed("volume+pressed").unwrap();
    assert_eq!(recorder.count(), 1);

    // Crossing into "up" bumps the volume once, then each repeat
    // interval bumps it again: 1 + 1 + 5 = 7.
    tfa.tick(ms(300)).unwrap();
    for _ in 0..5 {
        tfa.tick(ms(500)).unwrap();
    }

    assert_eq!(*volume.borrow(), 7);
    assert_eq!(*tfa.current_state(), "up");
    // Exactly one notification per tick after the initial press.
    assert_eq!(recorder.count() - 1, 6);
}

#[test]
fn oversized_tick_steps_the_ramp_only_once() {
    let mut tfa = volume_ramp_machine();
    let volume = Rc::new(RefCell::new(1u8));
    tfa.add_listener(VolumeKnob { volume: Rc::clone(&volume), max: 11 });

    tfa.feed("volume+pressed").unwrap();
    // 10 seconds in one tick still crosses only one threshold; the
    // repeat timer restarts from the transition.
    tfa.tick(Duration::from_secs(10)).unwrap();
    assert_eq!(*tfa.current_state(), "up");
    assert_eq!(*volume.borrow(), 2);
}

#[test]
fn ramp_clamps_at_the_ceiling_but_keeps_cycling() {
    let mut tfa = volume_ramp_machine();
    let volume = Rc::new(RefCell::new(1u8));
    tfa.add_listener(VolumeKnob { volume: Rc::clone(&volume), max: 11 });
    let recorder: Recorder<&'static str, &'static str> = Recorder::new();
    tfa.add_listener(recorder.clone());

    tfa.feed("volume+pressed").unwrap();
    tfa.tick(ms(300)).unwrap();
    for _ in 0..20 {
        tfa.tick(ms(500)).unwrap();
    }

    // 21 entries into "up", clamped at 11; the self-loop still fires
    // and notifies every interval even once the knob is pinned.
    assert_eq!(*volume.borrow(), 11);
    assert_eq!(recorder.count(), 22);
    assert_eq!(
        recorder.last(),
        Some(Observed { from: "up", to: "up", trigger: Trigger::After(ms(500)) })
    );
}

#[test]
fn nudge_path_bounces_back_through_epsilon() {
    let mut tfa = Automaton::new("idle");
    for state in ["up_or_toggle", "nudge_up"] {
        tfa.add_state(state).unwrap();
    }
    tfa.add_transition("idle", "up_or_toggle", Trigger::Event("volume+pressed")).unwrap();
    tfa.add_transition("up_or_toggle", "nudge_up", Trigger::Event("volume+released")).unwrap();
    tfa.add_transition("nudge_up", "idle", Trigger::Epsilon).unwrap();
    let recorder: Recorder<&'static str, &'static str> = Recorder::new();
    tfa.add_listener(recorder.clone());

    tfa.feed("volume+pressed").unwrap();
    tfa.feed("volume+released").unwrap();

    // The release lands in nudge_up and the epsilon edge returns to idle
    // within the same feed call.
    assert_eq!(*tfa.current_state(), "idle");
    assert_eq!(
        recorder.entries(),
        vec![
            Observed { from: "idle", to: "up_or_toggle", trigger: Trigger::Event("volume+pressed") },
            Observed { from: "up_or_toggle", to: "nudge_up", trigger: Trigger::Event("volume+released") },
            Observed { from: "nudge_up", to: "idle", trigger: Trigger::Epsilon },
        ]
    );
}

#[test]
fn wiring_mistakes_surface_before_any_stepping() {
    let mut tfa: Tfa = Automaton::new("idle");
    tfa.add_state("armed").unwrap();

    assert_eq!(tfa.add_state("idle"), Err(Error::DuplicateState("idle")));
    assert_eq!(
        tfa.add_transition("idle", "ghost", Trigger::Event("arm")),
        Err(Error::UnknownState("ghost"))
    );
    tfa.add_transition("idle", "armed", Trigger::Event("arm")).unwrap();
    assert_eq!(
        tfa.add_transition("idle", "idle", Trigger::Event("arm")),
        Err(Error::DuplicateTrigger { from: "idle", trigger: Trigger::Event("arm") })
    );

    // The machine still works after rejected wiring calls.
    tfa.feed("arm").unwrap();
    assert_eq!(*tfa.current_state(), "armed");
}

#[test]
fn competing_thresholds_resolve_to_the_smallest() {
    let mut tfa: Tfa = Automaton::new("start");
    for state in ["slow", "fast", "faster"] {
        tfa.add_state(state).unwrap();
    }
    tfa.add_transition("start", "slow", Trigger::After(ms(2000))).unwrap();
    tfa.add_transition("start", "fast", Trigger::After(ms(1000))).unwrap();
    tfa.add_transition("start", "faster", Trigger::After(ms(500))).unwrap();
    let recorder: Recorder<&'static str, &'static str> = Recorder::new();
    tfa.add_listener(recorder.clone());

    tfa.tick(Duration::from_secs(5)).unwrap();
    assert_eq!(*tfa.current_state(), "faster");
    assert_eq!(recorder.count(), 1);
}

#[test]
fn dot_export_tracks_the_ramp() {
    let mut tfa = volume_ramp_machine();

    let before = tfa.dot();
    assert!(before.contains("\"idle\" [shape = doublecircle, style = filled];"));
    assert_eq!(before.matches("->").count(), 3);
    // Header, one line per state, one per edge, closing brace.
    assert_eq!(before.lines().count(), 1 + 3 + 3 + 1);

    tfa.feed("volume+pressed").unwrap();
    tfa.tick(ms(300)).unwrap();

    let after = tfa.dot();
    assert!(after.contains("\"idle\" [shape = doublecircle];"));
    assert!(after.contains("\"up\" [style = filled];"));
    assert!(after.contains("\"up_or_toggle\" -> \"up\" [label = \"0.30s\"];"));
    assert!(after.contains("\"up\" -> \"up\" [label = \"0.50s\"];"));
}

#[test]
fn wall_clock_polling_fires_timed_edges() {
    let mut tfa: Tfa = Automaton::new("idle");
    tfa.add_state("timed_out").unwrap();
    tfa.add_transition("idle", "timed_out", Trigger::After(ms(150))).unwrap();

    tfa.poll().unwrap();
    assert_eq!(*tfa.current_state(), "idle");

    std::thread::sleep(ms(300));
    tfa.poll().unwrap();
    assert_eq!(*tfa.current_state(), "timed_out");
}
