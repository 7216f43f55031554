#![allow(dead_code)]

use invader_duel::interfaces::{
    AudioPlayer, Control, Cue, HeldKeys, InputEvent, InputSnapshot, Key,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Records every cue so tests can assert on what would have been heard.
#[derive(Default)]
pub struct RecordingAudio {
    pub played: Vec<Cue>,
    pub looped: Vec<Cue>,
    pub faded: Vec<(Cue, u64)>,
    pub stopped: Vec<Cue>,
}

impl RecordingAudio {
    pub fn count(&self, cue: Cue) -> usize {
        self.played.iter().filter(|&&c| c == cue).count()
    }
}

impl AudioPlayer for RecordingAudio {
    fn play(&mut self, cue: Cue) {
        self.played.push(cue);
    }

    fn play_looped(&mut self, cue: Cue) {
        self.looped.push(cue);
    }

    fn fade_out(&mut self, cue: Cue, millis: u64) {
        self.faded.push((cue, millis));
    }

    fn stop(&mut self, cue: Cue) {
        self.stopped.push(cue);
    }
}

pub fn idle() -> InputSnapshot {
    InputSnapshot::default()
}

pub fn press(control: Control) -> InputSnapshot {
    InputSnapshot {
        held: HeldKeys::default(),
        events: vec![InputEvent::KeyDown(Key::Control(control))],
    }
}

pub fn any_key() -> InputSnapshot {
    InputSnapshot {
        held: HeldKeys::default(),
        events: vec![InputEvent::KeyDown(Key::Other)],
    }
}

pub fn holding(left: bool, right: bool) -> InputSnapshot {
    InputSnapshot {
        held: HeldKeys {
            left,
            right,
            fire: false,
        },
        events: Vec::new(),
    }
}
