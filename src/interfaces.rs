//! Seams to the outside world: input, drawing and sound.
//!
//! The simulation only ever talks to these traits.  Concrete terminal
//! implementations live in the binary; tests plug in scripted doubles.

use std::fmt;

use crate::entities::EnemyKind;
use crate::error::GameError;

// ── Input ─────────────────────────────────────────────────────────────────────

/// Logical controls for the human ship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Control(Control),
    /// Any key without a game binding (still starts a game from the menu).
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    Quit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Everything the input source saw since the previous tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub held: HeldKeys,
    pub events: Vec<InputEvent>,
}

impl InputSnapshot {
    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Left => self.held.left,
            Control::Right => self.held.right,
            Control::Fire => self.held.fire,
        }
    }

    pub fn presses(&self, control: Control) -> usize {
        self.events
            .iter()
            .filter(|e| **e == InputEvent::KeyDown(Key::Control(control)))
            .count()
    }

    pub fn any_key_down(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, InputEvent::KeyDown(_)))
    }

    pub fn quit_requested(&self) -> bool {
        self.events.contains(&InputEvent::Quit)
    }
}

pub trait InputSource {
    /// Held keys right now plus the discrete events queued since the last poll.
    fn poll(&mut self) -> InputSnapshot;
}

// ── Audio ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cue {
    Shoot,
    Shoot2,
    InvaderKilled,
    MysteryKilled,
    ShipExplosion,
    MysteryEntered,
    /// One of the four background-music notes.
    Note(u8),
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cue::Shoot => write!(f, "shoot"),
            Cue::Shoot2 => write!(f, "shoot2"),
            Cue::InvaderKilled => write!(f, "invaderkilled"),
            Cue::MysteryKilled => write!(f, "mysterykilled"),
            Cue::ShipExplosion => write!(f, "shipexplosion"),
            Cue::MysteryEntered => write!(f, "mysteryentered"),
            Cue::Note(n) => write!(f, "{n}"),
        }
    }
}

/// Fire-and-forget sound sink.  Nothing flows back into the simulation.
pub trait AudioPlayer {
    fn play(&mut self, cue: Cue);
    fn play_looped(&mut self, cue: Cue);
    fn fade_out(&mut self, cue: Cue, millis: u64);
    fn stop(&mut self, cue: Cue);
}

// ── Drawing ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);
pub const GREEN: Rgb = Rgb(78, 255, 87);
pub const BLUE: Rgb = Rgb(80, 255, 239);
pub const PURPLE: Rgb = Rgb(203, 0, 255);
pub const RED: Rgb = Rgb(237, 28, 36);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionColor {
    Purple,
    Blue,
    Green,
}

impl ExplosionColor {
    pub fn for_kind(kind: EnemyKind) -> Self {
        match kind {
            EnemyKind::Squid => ExplosionColor::Purple,
            EnemyKind::Crab => ExplosionColor::Blue,
            EnemyKind::Octopus => ExplosionColor::Green,
        }
    }
}

/// Sprite handles understood by a [`Renderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Image {
    Ship,
    /// The AI's ship.
    Other,
    Mystery,
    Enemy { kind: EnemyKind, frame: u8 },
    Explosion { color: ExplosionColor, large: bool },
    Laser,
    EnemyLaser,
    Life,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Font {
    #[default]
    Arcade,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Text {
    pub font: Font,
    pub size: u16,
    pub message: String,
    pub color: Rgb,
    pub x: i32,
    pub y: i32,
}

impl Text {
    pub fn new(size: u16, message: impl Into<String>, color: Rgb, x: i32, y: i32) -> Self {
        Self {
            font: Font::Arcade,
            size,
            message: message.into(),
            color,
            x,
            y,
        }
    }
}

/// Draw-command sink.  Performs no game logic.
pub trait Renderer {
    fn blit(&mut self, image: Image, x: i32, y: i32);
    fn draw_text(&mut self, text: &Text);
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb);
    /// Show everything drawn since the previous call.
    fn present(&mut self) -> Result<(), GameError>;
}
