//! Keyboard input from the terminal.
//!
//! Terminals report key presses but not whether a key is still down, so
//! each key remembers the poll on which it last pressed or repeated.  It
//! counts as held for `HOLD_WINDOW` polls after that, or until a release
//! event arrives on terminals that send them.  Left/right and fire can
//! therefore be held at the same time.

use std::collections::HashMap;
use std::sync::mpsc;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use invader_duel::interfaces::{Control, HeldKeys, InputEvent, InputSource, InputSnapshot, Key};

/// Polls (≈16 ms each) a key stays held after its last press or repeat.
const HOLD_WINDOW: u64 = 8;

pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl TerminalInput {
    pub fn new(rx: mpsc::Receiver<Event>) -> Self {
        Self {
            rx,
            key_frame: HashMap::new(),
            frame: 0,
        }
    }

    fn is_held(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| {
            self.key_frame
                .get(key)
                .is_some_and(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
        })
    }
}

fn control_for(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::Left => Some(Control::Left),
        KeyCode::Right => Some(Control::Right),
        KeyCode::Char(' ') => Some(Control::Fire),
        _ => None,
    }
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> InputSnapshot {
        self.frame += 1;
        let mut events = Vec::new();

        // everything queued since the last poll
        while let Ok(event) = self.rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = event
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    self.key_frame.insert(code, self.frame);
                    if is_quit(code, modifiers) {
                        events.push(InputEvent::Quit);
                    } else {
                        let key = control_for(code).map_or(Key::Other, Key::Control);
                        events.push(InputEvent::KeyDown(key));
                    }
                }
                // still down: keep it fresh
                KeyEventKind::Repeat => {
                    self.key_frame.insert(code, self.frame);
                }
                KeyEventKind::Release => {
                    self.key_frame.remove(&code);
                }
            }
        }

        InputSnapshot {
            held: HeldKeys {
                left: self.is_held(&[KeyCode::Left]),
                right: self.is_held(&[KeyCode::Right]),
                fire: self.is_held(&[KeyCode::Char(' ')]),
            },
            events,
        }
    }
}
