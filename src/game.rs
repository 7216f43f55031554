//! Round state machine: main menu, playing, and the two end-of-round screens.

use rand::Rng;
use tracing::info;

use crate::collision::CollisionReport;
use crate::config::{Mode, SCREEN_DISPLAY_DELAY};
use crate::entities::Score;
use crate::interfaces::{AudioPlayer, InputSnapshot};
use crate::round::Round;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    MainMenu,
    Playing,
    /// "Enemies Destroyed!" screen; a new round follows with scores kept.
    RoundWon { since: u64 },
    /// "Game Over!" screen; back to the menu with scores cleared.
    GameOver { since: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Clone, Debug)]
pub struct Game {
    phase: Phase,
    mode: Mode,
    round: Option<Round>,
}

impl Game {
    pub fn new(mode: Mode) -> Self {
        Self {
            phase: Phase::MainMenu,
            mode,
            round: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The current round; also kept while an end-of-round screen is showing.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn round_mut(&mut self) -> Option<&mut Round> {
        self.round.as_mut()
    }

    pub fn score(&self) -> Score {
        self.round.as_ref().map(|r| r.score).unwrap_or_default()
    }

    /// Enter `Playing` with a fresh round.
    pub fn start_round(&mut self, now: u64, score: Score) {
        self.round = Some(Round::new(now, score));
        self.phase = Phase::Playing;
        info!(now, human = score.human, ai = score.ai, "round started");
    }

    /// Run one simulation tick.
    pub fn tick(
        &mut self,
        now: u64,
        input: &InputSnapshot,
        rng: &mut impl Rng,
        audio: &mut dyn AudioPlayer,
    ) -> Flow {
        if input.quit_requested() {
            info!("quit requested");
            return Flow::Quit;
        }

        match self.phase {
            Phase::MainMenu => {
                if input.any_key_down() {
                    self.start_round(now, Score::default());
                }
            }
            Phase::Playing => {
                let Some(round) = self.round.as_mut() else {
                    return Flow::Continue;
                };
                let report = round.advance(now, input, self.mode, rng, audio);
                if !report.eliminated.is_empty() {
                    info!(sides = ?report.eliminated, "sides eliminated");
                }
                self.evaluate(now, &report);
            }
            Phase::RoundWon { since } => {
                if now.saturating_sub(since) > SCREEN_DISPLAY_DELAY {
                    let score = self.score();
                    self.start_round(now, score);
                }
            }
            Phase::GameOver { since } => {
                if now.saturating_sub(since) > SCREEN_DISPLAY_DELAY {
                    self.round = None;
                    self.phase = Phase::MainMenu;
                    info!("back to main menu");
                }
            }
        }
        Flow::Continue
    }

    /// Check the current round for a win or a loss after a tick that
    /// produced `report`.
    pub fn evaluate(&mut self, now: u64, report: &CollisionReport) {
        if self.phase != Phase::Playing {
            return;
        }
        let Some(round) = self.round.as_ref() else {
            return;
        };
        if round.both_eliminated() || report.overrun {
            self.phase = Phase::GameOver { since: now };
            info!(human = round.score.human, ai = round.score.ai, "game over");
        } else if round.is_cleared() {
            self.phase = Phase::RoundWon { since: now };
            info!(human = round.score.human, ai = round.score.ai, "round won");
        }
    }
}
