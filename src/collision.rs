//! Once-per-tick collision resolution.
//!
//! The passes run in a fixed order and each one sees the pools as the
//! previous pass left them:
//!
//! 1. player bullets cancel enemy bullets,
//! 2. player bullets destroy enemy units,
//! 3. player bullets destroy the mystery ship,
//! 4. enemy bullets destroy ships,
//! 5. a formation low enough to touch the ships crushes them, and ends the
//!    round once no ship is left to face it.

use rand::Rng;
use tracing::debug;

use crate::config::{GROUND_CONTACT_Y, HALF_COLUMNS, PLAYER_LINE_Y};
use crate::entities::{Bullet, EnemyUnit, Explosion, MysteryShip, Rect, Side};
use crate::interfaces::{AudioPlayer, Cue};
use crate::round::{Pools, Round};
use crate::scoring::{self, Credit, Target};

/// What happened during one resolution pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub bullets_cancelled: usize,
    pub enemies_destroyed: Vec<(EnemyUnit, Credit)>,
    pub mystery_destroyed: Option<Credit>,
    pub ships_hit: Vec<Side>,
    pub eliminated: Vec<Side>,
    /// The formation reached the ships with no ship left on the field and
    /// at least one side out of lives.
    pub overrun: bool,
}

impl CollisionReport {
    pub fn points(&self) -> u32 {
        self.enemies_destroyed
            .iter()
            .map(|(_, credit)| credit.points)
            .chain(self.mystery_destroyed.map(|credit| credit.points))
            .sum()
    }
}

pub fn resolve(
    round: &mut Round,
    now: u64,
    rng: &mut impl Rng,
    audio: &mut dyn AudioPlayer,
) -> CollisionReport {
    let mut report = CollisionReport {
        bullets_cancelled: cancel_bullets(&mut round.pools),
        ..CollisionReport::default()
    };
    shoot_enemies(round, now, rng, audio, &mut report);
    shoot_mystery(round, now, rng, audio, &mut report);
    hit_ships(round, now, audio, &mut report);
    ground_contact(round, &mut report);
    report
}

/// Drop every bullet in `bullets` overlapping `target`.  Returns how many went.
fn take_hits(bullets: &mut Vec<Bullet>, target: &Rect) -> usize {
    let before = bullets.len();
    bullets.retain(|b| !b.rect().overlaps(target));
    before - bullets.len()
}

// ── 1. Bullet vs bullet ──────────────────────────────────────────────────────

fn cancel_bullets(pools: &mut Pools) -> usize {
    let Pools {
        player_bullets,
        enemy_bullets,
        ..
    } = pools;
    let mut cancelled = 0;
    player_bullets.retain(|bullet| {
        let hits = take_hits(enemy_bullets, &bullet.rect());
        cancelled += hits;
        hits == 0
    });
    cancelled
}

// ── 2. Player bullets vs formation ───────────────────────────────────────────

fn shoot_enemies(
    round: &mut Round,
    now: u64,
    rng: &mut impl Rng,
    audio: &mut dyn AudioPlayer,
    report: &mut CollisionReport,
) {
    let units: Vec<EnemyUnit> = round.formation.units().copied().collect();
    for unit in units {
        if round.pools.player_bullets.is_empty() {
            break;
        }
        if take_hits(&mut round.pools.player_bullets, &unit.rect()) == 0 {
            continue;
        }
        round.formation.remove_unit(unit.row, unit.column);
        let credit = scoring::award(
            &mut round.score,
            Target::Enemy {
                row: unit.row,
                column: unit.column,
            },
            rng,
        );
        round.pools.explosions.push(Explosion::enemy(&unit, now));
        audio.play(Cue::InvaderKilled);
        debug!(row = unit.row, column = unit.column, ?credit, "enemy destroyed");
        report.enemies_destroyed.push((unit, credit));
    }
}

// ── 3. Player bullets vs mystery ship ────────────────────────────────────────

fn shoot_mystery(
    round: &mut Round,
    now: u64,
    rng: &mut impl Rng,
    audio: &mut dyn AudioPlayer,
    report: &mut CollisionReport,
) {
    let mystery = round.mystery;
    if take_hits(&mut round.pools.player_bullets, &mystery.rect()) == 0 {
        return;
    }
    audio.stop(Cue::MysteryEntered);
    audio.play(Cue::MysteryKilled);
    let credit = scoring::award(&mut round.score, Target::Mystery { x: mystery.x }, rng);
    round
        .pools
        .explosions
        .push(Explosion::mystery(&mystery, credit.points, now));
    round.mystery = MysteryShip::new(now);
    debug!(x = mystery.x, ?credit, "mystery ship destroyed");
    report.mystery_destroyed = Some(credit);
}

// ── 4. Enemy bullets vs ships ────────────────────────────────────────────────

fn hit_ships(
    round: &mut Round,
    now: u64,
    audio: &mut dyn AudioPlayer,
    report: &mut CollisionReport,
) {
    for side in Side::ALL {
        let Some(ship) = round.ships[side] else {
            continue;
        };
        if take_hits(&mut round.pools.enemy_bullets, &ship.rect()) == 0 {
            continue;
        }
        round.destroy_ship(side, now, audio);
        report.ships_hit.push(side);
        if round.is_eliminated(side) {
            report.eliminated.push(side);
        }
    }
}

// ── 5. Formation vs ships ────────────────────────────────────────────────────

fn ground_contact(round: &mut Round, report: &mut CollisionReport) {
    if round.formation.bottom() < GROUND_CONTACT_Y {
        return;
    }
    crush_ships(round, report);
    if round.formation.bottom() >= PLAYER_LINE_Y {
        land(round, report);
    }

    report.overrun = Side::ALL
        .iter()
        .any(|&side| round.is_eliminated(side) && round.ships[side.opponent()].is_none());
    if report.overrun {
        debug!("no ship left to face the formation");
    }
}

fn crush_ships(round: &mut Round, report: &mut CollisionReport) {
    for side in Side::ALL {
        let Some(ship) = round.ships[side] else {
            continue;
        };
        let rect = ship.rect();
        let crushing: Vec<EnemyUnit> = round
            .formation
            .units()
            .filter(|u| u.rect().overlaps(&rect))
            .copied()
            .collect();
        if crushing.is_empty() {
            continue;
        }
        for unit in &crushing {
            round.formation.remove_unit(unit.row, unit.column);
        }
        if round.eliminate(side) {
            debug!(?side, "ship crushed by the formation");
            report.eliminated.push(side);
        }
    }
}

fn land(round: &mut Round, report: &mut CollisionReport) {
    let landed = [
        (Side::Human, round.formation.left_alive_column().is_some_and(|c| c < HALF_COLUMNS)),
        (Side::Ai, round.formation.right_alive_column().is_some_and(|c| c >= HALF_COLUMNS)),
    ];
    for (side, reached) in landed {
        if reached && round.eliminate(side) {
            debug!(?side, "formation reached the player line");
            report.eliminated.push(side);
        }
    }
}
