mod common;

use common::{idle, seeded_rng, RecordingAudio};
use invader_duel::ai::{scan_threats, steer, Steering, Threat};
use invader_duel::config::*;
use invader_duel::entities::*;
use invader_duel::formation::EnemyFormation;
use invader_duel::round::Round;

fn ai_ship_at(x: i32) -> Ship {
    let mut ship = Ship::new(Side::Ai);
    ship.x = x;
    ship
}

fn full_formation() -> EnemyFormation {
    EnemyFormation::new(ENEMY_DEFAULT_POSITION, 0)
}

fn empty_formation() -> EnemyFormation {
    let mut formation = full_formation();
    for row in 0..ROWS {
        for column in 0..COLUMNS {
            formation.remove_unit(row, column);
        }
    }
    formation
}

const ALL_CLEAR: Threat = Threat {
    left_free: true,
    right_free: true,
    direct: false,
};

// ── Threat scan ───────────────────────────────────────────────────────────────

#[test]
fn high_bullets_are_ignored() {
    let bullets = [Bullet::enemy(420, THREAT_MIN_Y - 1)];
    assert_eq!(scan_threats(400, &bullets), ALL_CLEAR);
}

#[test]
fn threat_bands() {
    let at = |dx: i32| scan_threats(400, &[Bullet::enemy(400 + dx, 350)]);

    assert!(!at(-20).left_free);
    assert!(!at(-2).left_free);
    assert_eq!(at(-30), ALL_CLEAR);

    assert!(at(-1).direct);
    assert!(at(0).direct);
    assert!(at(50).direct);
    assert!(at(50).right_free);

    assert!(!at(51).right_free);
    assert!(!at(79).right_free);
    assert_eq!(at(80), ALL_CLEAR);
}

#[test]
fn several_bullets_combine() {
    let bullets = [Bullet::enemy(380, 400), Bullet::enemy(470, 400)];
    assert_eq!(
        scan_threats(400, &bullets),
        Threat {
            left_free: false,
            right_free: false,
            direct: false,
        }
    );
}

// ── Dodging ───────────────────────────────────────────────────────────────────

#[test]
fn direct_threat_with_both_lanes_open_follows_drift() {
    let ship = ai_ship_at(400);
    let bullets = [Bullet::enemy(420, 350)];
    let steering = steer(&ship, &full_formation(), &bullets, Mode::Competitive.left_wall());
    assert_eq!(steering, Steering { dx: -5, drift: -1 });
}

#[test]
fn dodge_right_when_left_is_blocked() {
    let ship = ai_ship_at(400);
    let bullets = [Bullet::enemy(420, 350), Bullet::enemy(380, 350)];
    let steering = steer(&ship, &full_formation(), &bullets, 410);
    assert_eq!(steering.dx, 5);
}

#[test]
fn dodge_left_when_right_is_blocked() {
    let ship = ai_ship_at(400);
    let bullets = [Bullet::enemy(420, 350), Bullet::enemy(460, 350)];
    let steering = steer(&ship, &full_formation(), &bullets, 410);
    assert_eq!(steering.dx, -5);
}

#[test]
fn boxed_in_ship_holds_still() {
    let ship = ai_ship_at(400);
    let bullets = [
        Bullet::enemy(380, 350),
        Bullet::enemy(420, 350),
        Bullet::enemy(460, 350),
    ];
    // tracking would move right, but that lane is blocked too
    let steering = steer(&ship, &full_formation(), &bullets, 410);
    assert_eq!(steering.dx, 0);
}

#[test]
fn drift_flips_at_the_margins() {
    let bullets = |x: i32| [Bullet::enemy(x + 10, 350)];

    let low = ai_ship_at(SHIP_MIN_X - 5);
    let steering = steer(&low, &full_formation(), &bullets(low.x), 10);
    assert_eq!(steering, Steering { dx: 5, drift: 1 });

    let mut high = ai_ship_at(SHIP_MAX_X + 5);
    high.drift = 1;
    let steering = steer(&high, &full_formation(), &bullets(high.x), 10);
    assert_eq!(steering, Steering { dx: -5, drift: -1 });
}

// ── Tracking ──────────────────────────────────────────────────────────────────

#[test]
fn tracks_toward_the_rightmost_unit() {
    let formation = full_formation();
    assert_eq!(formation.rightmost_x(), Some(600));

    assert_eq!(steer(&ai_ship_at(500), &formation, &[], 410).dx, 5);
    assert_eq!(steer(&ai_ship_at(700), &formation, &[], 410).dx, -5);
    // inside the 10 px dead zone
    assert_eq!(steer(&ai_ship_at(595), &formation, &[], 410).dx, 0);
    assert_eq!(steer(&ai_ship_at(600), &formation, &[], 410).dx, 0);
}

#[test]
fn competitive_mode_keeps_ai_on_its_half() {
    let formation = empty_formation();
    let ship = ai_ship_at(410);
    assert_eq!(steer(&ship, &formation, &[], Mode::Competitive.left_wall()).dx, 0);
    assert_eq!(steer(&ship, &formation, &[], Mode::Cooperative.left_wall()).dx, -5);
}

#[test]
fn blocked_lane_stops_tracking() {
    let formation = full_formation();
    let ship = ai_ship_at(500);
    let bullets = [Bullet::enemy(560, 350)];
    assert_eq!(steer(&ship, &formation, &bullets, 410).dx, 0);
}

// ── Inside a round ────────────────────────────────────────────────────────────

#[test]
fn round_applies_ai_steering() {
    let mut round = Round::new(0, Score::default());
    let mut audio = RecordingAudio::default();
    // lands at 620, 405 after this tick's bullet move: straight above the AI
    round.pools.enemy_bullets.push(Bullet::enemy(620, 400));

    round.advance(1, &idle(), Mode::Competitive, &mut seeded_rng(), &mut audio);
    let ship = round.ships[Side::Ai].expect("AI ship");
    assert_eq!(ship.x, 595);
    assert_eq!(ship.drift, -1);
}
