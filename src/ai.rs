//! Opponent controller.
//!
//! A greedy, reactive pilot: it looks only at the current tick's enemy
//! bullets and the formation's right edge.  Dodging always wins over
//! approaching.

use crate::config::{SHIP_MAX_X, SHIP_MIN_X, THREAT_MIN_Y};
use crate::entities::{Bullet, Ship};
use crate::formation::EnemyFormation;

/// Lanes the threat scan left open, and whether a bullet is coming straight in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Threat {
    pub left_free: bool,
    pub right_free: bool,
    pub direct: bool,
}

/// What the controller wants the ship to do this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Steering {
    pub dx: i32,
    pub drift: i32,
}

/// Classify low enemy bullets by their horizontal offset from `ship_x`.
pub fn scan_threats(ship_x: i32, enemy_bullets: &[Bullet]) -> Threat {
    let mut threat = Threat {
        left_free: true,
        right_free: true,
        direct: false,
    };
    for bullet in enemy_bullets.iter().filter(|b| b.y >= THREAT_MIN_Y) {
        let diff = bullet.x - ship_x;
        if -30 < diff && diff < -1 {
            threat.left_free = false;
        }
        if (-1..=50).contains(&diff) {
            threat.direct = true;
        }
        if 50 < diff && diff < 80 {
            threat.right_free = false;
        }
    }
    threat
}

pub fn steer(
    ship: &Ship,
    formation: &EnemyFormation,
    enemy_bullets: &[Bullet],
    left_wall: i32,
) -> Steering {
    let x = ship.x;
    let speed = ship.speed;

    let mut drift = ship.drift;
    if x < SHIP_MIN_X {
        drift = 1;
    } else if x > SHIP_MAX_X {
        drift = -1;
    }

    let target = formation.rightmost_x().unwrap_or(0).max(0);
    let Threat {
        left_free,
        right_free,
        direct,
    } = scan_threats(x, enemy_bullets);

    let dx = if direct && left_free && right_free {
        drift * speed
    } else if direct && left_free && x > SHIP_MIN_X {
        -speed
    } else if direct && right_free && x < SHIP_MAX_X {
        speed
    } else if x > target && left_free && x > left_wall {
        -speed
    } else if x < target - 10 && right_free {
        speed
    } else {
        0
    };

    Steering { dx, drift }
}
