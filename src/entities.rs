//! Game entity types: plain data plus their per-tick position updates.

use std::ops::{Index, IndexMut};

use crate::config::{
    side_config, BULLET_HEIGHT, BULLET_MAX_Y, BULLET_MIN_Y, BULLET_WIDTH, COLUMNS,
    ENEMY_BULLET_SPEED, ENEMY_COLUMN_SPACING, ENEMY_HEIGHT, ENEMY_RIGHT_BLOCK_X,
    ENEMY_ROW_SPACING, ENEMY_WIDTH, HALF_COLUMNS, LIFE_TOKEN_SPACING, LIFE_TOKEN_Y,
    LIVES_PER_SIDE, MYSTERY_ENTRY_FADE, MYSTERY_HEIGHT, MYSTERY_INTERVAL, MYSTERY_SPEED,
    MYSTERY_START_X, MYSTERY_WIDTH, MYSTERY_Y, PLAYER_BULLET_SPEED, SCREEN_WIDTH, SHIP_HEIGHT,
    SHIP_MAX_X, SHIP_MIN_X, SHIP_SPEED, SHIP_WIDTH,
};
use crate::interfaces::{AudioPlayer, Cue};

// ── Sides ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Human,
    Ai,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Human, Side::Ai];

    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Ai,
            Side::Ai => Side::Human,
        }
    }
}

/// One value per side, indexable by [`Side`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SideMap<T> {
    pub human: T,
    pub ai: T,
}

impl<T> SideMap<T> {
    pub fn new(human: T, ai: T) -> Self {
        Self { human, ai }
    }

    pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
        Self {
            human: f(Side::Human),
            ai: f(Side::Ai),
        }
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Human => &self.human,
            Side::Ai => &self.ai,
        }
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Human => &mut self.human,
            Side::Ai => &mut self.ai,
        }
    }
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box, top-left anchored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

// ── Ships ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ship {
    pub side: Side,
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    /// Direction the autopilot keeps drifting in while dodging (±1).
    pub drift: i32,
}

impl Ship {
    /// A fresh ship parked at its side's home position.
    pub fn new(side: Side) -> Self {
        let (x, y) = side_config(side).home;
        Self {
            side,
            x,
            y,
            speed: SHIP_SPEED,
            drift: -1,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, SHIP_WIDTH, SHIP_HEIGHT)
    }

    /// Apply held left/right keys, staying inside the screen margins.
    pub fn steer(&mut self, left: bool, right: bool) {
        if left && self.x > SHIP_MIN_X {
            self.x -= self.speed;
        }
        if right && self.x < SHIP_MAX_X {
            self.x += self.speed;
        }
    }

    /// Spawn point of this ship's bullets.
    pub fn muzzle(&self) -> (i32, i32) {
        (self.x + 23, self.y + 5)
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
}

impl Heading {
    pub fn sign(self) -> i32 {
        match self {
            Heading::Up => -1,
            Heading::Down => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bullet {
    pub owner: BulletOwner,
    pub x: i32,
    pub y: i32,
    pub speed: i32,
    pub heading: Heading,
}

impl Bullet {
    pub fn player(x: i32, y: i32) -> Self {
        Self {
            owner: BulletOwner::Player,
            x,
            y,
            speed: PLAYER_BULLET_SPEED,
            heading: Heading::Up,
        }
    }

    pub fn enemy(x: i32, y: i32) -> Self {
        Self {
            owner: BulletOwner::Enemy,
            x,
            y,
            speed: ENEMY_BULLET_SPEED,
            heading: Heading::Down,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    /// Move one tick.  Returns `false` once the bullet has left the playfield.
    pub fn advance(&mut self) -> bool {
        self.y += self.speed * self.heading.sign();
        (BULLET_MIN_Y..=BULLET_MAX_Y).contains(&self.y)
    }
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    /// Top row.
    Squid,
    /// Rows 1 and 2.
    Crab,
    /// Rows 3 and 4.
    Octopus,
}

impl EnemyKind {
    pub fn from_row(row: usize) -> Self {
        match row {
            0 => EnemyKind::Squid,
            1 | 2 => EnemyKind::Crab,
            _ => EnemyKind::Octopus,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyUnit {
    pub row: usize,
    pub column: usize,
    pub x: i32,
    pub y: i32,
    /// Animation frame, 0 or 1.
    pub frame: u8,
}

impl EnemyUnit {
    /// Unit at its starting slot for a formation whose top row sits at `top_y`.
    pub fn new(row: usize, column: usize, top_y: i32) -> Self {
        debug_assert!(column < COLUMNS);
        let x = if column < HALF_COLUMNS {
            column as i32 * ENEMY_COLUMN_SPACING
        } else {
            ENEMY_RIGHT_BLOCK_X + (column - HALF_COLUMNS) as i32 * ENEMY_COLUMN_SPACING
        };
        Self {
            row,
            column,
            x,
            y: top_y + row as i32 * ENEMY_ROW_SPACING,
            frame: 0,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        EnemyKind::from_row(self.row)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    pub fn toggle_frame(&mut self) {
        self.frame ^= 1;
    }
}

// ── Mystery ship ──────────────────────────────────────────────────────────────

/// Bonus target that crosses the top of the screen every `MYSTERY_INTERVAL` ms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MysteryShip {
    pub x: i32,
    pub y: i32,
    pub direction: i32,
    /// Start of the current waiting period.
    pub timer: u64,
    /// Whether the entry cue still has to play for this crossing.
    pub announce: bool,
}

impl MysteryShip {
    pub fn new(now: u64) -> Self {
        Self {
            x: MYSTERY_START_X,
            y: MYSTERY_Y,
            direction: 1,
            timer: now,
            announce: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, MYSTERY_WIDTH, MYSTERY_HEIGHT)
    }

    /// True while the ship is crossing rather than waiting off-screen.
    pub fn is_crossing(&self, now: u64) -> bool {
        now.saturating_sub(self.timer) > MYSTERY_INTERVAL
    }

    pub fn update(&mut self, now: u64, audio: &mut dyn AudioPlayer) {
        let crossing = self.is_crossing(now);
        if crossing {
            if (self.x < 0 || self.x > SCREEN_WIDTH) && self.announce {
                audio.play_looped(Cue::MysteryEntered);
                audio.fade_out(Cue::MysteryEntered, MYSTERY_ENTRY_FADE);
                self.announce = false;
            }
            if self.direction == 1 && self.x < SCREEN_WIDTH + 40 {
                self.x += MYSTERY_SPEED;
            }
            if self.direction == -1 && self.x > -100 {
                self.x -= MYSTERY_SPEED;
            }
        }

        // Bounce off the far edge and wait for the next crossing.
        let mut bounced = false;
        if self.x > SCREEN_WIDTH + 30 {
            self.direction = -1;
            bounced = true;
        }
        if self.x < -90 {
            self.direction = 1;
            bounced = true;
        }
        if bounced {
            self.announce = true;
            if crossing {
                self.timer = now;
            }
        }
    }
}

// ── Lives ─────────────────────────────────────────────────────────────────────

/// HUD marker for one remaining life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LifeToken {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lives {
    tokens: Vec<LifeToken>,
}

impl Lives {
    /// A full set of tokens laid out in the side's HUD slot.
    pub fn full(side: Side) -> Self {
        let first_x = side_config(side).first_life_x;
        let tokens = (0..LIVES_PER_SIDE)
            .map(|i| LifeToken {
                x: first_x + i as i32 * LIFE_TOKEN_SPACING,
                y: LIFE_TOKEN_Y,
            })
            .collect();
        Self { tokens }
    }

    pub fn count(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[LifeToken] {
        &self.tokens
    }

    /// Consume the most recently added token.
    pub fn lose_one(&mut self) -> Option<LifeToken> {
        self.tokens.pop()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExplosionKind {
    Enemy { row: usize },
    /// Flashes the points the mystery ship was worth.
    Mystery { points: u32 },
    Ship { side: Side },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Explosion {
    pub kind: ExplosionKind,
    pub x: i32,
    pub y: i32,
    pub started_at: u64,
}

impl Explosion {
    pub fn enemy(unit: &EnemyUnit, now: u64) -> Self {
        Self {
            kind: ExplosionKind::Enemy { row: unit.row },
            x: unit.x,
            y: unit.y,
            started_at: now,
        }
    }

    pub fn mystery(mystery: &MysteryShip, points: u32, now: u64) -> Self {
        Self {
            kind: ExplosionKind::Mystery { points },
            x: mystery.x + 20,
            y: mystery.y + 6,
            started_at: now,
        }
    }

    pub fn ship(ship: &Ship, now: u64) -> Self {
        Self {
            kind: ExplosionKind::Ship { side: ship.side },
            x: ship.x,
            y: ship.y,
            started_at: now,
        }
    }

    pub fn elapsed(&self, now: u64) -> u64 {
        now.saturating_sub(self.started_at)
    }

    pub fn lifetime(&self) -> u64 {
        match self.kind {
            ExplosionKind::Enemy { .. } => 400,
            ExplosionKind::Mystery { .. } => 600,
            ExplosionKind::Ship { .. } => 900,
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.elapsed(now) > self.lifetime()
    }
}

// ── Score ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    pub human: u32,
    pub ai: u32,
}

impl Score {
    pub fn of(&self, side: Side) -> u32 {
        match side {
            Side::Human => self.human,
            Side::Ai => self.ai,
        }
    }

    pub fn credit(&mut self, side: Side, points: u32) {
        match side {
            Side::Human => self.human += points,
            Side::Ai => self.ai += points,
        }
    }

    pub fn total(&self) -> u32 {
        self.human + self.ai
    }
}
