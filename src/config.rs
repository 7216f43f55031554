//! Playfield geometry, timings and the per-side configuration table.
//!
//! Everything here is fixed at compile time; the only runtime knob is the
//! [`Mode`] chosen on the command line.

use crate::entities::Side;
use crate::interfaces::Cue;

// ── Playfield ────────────────────────────────────────────────────────────────

pub const SCREEN_WIDTH: i32 = 800;
pub const SCREEN_HEIGHT: i32 = 600;

// ── Enemy formation ──────────────────────────────────────────────────────────

pub const ROWS: usize = 5;
pub const COLUMNS: usize = 10;

/// Columns below this index belong to the human's half of the screen.
pub const HALF_COLUMNS: usize = COLUMNS / 2;

/// y of the top row when a round starts.  Never changes between rounds.
pub const ENEMY_DEFAULT_POSITION: i32 = 65;
pub const ENEMY_WIDTH: i32 = 40;
pub const ENEMY_HEIGHT: i32 = 35;
pub const ENEMY_COLUMN_SPACING: i32 = 50;
pub const ENEMY_ROW_SPACING: i32 = 45;
/// x of column 5; the two five-column blocks sit in opposite halves.
pub const ENEMY_RIGHT_BLOCK_X: i32 = 400;

pub const ENEMY_STEP: i32 = 10;
pub const ENEMY_MOVE_DOWN: i32 = 35;
/// Horizontal steps taken before the formation reverses and descends.
pub const ENEMY_MOVES: u32 = 15;

pub const MOVE_INTERVAL_SLOW: u64 = 600;
pub const MOVE_INTERVAL_FAST: u64 = 400;
pub const MOVE_INTERVAL_LAST: u64 = 200;
/// At or below this many living units the formation switches to the fast interval.
pub const FAST_THRESHOLD: usize = 10;

pub const ENEMY_FIRE_INTERVAL: u64 = 700;

/// Once the formation's bottom reaches this line, ships touching it are crushed.
pub const GROUND_CONTACT_Y: i32 = 540;
/// Once the formation's bottom reaches this line, it has landed.
pub const PLAYER_LINE_Y: i32 = 600;

// ── Ships & bullets ──────────────────────────────────────────────────────────

pub const SHIP_WIDTH: i32 = 50;
pub const SHIP_HEIGHT: i32 = 48;
pub const SHIP_SPEED: i32 = 5;
pub const SHIP_MIN_X: i32 = 10;
pub const SHIP_MAX_X: i32 = 740;
pub const SHIP_Y: i32 = 540;

pub const BULLET_WIDTH: i32 = 5;
pub const BULLET_HEIGHT: i32 = 15;
pub const BULLET_MIN_Y: i32 = 15;
pub const BULLET_MAX_Y: i32 = 600;
pub const PLAYER_BULLET_SPEED: i32 = 15;
pub const ENEMY_BULLET_SPEED: i32 = 5;

/// Player bullets the human may have in flight at once.  The AI only fires
/// into an empty pool.
pub const HUMAN_BULLET_CAP: usize = 2;

pub const RESPAWN_DELAY: u64 = 900;
pub const LIVES_PER_SIDE: usize = 3;
pub const LIFE_TOKEN_SPACING: i32 = 27;
pub const LIFE_TOKEN_Y: i32 = 3;

// ── Mystery ship ─────────────────────────────────────────────────────────────

pub const MYSTERY_WIDTH: i32 = 75;
pub const MYSTERY_HEIGHT: i32 = 35;
pub const MYSTERY_START_X: i32 = -80;
pub const MYSTERY_Y: i32 = 45;
pub const MYSTERY_SPEED: i32 = 2;
pub const MYSTERY_INTERVAL: u64 = 25_000;
pub const MYSTERY_ENTRY_FADE: u64 = 4_000;
pub const MYSTERY_POINTS: [u32; 4] = [50, 100, 150, 300];
/// Width of one credit band when attributing a mystery kill by x position.
pub const MYSTERY_CREDIT_BAND: i32 = 80;

// ── Opponent AI ──────────────────────────────────────────────────────────────

/// Enemy bullets above this line are ignored by the threat scan.
pub const THREAT_MIN_Y: i32 = 300;

// ── Screens & music ──────────────────────────────────────────────────────────

pub const SCREEN_DISPLAY_DELAY: u64 = 10_000;
pub const MUSIC_NOTES: u8 = 4;

// ── Mode ─────────────────────────────────────────────────────────────────────

/// Whether the AI helps clear the whole formation or keeps to its own half.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Competitive,
    Cooperative,
}

impl Mode {
    /// Leftmost x the AI will walk to while tracking the formation.
    pub fn left_wall(self) -> i32 {
        match self {
            Mode::Cooperative => 10,
            Mode::Competitive => 410,
        }
    }
}

// ── Per-side table ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideConfig {
    pub home: (i32, i32),
    pub fire_cue: Cue,
    /// HUD x of the first life token; the rest follow at `LIFE_TOKEN_SPACING`.
    pub first_life_x: i32,
}

pub fn side_config(side: Side) -> SideConfig {
    match side {
        Side::Human => SideConfig {
            home: (200, SHIP_Y),
            fire_cue: Cue::Shoot,
            first_life_x: 315,
        },
        Side::Ai => SideConfig {
            home: (600, SHIP_Y),
            fire_cue: Cue::Shoot2,
            first_life_x: 715,
        },
    }
}
