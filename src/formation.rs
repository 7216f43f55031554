//! The enemy grid and its lockstep march.
//!
//! Units live in a dense `ROWS × COLUMNS` array of `Option<EnemyUnit>`; an
//! empty cell is a destroyed unit.  The outermost living columns are kept up
//! to date as units die by walking inward from the edge that lost a column,
//! so the formation never rescans every column.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::config::{
    COLUMNS, ENEMY_HEIGHT, ENEMY_MOVES, ENEMY_MOVE_DOWN, ENEMY_ROW_SPACING, ENEMY_STEP,
    FAST_THRESHOLD, MOVE_INTERVAL_FAST, MOVE_INTERVAL_LAST, MOVE_INTERVAL_SLOW, ROWS,
};
use crate::entities::EnemyUnit;

/// Time between lockstep moves for a formation with `alive` units left.
pub fn move_interval_for(alive: usize) -> u64 {
    match alive {
        1 => MOVE_INTERVAL_LAST,
        n if n <= FAST_THRESHOLD => MOVE_INTERVAL_FAST,
        _ => MOVE_INTERVAL_SLOW,
    }
}

#[derive(Clone, Debug)]
pub struct EnemyFormation {
    grid: [[Option<EnemyUnit>; COLUMNS]; ROWS],
    column_counts: [usize; COLUMNS],
    alive_columns: Vec<usize>,
    left_alive_column: usize,
    right_alive_column: usize,
    len: usize,
    direction: i32,
    move_number: u32,
    timer: u64,
    move_interval: u64,
    bottom: i32,
}

impl EnemyFormation {
    /// A full grid whose top row sits at `top_y`, with its move timer
    /// starting at `now`.
    pub fn new(top_y: i32, now: u64) -> Self {
        let mut grid = [[None; COLUMNS]; ROWS];
        for (row, cells) in grid.iter_mut().enumerate() {
            for (column, cell) in cells.iter_mut().enumerate() {
                *cell = Some(EnemyUnit::new(row, column, top_y));
            }
        }
        let len = ROWS * COLUMNS;
        Self {
            grid,
            column_counts: [ROWS; COLUMNS],
            alive_columns: (0..COLUMNS).collect(),
            left_alive_column: 0,
            right_alive_column: COLUMNS - 1,
            len,
            direction: 1,
            move_number: 0,
            timer: now,
            move_interval: move_interval_for(len),
            bottom: top_y + (ROWS as i32 - 1) * ENEMY_ROW_SPACING + ENEMY_HEIGHT,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn unit(&self, row: usize, column: usize) -> Option<&EnemyUnit> {
        self.grid.get(row)?.get(column)?.as_ref()
    }

    /// Living units in row-major order.
    pub fn units(&self) -> impl Iterator<Item = &EnemyUnit> {
        self.grid.iter().flatten().flatten()
    }

    fn units_mut(&mut self) -> impl Iterator<Item = &mut EnemyUnit> {
        self.grid.iter_mut().flatten().flatten()
    }

    pub fn left_alive_column(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.left_alive_column)
    }

    pub fn right_alive_column(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.right_alive_column)
    }

    /// Columns that still hold at least one living unit.
    pub fn alive_columns(&self) -> &[usize] {
        &self.alive_columns
    }

    pub fn is_column_dead(&self, column: usize) -> bool {
        self.column_counts[column] == 0
    }

    /// Lowest extent (y + height) of any living unit; 0 once empty.
    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn move_interval(&self) -> u64 {
        self.move_interval
    }

    pub fn direction(&self) -> i32 {
        self.direction
    }

    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    pub fn timer(&self) -> u64 {
        self.timer
    }

    /// x of the rightmost living unit.
    pub fn rightmost_x(&self) -> Option<i32> {
        self.units().map(|u| u.x).max()
    }

    // ── Movement ─────────────────────────────────────────────────────────────

    /// Perform one lockstep move if the move interval has elapsed.
    pub fn update(&mut self, now: u64) {
        if self.is_empty() || now.saturating_sub(self.timer) <= self.move_interval {
            return;
        }

        if self.move_number >= ENEMY_MOVES {
            self.direction = -self.direction;
            self.move_number = 0;
            for unit in self.units_mut() {
                unit.y += ENEMY_MOVE_DOWN;
                unit.toggle_frame();
            }
            self.refresh_bottom();
            trace!(bottom = self.bottom, direction = self.direction, "formation descended");
        } else {
            let dx = ENEMY_STEP * self.direction;
            for unit in self.units_mut() {
                unit.x += dx;
                unit.toggle_frame();
            }
            self.move_number += 1;
        }

        // Advance by the interval rather than snapping to `now` so the music
        // stays in phase with the march.
        self.timer += self.move_interval;
    }

    // ── Removal ──────────────────────────────────────────────────────────────

    /// Destroy the unit at (`row`, `column`).  Empty or out-of-range cells
    /// are a no-op.
    pub fn remove_unit(&mut self, row: usize, column: usize) -> Option<EnemyUnit> {
        let unit = self.grid.get_mut(row)?.get_mut(column)?.take()?;
        self.len -= 1;
        self.column_counts[column] -= 1;

        if self.column_counts[column] == 0 {
            self.alive_columns.retain(|&c| c != column);
            // With units left there is a living column on the inner side of
            // either edge, so both walks stop before crossing each other.
            if !self.is_empty() {
                if column == self.right_alive_column {
                    while self.is_column_dead(self.right_alive_column) {
                        self.right_alive_column -= 1;
                    }
                } else if column == self.left_alive_column {
                    while self.is_column_dead(self.left_alive_column) {
                        self.left_alive_column += 1;
                    }
                }
            }
        }

        self.refresh_bottom();
        self.move_interval = move_interval_for(self.len);
        debug!(
            row,
            column,
            remaining = self.len,
            left = self.left_alive_column,
            right = self.right_alive_column,
            "enemy unit removed"
        );
        Some(unit)
    }

    fn refresh_bottom(&mut self) {
        self.bottom = self
            .units()
            .map(|u| u.y + ENEMY_HEIGHT)
            .max()
            .unwrap_or(0);
    }

    // ── Shooting ─────────────────────────────────────────────────────────────

    /// The lowest living unit of a uniformly chosen living column.
    pub fn pick_random_shooter(&self, rng: &mut impl Rng) -> Option<EnemyUnit> {
        let &column = self.alive_columns.choose(rng)?;
        (0..ROWS).rev().find_map(|row| self.grid[row][column])
    }
}
