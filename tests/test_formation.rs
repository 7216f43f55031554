mod common;

use common::seeded_rng;
use invader_duel::config::*;
use invader_duel::formation::{move_interval_for, EnemyFormation};
use proptest::prelude::*;

fn full() -> EnemyFormation {
    EnemyFormation::new(ENEMY_DEFAULT_POSITION, 0)
}

/// Tick times that each trigger exactly one move on a 600 ms interval.
fn step_time(step: u64) -> u64 {
    step * MOVE_INTERVAL_SLOW + 1
}

fn clear_column(formation: &mut EnemyFormation, column: usize) {
    for row in 0..ROWS {
        formation.remove_unit(row, column);
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn new_formation_is_full() {
    let f = full();
    assert_eq!(f.len(), 50);
    assert_eq!(f.units().count(), 50);
    assert_eq!(f.left_alive_column(), Some(0));
    assert_eq!(f.right_alive_column(), Some(9));
    assert_eq!(f.direction(), 1);
    assert_eq!(f.move_interval(), 600);
    // 65 + 4 rows * 45 + unit height
    assert_eq!(f.bottom(), 280);
}

#[test]
fn units_iterate_row_major() {
    let f = full();
    let first: Vec<(usize, usize)> = f.units().take(11).map(|u| (u.row, u.column)).collect();
    assert_eq!(first[0], (0, 0));
    assert_eq!(first[9], (0, 9));
    assert_eq!(first[10], (1, 0));
}

// ── Move interval ─────────────────────────────────────────────────────────────

#[test]
fn move_interval_boundaries() {
    assert_eq!(move_interval_for(50), 600);
    assert_eq!(move_interval_for(11), 600);
    assert_eq!(move_interval_for(10), 400);
    assert_eq!(move_interval_for(2), 400);
    assert_eq!(move_interval_for(1), 200);
}

#[test]
fn move_interval_tracks_removals() {
    let mut f = full();
    let cells: Vec<(usize, usize)> = f.units().map(|u| (u.row, u.column)).collect();
    for (i, (row, column)) in cells.into_iter().enumerate() {
        f.remove_unit(row, column);
        let alive = 49 - i;
        let expected = match alive {
            0 => continue,
            1 => 200,
            2..=10 => 400,
            _ => 600,
        };
        assert_eq!(f.move_interval(), expected, "with {alive} alive");
    }
    assert!(f.is_empty());
}

// ── Lockstep movement ─────────────────────────────────────────────────────────

#[test]
fn no_move_before_interval_elapses() {
    let mut f = full();
    f.update(600);
    assert_eq!(f.unit(0, 0).unwrap().x, 0);
    assert_eq!(f.move_number(), 0);
}

#[test]
fn one_step_right_and_frame_toggle() {
    let mut f = full();
    f.update(601);
    let unit = f.unit(2, 3).unwrap();
    assert_eq!(unit.x, 3 * 50 + 10);
    assert_eq!(unit.frame, 1);
    assert_eq!(f.move_number(), 1);
}

#[test]
fn timer_advances_by_interval_not_to_now() {
    let mut f = full();
    f.update(1_000);
    assert_eq!(f.timer(), 600);
    // 1_201 - 600 > 600: a second step is already due
    f.update(1_201);
    assert_eq!(f.timer(), 1_200);
    assert_eq!(f.move_number(), 2);
}

#[test]
fn fifteen_steps_then_reverse_and_descend() {
    let mut f = full();
    let start: Vec<(i32, i32)> = f.units().map(|u| (u.x, u.y)).collect();

    for step in 1..=15 {
        f.update(step_time(step));
    }
    assert_eq!(f.direction(), 1);
    for (unit, &(x, y)) in f.units().zip(&start) {
        assert_eq!(unit.x, x + 150);
        assert_eq!(unit.y, y);
    }

    f.update(step_time(16));
    assert_eq!(f.direction(), -1);
    assert_eq!(f.move_number(), 0);
    for (unit, &(x, y)) in f.units().zip(&start) {
        assert_eq!(unit.x, x + 150);
        assert_eq!(unit.y, y + 35);
    }
    assert_eq!(f.bottom(), 280 + 35);

    f.update(step_time(17));
    assert_eq!(f.unit(0, 0).unwrap().x, 140);
}

#[test]
fn update_on_empty_formation_changes_nothing() {
    let mut f = full();
    let cells: Vec<(usize, usize)> = f.units().map(|u| (u.row, u.column)).collect();
    for (row, column) in cells {
        f.remove_unit(row, column);
    }
    let timer = f.timer();
    let moves = f.move_number();
    for t in [0, 10_000, 100_000, u64::MAX] {
        f.update(t);
    }
    assert!(f.is_empty());
    assert_eq!(f.timer(), timer);
    assert_eq!(f.move_number(), moves);
    assert_eq!(f.bottom(), 0);
    assert_eq!(f.left_alive_column(), None);
    assert_eq!(f.right_alive_column(), None);
}

// ── Removal & alive columns ───────────────────────────────────────────────────

#[test]
fn removing_empty_cell_is_noop() {
    let mut f = full();
    assert!(f.remove_unit(0, 0).is_some());
    assert!(f.remove_unit(0, 0).is_none());
    assert!(f.remove_unit(7, 2).is_none());
    assert!(f.remove_unit(2, 12).is_none());
    assert_eq!(f.len(), 49);
}

#[test]
fn partial_column_keeps_edges() {
    let mut f = full();
    for row in 0..ROWS - 1 {
        f.remove_unit(row, 9);
    }
    assert_eq!(f.right_alive_column(), Some(9));
}

#[test]
fn right_edge_walks_inward_over_dead_columns() {
    let mut f = full();
    clear_column(&mut f, 8);
    assert_eq!(f.right_alive_column(), Some(9));
    clear_column(&mut f, 9);
    assert_eq!(f.right_alive_column(), Some(7));
    assert_eq!(f.left_alive_column(), Some(0));
}

#[test]
fn left_edge_walks_inward_over_dead_columns() {
    let mut f = full();
    clear_column(&mut f, 1);
    clear_column(&mut f, 2);
    clear_column(&mut f, 0);
    assert_eq!(f.left_alive_column(), Some(3));
    assert!(!f.alive_columns().contains(&0));
}

#[test]
fn bottom_rises_when_lowest_row_dies() {
    let mut f = full();
    for column in 0..COLUMNS {
        f.remove_unit(4, column);
    }
    assert_eq!(f.bottom(), 65 + 3 * 45 + 35);
}

// ── Shooter selection ─────────────────────────────────────────────────────────

#[test]
fn shooter_is_lowest_unit_of_its_column() {
    let mut f = full();
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let shooter = f.pick_random_shooter(&mut rng).unwrap();
        assert_eq!(shooter.row, ROWS - 1);
    }

    // Leave only column 6 with its two top units.
    for column in (0..COLUMNS).filter(|&c| c != 6) {
        clear_column(&mut f, column);
    }
    f.remove_unit(4, 6);
    f.remove_unit(3, 6);
    f.remove_unit(2, 6);
    let shooter = f.pick_random_shooter(&mut rng).unwrap();
    assert_eq!((shooter.row, shooter.column), (1, 6));
}

#[test]
fn shooter_columns_are_all_reachable() {
    let f = full();
    let mut rng = seeded_rng();
    let mut seen = [false; COLUMNS];
    for _ in 0..500 {
        seen[f.pick_random_shooter(&mut rng).unwrap().column] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

#[test]
fn empty_formation_has_no_shooter() {
    let mut f = full();
    for column in 0..COLUMNS {
        clear_column(&mut f, column);
    }
    assert!(f.pick_random_shooter(&mut seeded_rng()).is_none());
}

// ── Invariants under arbitrary kill orders ────────────────────────────────────

proptest! {
    #[test]
    fn edges_and_bottom_stay_consistent(
        kills in proptest::collection::vec((0..ROWS, 0..COLUMNS), 0..80),
        steps in 0u64..40,
    ) {
        let mut f = full();
        for step in 1..=steps {
            f.update(step_time(step));
        }
        for (row, column) in kills {
            f.remove_unit(row, column);

            let living: Vec<_> = f.units().copied().collect();
            prop_assert_eq!(living.len(), f.len());
            if living.is_empty() {
                prop_assert_eq!(f.bottom(), 0);
                prop_assert!(f.left_alive_column().is_none());
                continue;
            }

            let left = f.left_alive_column().unwrap();
            let right = f.right_alive_column().unwrap();
            prop_assert!(left <= right);
            let min_col = living.iter().map(|u| u.column).min().unwrap();
            let max_col = living.iter().map(|u| u.column).max().unwrap();
            prop_assert_eq!(left, min_col);
            prop_assert_eq!(right, max_col);

            let lowest = living.iter().map(|u| u.y + ENEMY_HEIGHT).max().unwrap();
            prop_assert_eq!(f.bottom(), lowest);
            prop_assert_eq!(f.move_interval(), move_interval_for(living.len()));
        }
    }
}
