//! Points table and kill attribution.

use rand::Rng;

use crate::config::{COLUMNS, HALF_COLUMNS, MYSTERY_CREDIT_BAND, MYSTERY_POINTS};
use crate::entities::{Score, Side};

/// Something that can be shot for points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Enemy { row: usize, column: usize },
    /// The mystery ship, by its x position at the moment it was hit.
    Mystery { x: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Credit {
    pub side: Side,
    pub points: u32,
}

pub fn points_for_row(row: usize) -> u32 {
    match row {
        0 => 30,
        1 | 2 => 20,
        3 | 4 => 10,
        _ => panic!("formation has no row {row}"),
    }
}

pub fn mystery_points(rng: &mut impl Rng) -> u32 {
    MYSTERY_POINTS[rng.gen_range(0..MYSTERY_POINTS.len())]
}

/// Columns 0–4 belong to the human, 5–9 to the AI.
pub fn side_for_column(column: usize) -> Side {
    assert!(column < COLUMNS, "formation has no column {column}");
    if column < HALF_COLUMNS {
        Side::Human
    } else {
        Side::Ai
    }
}

/// The mystery ship has no column; its x position is bucketed into
/// `MYSTERY_CREDIT_BAND`-wide bands instead.
pub fn side_for_mystery(x: i32) -> Side {
    if x.div_euclid(MYSTERY_CREDIT_BAND) < HALF_COLUMNS as i32 {
        Side::Human
    } else {
        Side::Ai
    }
}

pub fn credit_for(target: Target, rng: &mut impl Rng) -> Credit {
    match target {
        Target::Enemy { row, column } => Credit {
            side: side_for_column(column),
            points: points_for_row(row),
        },
        Target::Mystery { x } => Credit {
            side: side_for_mystery(x),
            points: mystery_points(rng),
        },
    }
}

/// Credit `target` to the right side of `score` and return what was awarded.
pub fn award(score: &mut Score, target: Target, rng: &mut impl Rng) -> Credit {
    let credit = credit_for(target, rng);
    score.credit(credit.side, credit.points);
    credit
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn row_points_table() {
        assert_eq!(points_for_row(0), 30);
        assert_eq!(points_for_row(1), 20);
        assert_eq!(points_for_row(2), 20);
        assert_eq!(points_for_row(3), 10);
        assert_eq!(points_for_row(4), 10);
    }

    #[test]
    fn column_halves() {
        assert_eq!(side_for_column(0), Side::Human);
        assert_eq!(side_for_column(4), Side::Human);
        assert_eq!(side_for_column(5), Side::Ai);
        assert_eq!(side_for_column(9), Side::Ai);
    }

    #[test]
    #[should_panic]
    fn column_outside_grid_is_a_bug() {
        side_for_column(COLUMNS);
    }

    #[test]
    fn mystery_bands() {
        assert_eq!(side_for_mystery(-60), Side::Human);
        assert_eq!(side_for_mystery(0), Side::Human);
        assert_eq!(side_for_mystery(399), Side::Human);
        assert_eq!(side_for_mystery(400), Side::Ai);
        assert_eq!(side_for_mystery(832), Side::Ai);
    }

    #[test]
    fn mystery_points_come_from_table() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(MYSTERY_POINTS.contains(&mystery_points(&mut rng)));
        }
    }

    #[test]
    fn award_updates_only_credited_side() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut score = Score::default();
        let credit = award(&mut score, Target::Enemy { row: 0, column: 7 }, &mut rng);
        assert_eq!(credit, Credit { side: Side::Ai, points: 30 });
        assert_eq!(score, Score { human: 0, ai: 30 });
    }
}
