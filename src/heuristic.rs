//! Admissible estimates of the number of moves left.

use clap::ValueEnum;

use crate::goal::Goal;
use crate::puzzle::Board;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Heuristic {
    /// Sum of the Manhattan distances of every tile to its goal cell.
    #[default]
    Manhattan,
    /// Manhattan distance plus two moves per tile that must leave its row or
    /// column to let another tile past.
    LinearConflict,
}

impl Heuristic {
    pub fn estimate(self, board: &Board, goal: &Goal) -> usize {
        match self {
            Heuristic::Manhattan => manhattan_distance(board, goal),
            Heuristic::LinearConflict => {
                manhattan_distance(board, goal) + 2 * linear_conflicts(board, goal)
            }
        }
    }
}

pub fn manhattan_distance(board: &Board, goal: &Goal) -> usize {
    let size = board.size();
    let mut distance = 0;
    for i in 0..size {
        for j in 0..size {
            let value = board.get(i, j);
            if value != 0 {
                let (target_x, target_y) = goal.element_coordinate(value);
                distance += i.abs_diff(target_x) + j.abs_diff(target_y);
            }
        }
    }
    distance
}

/// Number of tiles that have to step out of their goal row or column.
///
/// In each line, tiles that belong to that line and already appear in goal
/// order (a longest increasing run) can stay; every other one of them must
/// leave and come back. Row and column counts add up because the first needs
/// vertical moves and the second horizontal ones.
pub fn linear_conflicts(board: &Board, goal: &Goal) -> usize {
    let size = board.size();
    let mut conflicts = 0;

    // Row conflicts
    for row in 0..size {
        let line: Vec<usize> = (0..size)
            .map(|col| board.get(row, col))
            .filter(|&value| value != 0)
            .map(|value| goal.element_coordinate(value))
            .filter(|&(goal_row, _)| goal_row == row)
            .map(|(_, goal_col)| goal_col)
            .collect();
        conflicts += line.len() - longest_increasing(&line);
    }

    // Column conflicts
    for col in 0..size {
        let line: Vec<usize> = (0..size)
            .map(|row| board.get(row, col))
            .filter(|&value| value != 0)
            .map(|value| goal.element_coordinate(value))
            .filter(|&(_, goal_col)| goal_col == col)
            .map(|(goal_row, _)| goal_row)
            .collect();
        conflicts += line.len() - longest_increasing(&line);
    }

    conflicts
}

// Lines are at most a board width long, so the quadratic version is enough.
fn longest_increasing(values: &[usize]) -> usize {
    let mut best = vec![1; values.len()];
    for i in 1..values.len() {
        for j in 0..i {
            if values[j] < values[i] && best[j] + 1 > best[i] {
                best[i] = best[j] + 1;
            }
        }
    }
    best.into_iter().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(rows: &[&[u32]]) -> Board {
        Board::from_rows(rows.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_manhattan_distance() {
        let goal = Goal::new(3, -1).unwrap();
        assert_eq!(
            manhattan_distance(&board(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]), &goal),
            2
        );
        // Every tile is as far as it can be from home
        assert_eq!(
            manhattan_distance(&board(&[&[8, 7, 6], &[5, 4, 3], &[2, 1, 0]]), &goal),
            16
        );
    }

    #[test]
    fn test_zero_exactly_at_goal() {
        for blank in [-1, 0, 7] {
            let goal = Goal::new(4, blank).unwrap();
            for heuristic in [Heuristic::Manhattan, Heuristic::LinearConflict] {
                assert_eq!(heuristic.estimate(goal.board(), &goal), 0);
            }

            let mut rng = StdRng::seed_from_u64(11);
            for _ in 0..50 {
                let b = Board::shuffled(&goal, &mut rng);
                for heuristic in [Heuristic::Manhattan, Heuristic::LinearConflict] {
                    assert_eq!(heuristic.estimate(&b, &goal) == 0, goal.is_goal(&b));
                }
            }
        }
    }

    #[test]
    fn test_linear_conflicts() {
        let goal = Goal::new(3, -1).unwrap();
        // 2 and 1 swapped in their goal row: one of them must step out
        let b = board(&[&[2, 1, 3], &[4, 5, 6], &[7, 8, 0]]);
        assert_eq!(linear_conflicts(&b, &goal), 1);
        assert_eq!(Heuristic::LinearConflict.estimate(&b, &goal), 4);

        // Reversed row: only 3 needs to leave for 1 and 2 to pass
        let b = board(&[&[3, 1, 2], &[4, 5, 6], &[7, 8, 0]]);
        assert_eq!(linear_conflicts(&b, &goal), 1);

        let b = board(&[&[3, 2, 1], &[4, 5, 6], &[7, 8, 0]]);
        assert_eq!(linear_conflicts(&b, &goal), 2);

        // Column conflict between 1 and 4
        let b = board(&[&[4, 2, 3], &[1, 5, 6], &[7, 8, 0]]);
        assert_eq!(linear_conflicts(&b, &goal), 1);
    }

    #[test]
    fn test_linear_conflict_dominates_manhattan() {
        let goal = Goal::new(4, -1).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let b = Board::shuffled(&goal, &mut rng);
            assert!(
                Heuristic::LinearConflict.estimate(&b, &goal)
                    >= Heuristic::Manhattan.estimate(&b, &goal)
            );
        }
    }
}
