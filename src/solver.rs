//! Iterative-deepening A* over board configurations.
//!
//! Each pass is a depth-first search that cuts every branch whose
//! `f = g + h` exceeds the current threshold. A pass that misses the goal
//! raises the threshold to the smallest `f` it cut, so the first solution found
//! is a shortest one as long as the heuristic is admissible. Children are tried
//! in [`Direction::ALL`] order, which makes the returned sequence deterministic.

use clap::ValueEnum;
use log::{debug, info, warn};
use rustc_hash::FxHashMap;
use std::mem;

use crate::error::SolveError;
use crate::goal::Goal;
use crate::heuristic::Heuristic;
use crate::puzzle::{Board, Direction};
use crate::solvability::is_solvable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    /// Plain recursive IDA*.
    #[default]
    Recursive,
    /// IDA* that also remembers, within one pass, the lowest depth at which
    /// each grid was expanded and skips repeats at equal or greater depth.
    Memoized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub strategy: Strategy,
    pub heuristic: Heuristic,
    /// Stop after expanding this many nodes.
    pub node_limit: Option<u64>,
    /// Skip the child that undoes the move leading to the current board.
    pub prune_reversals: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            heuristic: Heuristic::default(),
            node_limit: None,
            prune_reversals: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Moves from the start to the goal, first move first.
    Solved(Vec<Direction>),
    /// The parity check rejected the board.
    Unsolvable,
    /// The node limit was reached before the goal.
    BudgetExhausted { nodes: u64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of bounded passes run.
    pub iterations: usize,
    /// Nodes expanded over all passes.
    pub nodes: u64,
    /// Threshold of the last pass.
    pub threshold: usize,
}

enum Search {
    Found,
    /// Smallest `f` cut in the subtree, `usize::MAX` if none.
    Exceeded(usize),
    OutOfBudget,
}

pub struct Solver<'a> {
    goal: &'a Goal,
    config: SolverConfig,
    path: Vec<Direction>,
    visited: FxHashMap<Box<[u32]>, usize>,
    stats: SearchStats,
}

impl<'a> Solver<'a> {
    pub fn new(goal: &'a Goal, config: SolverConfig) -> Self {
        Self {
            goal,
            config,
            path: Vec::new(),
            visited: FxHashMap::default(),
            stats: SearchStats::default(),
        }
    }

    /// Counters of the last call to [`Solver::solve`].
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Find a shortest move sequence from `start` to the goal.
    ///
    /// # Errors
    ///
    /// Fails when `start` does not have the goal's dimension, or when a pass
    /// cuts no branch at all, which means the goal is unreachable despite the
    /// parity check.
    pub fn solve(&mut self, start: &Board) -> Result<Outcome, SolveError> {
        if start.size() != self.goal.size() {
            return Err(SolveError::DimensionMismatch {
                board: start.size(),
                goal: self.goal.size(),
            });
        }

        self.path.clear();
        self.stats = SearchStats::default();

        if !is_solvable(start, self.goal) {
            info!("Board fails the parity check, not searching");
            return Ok(Outcome::Unsolvable);
        }

        let mut threshold = self.heuristic(start);
        loop {
            self.stats.iterations += 1;
            self.stats.threshold = threshold;
            self.visited.clear();
            debug!(
                "Pass {} with threshold {threshold} ({} nodes so far)",
                self.stats.iterations, self.stats.nodes
            );

            match self.search(start, 0, threshold) {
                Search::Found => {
                    info!(
                        "Found a {}-move solution after {} pass(es), {} nodes",
                        self.path.len(),
                        self.stats.iterations,
                        self.stats.nodes
                    );
                    return Ok(Outcome::Solved(mem::take(&mut self.path)));
                }
                Search::OutOfBudget => {
                    warn!(
                        "Node limit reached at threshold {threshold} after {} nodes",
                        self.stats.nodes
                    );
                    self.path.clear();
                    return Ok(Outcome::BudgetExhausted {
                        nodes: self.stats.nodes,
                    });
                }
                Search::Exceeded(usize::MAX) => {
                    return Err(SolveError::ThresholdExhausted { threshold });
                }
                Search::Exceeded(next) => threshold = next,
            }
        }
    }

    fn heuristic(&self, board: &Board) -> usize {
        self.config.heuristic.estimate(board, self.goal)
    }

    fn search(&mut self, board: &Board, g: usize, threshold: usize) -> Search {
        if self.config.strategy == Strategy::Memoized {
            if let Some(&seen) = self.visited.get(board.tiles()) {
                if seen <= g {
                    return Search::Exceeded(usize::MAX);
                }
            }
            self.visited.insert(board.tiles().into(), g);
        }

        let f = g + self.heuristic(board);
        if f > threshold {
            return Search::Exceeded(f);
        }
        if self.goal.is_goal(board) {
            return Search::Found;
        }

        if let Some(limit) = self.config.node_limit {
            if self.stats.nodes >= limit {
                return Search::OutOfBudget;
            }
        }
        self.stats.nodes += 1;

        let mut min = usize::MAX;
        for child in board.generate_children() {
            let Some(dir) = child.last_move() else {
                continue;
            };
            if self.config.prune_reversals && board.last_move() == Some(dir.opposite()) {
                continue;
            }

            self.path.push(dir);
            match self.search(&child, g + 1, threshold) {
                Search::Found => return Search::Found,
                Search::OutOfBudget => return Search::OutOfBudget,
                Search::Exceeded(t) => min = min.min(t),
            }
            self.path.pop();
        }

        Search::Exceeded(min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rustc_hash::FxHashSet;
    use std::collections::VecDeque;

    use crate::puzzle::Direction::{Down, Left, Right, Up};

    fn board(rows: &[&[u32]]) -> Board {
        Board::from_rows(rows.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    fn all_configs() -> Vec<SolverConfig> {
        let mut configs = Vec::new();
        for strategy in [Strategy::Recursive, Strategy::Memoized] {
            for heuristic in [Heuristic::Manhattan, Heuristic::LinearConflict] {
                for prune_reversals in [true, false] {
                    configs.push(SolverConfig {
                        strategy,
                        heuristic,
                        node_limit: None,
                        prune_reversals,
                    });
                }
            }
        }
        configs
    }

    fn solve(start: &Board, goal: &Goal, config: SolverConfig) -> Outcome {
        Solver::new(goal, config).solve(start).unwrap()
    }

    fn replay(start: &Board, moves: &[Direction]) -> Board {
        moves.iter().fold(start.clone(), |b, &dir| {
            b.apply_move(dir).expect("solution contains an illegal move")
        })
    }

    /// Length of a shortest solution by breadth-first search.
    fn bfs_distance(start: &Board, goal: &Goal) -> usize {
        let mut seen = FxHashSet::default();
        let mut queue = VecDeque::from([(start.clone(), 0)]);
        seen.insert(start.tiles().to_vec());
        while let Some((b, depth)) = queue.pop_front() {
            if goal.is_goal(&b) {
                return depth;
            }
            for child in b.generate_children() {
                if seen.insert(child.tiles().to_vec()) {
                    queue.push_back((child, depth + 1));
                }
            }
        }
        panic!("goal unreachable");
    }

    #[test]
    fn test_one_move() {
        let goal = Goal::new(3, -1).unwrap();
        let start = board(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]);
        assert_eq!(
            solve(&start, &goal, SolverConfig::default()),
            Outcome::Solved(vec![Left])
        );
    }

    #[test]
    fn test_two_moves() {
        // 5 slides up, then 8 slides left
        let goal = Goal::new(3, -1).unwrap();
        let start = board(&[&[1, 2, 3], &[4, 0, 6], &[7, 5, 8]]);
        for config in all_configs() {
            assert_eq!(solve(&start, &goal, config), Outcome::Solved(vec![Up, Left]));
        }
    }

    #[test]
    fn test_unique_four_moves() {
        let goal = Goal::new(3, -1).unwrap();
        let start = board(&[&[0, 1, 3], &[4, 2, 5], &[7, 8, 6]]);
        assert_eq!(
            solve(&start, &goal, SolverConfig::default()),
            Outcome::Solved(vec![Left, Up, Left, Up])
        );
    }

    #[test]
    fn test_start_is_goal() {
        let goal = Goal::new(4, -1).unwrap();
        let mut solver = Solver::new(&goal, SolverConfig::default());
        assert_eq!(solver.solve(goal.board()).unwrap(), Outcome::Solved(vec![]));
        assert_eq!(solver.stats().iterations, 1);
        assert_eq!(solver.stats().nodes, 0);
    }

    #[test]
    fn test_unsolvable_skips_search() {
        let goal = Goal::new(4, -1).unwrap();
        let start = board(&[
            &[1, 2, 3, 4],
            &[5, 6, 7, 8],
            &[9, 10, 11, 12],
            &[13, 15, 14, 0],
        ]);
        let mut solver = Solver::new(&goal, SolverConfig::default());
        assert_eq!(solver.solve(&start).unwrap(), Outcome::Unsolvable);
        assert_eq!(solver.stats(), SearchStats::default());
    }

    #[test]
    fn test_dimension_mismatch() {
        let goal = Goal::new(3, -1).unwrap();
        let start = board(&[&[1, 2], &[3, 0]]);
        assert_eq!(
            Solver::new(&goal, SolverConfig::default()).solve(&start),
            Err(SolveError::DimensionMismatch { board: 2, goal: 3 })
        );
    }

    #[test]
    fn test_optimal_against_bfs() {
        let mut rng = StdRng::seed_from_u64(2024);
        for blank in [-1, 0, 4] {
            let goal = Goal::new(3, blank).unwrap();
            for _ in 0..5 {
                let start = Board::scrambled(&goal, 16, &mut rng);
                let optimal = bfs_distance(&start, &goal);
                for config in all_configs() {
                    let Outcome::Solved(moves) = solve(&start, &goal, config) else {
                        panic!("expected a solution for\n{start}");
                    };
                    assert_eq!(moves.len(), optimal, "{config:?}\n{start}");
                    assert!(goal.is_goal(&replay(&start, &moves)));
                }
            }
        }
    }

    #[test]
    fn test_strategies_agree_on_fifteen_puzzle() {
        let goal = Goal::new(4, -1).unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..3 {
            let start = Board::scrambled(&goal, 20, &mut rng);
            let reference = solve(&start, &goal, SolverConfig::default());
            let Outcome::Solved(ref moves) = reference else {
                panic!("expected a solution for\n{start}");
            };
            assert!(goal.is_goal(&replay(&start, moves)));

            for strategy in [Strategy::Recursive, Strategy::Memoized] {
                for heuristic in [Heuristic::Manhattan, Heuristic::LinearConflict] {
                    let config = SolverConfig {
                        strategy,
                        heuristic,
                        ..SolverConfig::default()
                    };
                    assert_eq!(solve(&start, &goal, config), reference, "{config:?}\n{start}");
                }
            }
        }
    }

    #[test]
    fn test_memoized_keeps_first_solution() {
        let mut rng = StdRng::seed_from_u64(600);
        for blank in [-1, 0, 4] {
            let goal = Goal::new(3, blank).unwrap();
            for _ in 0..10 {
                let start = Board::scrambled(&goal, 30, &mut rng);
                let reference = solve(&start, &goal, SolverConfig::default());
                for config in all_configs() {
                    assert_eq!(solve(&start, &goal, config), reference, "{config:?}\n{start}");
                }
            }
        }
    }

    #[test]
    fn test_reversal_pruning_keeps_first_solution() {
        let goal = Goal::new(3, -1).unwrap();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..5 {
            let start = Board::scrambled(&goal, 12, &mut rng);
            let pruned = solve(&start, &goal, SolverConfig::default());
            let unpruned = solve(
                &start,
                &goal,
                SolverConfig {
                    prune_reversals: false,
                    ..SolverConfig::default()
                },
            );
            assert_eq!(pruned, unpruned);
        }
    }

    #[test]
    fn test_deterministic() {
        let goal = Goal::new(4, -1).unwrap();
        let start = Board::scrambled(&goal, 24, &mut StdRng::seed_from_u64(1));
        let mut solver = Solver::new(&goal, SolverConfig::default());
        let first = solver.solve(&start).unwrap();
        let first_stats = solver.stats();
        let second = solver.solve(&start).unwrap();
        assert_eq!(first, second);
        assert_eq!(first_stats, solver.stats());
    }

    #[test]
    fn test_node_limit() {
        let goal = Goal::new(3, -1).unwrap();
        let start = board(&[&[8, 6, 7], &[2, 5, 4], &[3, 0, 1]]);
        let config = SolverConfig {
            node_limit: Some(100),
            ..SolverConfig::default()
        };
        assert_eq!(
            solve(&start, &goal, config),
            Outcome::BudgetExhausted { nodes: 100 }
        );

        // A solved board needs no expansion at all
        let config = SolverConfig {
            node_limit: Some(0),
            ..SolverConfig::default()
        };
        assert_eq!(solve(goal.board(), &goal, config), Outcome::Solved(vec![]));
    }

    #[test]
    fn test_non_default_goal() {
        let goal = Goal::new(2, 0).unwrap();
        let start = board(&[&[1, 3], &[2, 0]]);
        let Outcome::Solved(moves) = solve(&start, &goal, SolverConfig::default()) else {
            panic!("expected a solution");
        };
        assert_eq!(moves.len(), bfs_distance(&start, &goal));
        assert!(goal.is_goal(&replay(&start, &moves)));
        assert!(moves.iter().all(|dir| [Left, Right, Up, Down].contains(dir)));
    }
}
