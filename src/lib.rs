//! # n-puzzle
//!
//! Optimal solver for the sliding n-puzzle (8-puzzle, 15-puzzle, ...).
//!
//! A start [`Board`] is first checked against the [`Goal`] with a parity test
//! ([`is_solvable`]); solvable boards are handed to an IDA* [`Solver`] guided by
//! an admissible [`Heuristic`]. The result is a shortest list of [`Direction`]s,
//! each naming the way the tile sliding into the blank moves.
//!
//! ```
//! use n_puzzle::{Board, Direction, Goal, Outcome, Solver, SolverConfig};
//!
//! let goal = Goal::new(3, -1).unwrap();
//! let start = Board::from_rows(vec![vec![1, 2, 3], vec![4, 0, 6], vec![7, 5, 8]]).unwrap();
//! let outcome = Solver::new(&goal, SolverConfig::default()).solve(&start).unwrap();
//! assert_eq!(outcome, Outcome::Solved(vec![Direction::Up, Direction::Left]));
//! ```

pub mod error;
pub mod goal;
pub mod heuristic;
pub mod instance;
pub mod puzzle;
pub mod solvability;
pub mod solver;

pub use error::{Error, InputError, SolveError};
pub use goal::Goal;
pub use heuristic::Heuristic;
pub use instance::Instance;
pub use puzzle::{Board, Direction};
pub use solvability::is_solvable;
pub use solver::{Outcome, SearchStats, Solver, SolverConfig, Strategy};
