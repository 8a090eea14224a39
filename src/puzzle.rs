use log::debug;
use rand::{seq::SliceRandom, Rng};
use std::fmt;

use crate::error::InputError;
use crate::goal::Goal;
use crate::solvability::is_solvable;

/// Direction in which the tile sliding into the blank moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Child generation order. Fixes which optimal solution is found first.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Displacement of the blank for this move, as `(row, col)`.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Direction::Left => (0, 1),
            Direction::Right => (0, -1),
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        write!(f, "{}", s)
    }
}

/// One grid configuration of the puzzle.
///
/// Tiles are stored row-major. A board is never modified once built: moves
/// produce new boards.
#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    tiles: Vec<u32>,
    zero: (usize, usize),
    last_move: Option<Direction>,
}

impl Board {
    /// Build a board from its rows.
    ///
    /// # Errors
    ///
    /// Fails when the rows do not form a square grid holding every value of
    /// `0..size*size` exactly once.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, InputError> {
        let size = rows.len();
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(InputError::InvalidTiles {
                reason: format!("row of length {} in a grid of {} rows", row.len(), size),
            });
        }
        Self::from_tiles(size, rows.into_iter().flatten().collect())
    }

    /// Build a board from `size * size` row-major tiles.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Board::from_rows`].
    pub fn from_tiles(size: usize, tiles: Vec<u32>) -> Result<Self, InputError> {
        if size == 0 {
            return Err(InputError::InvalidTiles {
                reason: "empty grid".to_string(),
            });
        }
        if tiles.len() != size * size {
            return Err(InputError::InvalidTiles {
                reason: format!("expected {} tiles, got {}", size * size, tiles.len()),
            });
        }

        let mut seen = vec![false; tiles.len()];
        for &value in &tiles {
            match seen.get_mut(value as usize) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(InputError::InvalidTiles {
                        reason: format!("tile {value} appears more than once"),
                    })
                }
                None => {
                    return Err(InputError::InvalidTiles {
                        reason: format!("tile {value} is out of range 0..={}", tiles.len() - 1),
                    })
                }
            }
        }

        // Every value is present once, so the blank is too
        let blank = tiles.iter().position(|&value| value == 0).unwrap_or_default();

        Ok(Self {
            size,
            tiles,
            zero: (blank / size, blank % size),
            last_move: None,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.tiles[row * self.size + col]
    }

    /// `(row, col)` of the blank.
    pub fn zero_coordinate(&self) -> (usize, usize) {
        self.zero
    }

    /// The move that produced this board from its parent, if any.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// Slide the tile that moves in `direction` into the blank.
    ///
    /// Returns `None` when no tile sits on that side of the blank.
    pub fn apply_move(&self, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.as_offset();

        let new_row = self.zero.0.checked_add_signed(dr)?;
        let new_col = self.zero.1.checked_add_signed(dc)?;
        if new_row >= self.size || new_col >= self.size {
            return None;
        }

        let mut tiles = self.tiles.clone();
        tiles.swap(
            self.zero.0 * self.size + self.zero.1,
            new_row * self.size + new_col,
        );

        Some(Self {
            size: self.size,
            tiles,
            zero: (new_row, new_col),
            last_move: Some(direction),
        })
    }

    /// Every board one move away, in [`Direction::ALL`] order.
    pub fn generate_children(&self) -> Vec<Self> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.apply_move(dir))
            .collect()
    }

    /// A uniformly shuffled board that can reach `goal`.
    pub fn shuffled<R: Rng + ?Sized>(goal: &Goal, rng: &mut R) -> Self {
        let size = goal.size();
        let mut flattened = goal.board().tiles.clone();
        let mut attempts = 0;

        loop {
            attempts += 1;
            flattened.shuffle(rng);

            let blank = flattened.iter().position(|&value| value == 0).unwrap_or_default();
            let board = Self {
                size,
                tiles: flattened.clone(),
                zero: (blank / size, blank % size),
                last_move: None,
            };

            if is_solvable(&board, goal) {
                debug!("Shuffled a solvable board after {attempts} attempt(s)");
                return board;
            }
        }
    }

    /// Walk `moves` random legal moves away from the goal, never undoing the
    /// previous move.
    pub fn scrambled<R: Rng + ?Sized>(goal: &Goal, moves: usize, rng: &mut R) -> Self {
        let mut board = goal.board().clone();
        for _ in 0..moves {
            let children: Vec<Self> = board
                .generate_children()
                .into_iter()
                .filter(|child| match (board.last_move, child.last_move) {
                    (Some(prev), Some(next)) => next != prev.opposite(),
                    _ => true,
                })
                .collect();
            match children.choose(rng) {
                Some(child) => board = child.clone(),
                None => break,
            }
        }
        board.last_move = None;
        board
    }
}

/// Boards are equal when their grids are, whatever move produced them.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.tiles == other.tiles
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.tiles.len() - 1).to_string().len();
        for row in self.tiles.chunks(self.size) {
            let line: Vec<String> = row.iter().map(|val| format!("{val:>width$}")).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
