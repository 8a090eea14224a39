//! Reading a puzzle instance.
//!
//! The input is a stream of whitespace separated integers:
//!
//! ```text
//! 8          <- N, number of tiles (the board has N + 1 cells)
//! -1         <- flattened index of the blank in the goal, -1 for the last cell
//! 1 2 3      <- sqrt(N + 1) rows of the start board
//! 4 0 6
//! 7 5 8
//! ```
//!
//! Line breaks carry no meaning and anything after the last row is ignored.

use log::debug;
use std::fmt;
use std::io::Read;

use crate::error::InputError;
use crate::goal::Goal;
use crate::puzzle::Board;

const MAX_RESERVED_TILES: usize = 4096;

#[derive(Debug, Clone)]
pub struct Instance {
    pub tile_count: usize,
    pub blank_index: i64,
    pub board: Board,
}

impl Instance {
    /// Read a whole instance from `reader`.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors and on any malformed value, see [`Instance::parse`].
    pub fn read<R: Read>(mut reader: R) -> Result<Self, InputError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input)
    }

    /// # Errors
    ///
    /// Fails when a token is not an integer, when the input ends early, when
    /// `N + 1` is not a perfect square, when the blank index is out of range,
    /// or when the rows are not a permutation of `0..=N`.
    pub fn parse(input: &str) -> Result<Self, InputError> {
        let mut tokens = input.split_whitespace();

        let tile_count = next_integer(&mut tokens, "tile count")?;
        let size = board_size(tile_count)?;
        let blank_index = next_integer(&mut tokens, "goal blank index")?;
        debug!("Reading a {size}x{size} board, goal blank index {blank_index}");

        // The tile count is untrusted, so only reserve for boards of plausible size
        let cells = size * size;
        let mut tiles = Vec::with_capacity(cells.min(MAX_RESERVED_TILES));
        for _ in 0..cells {
            let value = next_integer(&mut tokens, "tile")?;
            let tile = u32::try_from(value).map_err(|_| InputError::InvalidTiles {
                reason: format!("tile {value} is out of range"),
            })?;
            tiles.push(tile);
        }

        let board = Board::from_tiles(size, tiles)?;

        // Reject a bad blank index now rather than when the goal is built
        Goal::new(size, blank_index)?;

        Ok(Self {
            tile_count: size * size - 1,
            blank_index,
            board,
        })
    }

    /// A random solvable instance for the given goal.
    pub fn random<R: rand::Rng + ?Sized>(goal: &Goal, blank_index: i64, rng: &mut R) -> Self {
        let size = goal.size();
        Self {
            tile_count: size * size - 1,
            blank_index,
            board: Board::shuffled(goal, rng),
        }
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    /// # Errors
    ///
    /// Fails when the blank index is out of range.
    pub fn goal(&self) -> Result<Goal, InputError> {
        Goal::new(self.size(), self.blank_index)
    }
}

/// Prints the instance in the format [`Instance::parse`] reads.
impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.tile_count)?;
        writeln!(f, "{}", self.blank_index)?;
        write!(f, "{}", self.board)
    }
}

fn next_integer<'a, I>(tokens: &mut I, what: &'static str) -> Result<i64, InputError>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or(InputError::MissingValue { what })?;
    token.parse().map_err(|_| InputError::InvalidInteger {
        what,
        token: token.to_string(),
    })
}

fn board_size(tile_count: i64) -> Result<usize, InputError> {
    let cells = usize::try_from(tile_count)
        .ok()
        .and_then(|count| count.checked_add(1))
        .ok_or(InputError::NotSquare { tile_count })?;

    let mut size = (cells as f64).sqrt() as usize;
    while size * size > cells {
        size -= 1;
    }
    while (size + 1) * (size + 1) <= cells {
        size += 1;
    }

    if size * size == cells {
        Ok(size)
    } else {
        Err(InputError::NotSquare { tile_count })
    }
}
