//! Target configuration of the puzzle.

use crate::error::InputError;
use crate::puzzle::Board;

/// The goal board: tiles `1..N` in row-major order with the blank at a chosen
/// flattened index.
#[derive(Debug, Clone)]
pub struct Goal {
    board: Board,
    // Goal coordinate of each tile value, indexed by value.
    positions: Vec<(usize, usize)>,
}

impl Goal {
    /// Lay out the goal for a `size × size` board.
    ///
    /// `blank_index` is the flattened index where the blank must land, or `-1`
    /// for the last cell.
    ///
    /// # Errors
    ///
    /// Fails when `size` is zero or `blank_index` is outside `-1..size*size`.
    pub fn new(size: usize, blank_index: i64) -> Result<Self, InputError> {
        let cells = size * size;
        let blank = match blank_index {
            -1 => cells.saturating_sub(1),
            index => match usize::try_from(index) {
                Ok(index) if index < cells => index,
                _ => {
                    return Err(InputError::BlankIndexOutOfRange {
                        index: blank_index,
                        cells,
                    })
                }
            },
        };

        let mut number = 1;
        let tiles: Vec<u32> = (0..cells)
            .map(|idx| {
                if idx == blank {
                    0
                } else {
                    let value = number;
                    number += 1;
                    value
                }
            })
            .collect();

        let board = Board::from_tiles(size, tiles)?;

        let mut positions = vec![(0, 0); cells];
        for (idx, &value) in board.tiles().iter().enumerate() {
            positions[value as usize] = (idx / size, idx % size);
        }

        Ok(Self { board, positions })
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn zero_coordinate(&self) -> (usize, usize) {
        self.board.zero_coordinate()
    }

    pub fn is_goal(&self, board: &Board) -> bool {
        *board == self.board
    }

    /// Goal `(row, col)` of tile `value`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not a tile of this puzzle.
    pub fn element_coordinate(&self, value: u32) -> (usize, usize) {
        self.positions[value as usize]
    }
}
