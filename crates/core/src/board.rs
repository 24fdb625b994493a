//! Board module - the locked-cell grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that locked there. Storage is a flat row-major array, so shifting rows
//! after a clear is a single overlapping copy.
//! Coordinates: (col, row), col 0..9 left to right, row 0..19 top to bottom.
//!
//! The falling piece is never written here; only [`Board::lock`] places cells
//! and only [`Board::clear_full_rows`] removes them during play.

use crate::piece::Piece;
use crate::shapes;
use crate::types::{Cell, Rgb, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// Row-major color materialization of the board, `grid[row][col]`
pub type ColorGrid = [[Option<Rgb>; WIDTH]; HEIGHT];

/// Result of locking a piece
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    /// All four cells were written
    Locked,
    /// At least one cell was above the grid; the board is unchanged
    TopOut,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= BOARD_WIDTH as i8 || row < 0 || row >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some(row as usize * WIDTH + col as usize)
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (col, row), `None` when out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Overwrite a single cell, returns false if out of bounds.
    ///
    /// Used to set up positions; gameplay goes through `lock`.
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Whether every cell of `piece` may be occupied.
    ///
    /// Cells above the grid are always accepted. Any other cell must be in
    /// bounds and empty.
    pub fn is_valid(&self, piece: &Piece) -> bool {
        piece
            .occupied_cells()
            .iter()
            .all(|&(col, row)| row < 0 || matches!(self.get(col, row), Some(None)))
    }

    /// Write the piece's cells into the grid.
    ///
    /// If any cell is above the grid nothing is written and `TopOut` is
    /// returned.
    pub fn lock(&mut self, piece: &Piece) -> LockOutcome {
        let cells = piece.occupied_cells();
        if cells.iter().any(|&(_, row)| row < 0) {
            return LockOutcome::TopOut;
        }
        for (col, row) in cells {
            self.set(col, row, Some(piece.kind));
        }
        LockOutcome::Locked
    }

    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        let start = row * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|c| c.is_some())
    }

    pub fn is_row_empty(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return true;
        }
        let start = row * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|c| c.is_none())
    }

    /// Remove `row` and move every row above it down by one
    fn remove_row(&mut self, row: usize) {
        self.cells.copy_within(0..row * WIDTH, WIDTH);
        self.cells[..WIDTH].fill(None);
    }

    /// Clear every full row, bottom to top, and return how many were cleared.
    ///
    /// After a clear the same row index is checked again because the row above
    /// has just moved into it. Non-contiguous full rows are handled in one
    /// pass.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut cursor = HEIGHT;
        while cursor > 0 {
            let row = cursor - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
            } else {
                cursor -= 1;
            }
        }
        cleared
    }

    /// Whether any locked cell sits in the top row
    pub fn reaches_top(&self) -> bool {
        !self.is_row_empty(0)
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Colors of the locked cells for the presentation layer
    pub fn render_grid(&self) -> ColorGrid {
        let mut grid = [[None; WIDTH]; HEIGHT];
        self.render_grid_into(&mut grid);
        grid
    }

    pub fn render_grid_into(&self, out: &mut ColorGrid) {
        for (row, line) in out.iter_mut().enumerate() {
            let start = row * WIDTH;
            for (slot, cell) in line.iter_mut().zip(&self.cells[start..start + WIDTH]) {
                *slot = cell.map(shapes::color);
            }
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
