//! Piece - a positioned, rotatable instance of a shape kind
//!
//! A piece is a small `Copy` value. Movement attempts build a candidate piece,
//! validate it against the board and only then replace the active piece, so
//! nothing here checks validity.

use rand::Rng;

use crate::shapes::{self, Mask};
use crate::types::{Coord, Rgb, ShapeKind, SPAWN_COL, SPAWN_ROW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    /// Column of the mask origin
    pub col: i8,
    /// Row of the mask origin; negative while in the spawn buffer
    pub row: i8,
    /// Index into the kind's rotation states, always kept reduced
    pub rotation: usize,
}

impl Piece {
    /// Create a piece at the spawn origin in its first rotation state
    pub fn new(kind: ShapeKind) -> Self {
        Self::at(kind, SPAWN_COL, SPAWN_ROW)
    }

    /// Create a piece at an arbitrary origin in its first rotation state
    pub fn at(kind: ShapeKind, col: i8, row: i8) -> Self {
        Self {
            kind,
            col,
            row,
            rotation: 0,
        }
    }

    /// Spawn a piece of a uniformly random kind
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let kind = ShapeKind::ALL[rng.gen_range(0..ShapeKind::ALL.len())];
        Self::new(kind)
    }

    pub fn mask(&self) -> &'static Mask {
        shapes::mask(self.kind, self.rotation)
    }

    pub fn color(&self) -> Rgb {
        shapes::color(self.kind)
    }

    /// The four absolute cells covered by the piece.
    ///
    /// Recomputed from the catalog on every call. Saturates at the `i8`
    /// bounds, which are far outside the board.
    pub fn occupied_cells(&self) -> [Coord; 4] {
        self.mask()
            .map(|(dc, dr)| (self.col.saturating_add(dc), self.row.saturating_add(dr)))
    }

    /// Shift the origin in place.
    ///
    /// Returns false and leaves the piece untouched when the new origin would
    /// leave the representable range, so a piece wandering through the spawn
    /// buffer simply stops there.
    pub fn translate(&mut self, dcol: i8, drow: i8) -> bool {
        match (shift_origin(self.col, dcol), shift_origin(self.row, drow)) {
            (Some(col), Some(row)) => {
                self.col = col;
                self.row = row;
                true
            }
            _ => false,
        }
    }

    /// Copy of this piece shifted by the given delta, if representable
    pub fn translated(&self, dcol: i8, drow: i8) -> Option<Self> {
        let mut moved = *self;
        moved.translate(dcol, drow).then_some(moved)
    }

    /// Copy of this piece advanced one rotation state clockwise
    pub fn rotate_cw(&self) -> Self {
        let count = shapes::rotation_states(self.kind).len();
        Self {
            rotation: (self.rotation + 1) % count,
            ..*self
        }
    }

    /// Lowest (largest index) row covered by the piece
    pub fn bottom_row(&self) -> i8 {
        self.occupied_cells()
            .iter()
            .map(|&(_, r)| r)
            .max()
            .unwrap_or(self.row)
    }
}

/// Largest origin coordinate whose mask cells (offsets 0..=3) still fit in `i8`
const ORIGIN_MAX: i8 = i8::MAX - 3;

fn shift_origin(origin: i8, delta: i8) -> Option<i8> {
    origin.checked_add(delta).filter(|&v| v <= ORIGIN_MAX)
}
