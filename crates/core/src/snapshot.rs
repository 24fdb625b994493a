use crate::board::ColorGrid;
use crate::piece::Piece;
use crate::shapes::{self, Mask};
use crate::types::{Coord, Rgb, RunStatus, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};

/// The falling piece as the presentation layer sees it.
///
/// `cells` may include rows above the grid; renderers skip those.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub cells: [Coord; 4],
    pub color: Rgb,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            cells: value.occupied_cells(),
            color: value.color(),
        }
    }
}

/// Preview of the queued piece, in its first rotation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextSnapshot {
    pub kind: ShapeKind,
    pub rotation: usize,
    pub mask: Mask,
    pub color: Rgb,
}

impl From<Piece> for NextSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            mask: *value.mask(),
            color: value.color(),
        }
    }
}

/// Read-only copy of everything the presentation layer draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub grid: ColorGrid,
    pub active: Option<ActiveSnapshot>,
    pub next: NextSnapshot,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub status: RunStatus,
    pub quit_requested: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == RunStatus::Playing
    }

    /// Color at (col, row) with the active piece drawn over the locked cells
    pub fn color_at(&self, col: i8, row: i8) -> Option<Rgb> {
        if let Some(active) = &self.active {
            if active.cells.contains(&(col, row)) {
                return Some(active.color);
            }
        }
        if col < 0 || row < 0 {
            return None;
        }
        self.grid
            .get(row as usize)
            .and_then(|line| line.get(col as usize))
            .copied()
            .flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            next: NextSnapshot {
                kind: ShapeKind::I,
                rotation: 0,
                mask: *shapes::mask(ShapeKind::I, 0),
                color: shapes::color(ShapeKind::I),
            },
            score: 0,
            lines: 0,
            level: 1,
            status: RunStatus::Playing,
            quit_requested: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_cells_overlay_grid() {
        let mut snap = GameSnapshot::default();
        snap.grid[19][0] = Some(Rgb::new(1, 2, 3));
        snap.active = Some(ActiveSnapshot::from(Piece::at(ShapeKind::O, 4, 10)));

        assert_eq!(snap.color_at(0, 19), Some(Rgb::new(1, 2, 3)));
        assert_eq!(snap.color_at(4, 10), Some(shapes::color(ShapeKind::O)));
        assert_eq!(snap.color_at(9, 0), None);
        assert_eq!(snap.color_at(-1, 5), None);
    }
}
