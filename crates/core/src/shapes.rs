//! Shape catalog - rotation states and colors of the seven kinds
//!
//! Each rotation state is a 4x4 occupancy mask stored as four (col, row)
//! offsets from the piece origin, listed in row-major scan order.
//! O has one state, I/S/Z have two, J/L/T have four. Rotating clockwise
//! walks forward through the list and wraps.

use crate::types::{Coord, Rgb, ShapeKind};

/// Offsets of the four cells of one rotation state
pub type Mask = [Coord; 4];

const S_STATES: [Mask; 2] = [
    // .SS.
    // SS..
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    // S...
    // SS..
    // .S..
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_STATES: [Mask; 2] = [
    // ZZ..
    // .ZZ.
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    // .Z..
    // ZZ..
    // Z...
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const I_STATES: [Mask; 2] = [
    // vertical in column 1
    [(1, 0), (1, 1), (1, 2), (1, 3)],
    // IIII
    [(0, 0), (1, 0), (2, 0), (3, 0)],
];

const O_STATES: [Mask; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

const J_STATES: [Mask; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_STATES: [Mask; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

const T_STATES: [Mask; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

/// Ordered rotation states of a kind
pub fn rotation_states(kind: ShapeKind) -> &'static [Mask] {
    match kind {
        ShapeKind::S => &S_STATES,
        ShapeKind::Z => &Z_STATES,
        ShapeKind::I => &I_STATES,
        ShapeKind::O => &O_STATES,
        ShapeKind::J => &J_STATES,
        ShapeKind::L => &L_STATES,
        ShapeKind::T => &T_STATES,
    }
}

/// Mask for a rotation index, taken modulo the kind's state count
pub fn mask(kind: ShapeKind, rotation: usize) -> &'static Mask {
    let states = rotation_states(kind);
    &states[rotation % states.len()]
}

/// Display color of a kind
pub fn color(kind: ShapeKind) -> Rgb {
    match kind {
        ShapeKind::S => Rgb::new(48, 190, 120),
        ShapeKind::Z => Rgb::new(220, 60, 80),
        ShapeKind::I => Rgb::new(80, 200, 220),
        ShapeKind::O => Rgb::new(240, 200, 80),
        ShapeKind::J => Rgb::new(80, 120, 220),
        ShapeKind::L => Rgb::new(240, 160, 60),
        ShapeKind::T => Rgb::new(180, 80, 190),
    }
}
