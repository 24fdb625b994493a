//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the whole simulation: shapes, pieces, the board and the
//! engine state machine. It has no dependency on terminals or input devices;
//! a host feeds it elapsed time and [`Intent`](types::Intent)s and draws the
//! [`GameSnapshot`] it returns.
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven kinds, their rotation masks and colors
//! - [`piece`]: a positioned, rotatable piece value
//! - [`board`]: 10x20 locked-cell grid with validity checks and line clearing
//! - [`scoring`]: line clear score table, levels and fall intervals
//! - [`engine`]: the state machine tying everything together
//! - [`snapshot`]: read-only per-frame view for renderers
//!
//! # Game Rules
//!
//! - Pieces spawn at column 3, row -2 with a uniformly random kind
//! - Rotation is clockwise only, with horizontal kicks `[0, -1, +1, -2, +2]`
//! - A piece locks as soon as gravity cannot move it down; hard drop locks at once
//! - Clears score 100/300/500/800 for 1-4 rows, level is `1 + lines / 10`
//! - Locking with a cell above the grid, or any locked cell in row 0, ends the game
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_core::Engine;
//! use blockfall_types::{Intent, RunStatus};
//!
//! let mut engine = Engine::with_seed(12345);
//! let snap = engine.step(
//!     Duration::from_millis(16),
//!     &[Intent::Left, Intent::RotateCw, Intent::HardDrop],
//! );
//!
//! assert_eq!(snap.status, RunStatus::Playing);
//! assert_eq!(engine.board().filled_count(), 4);
//! ```

pub mod board;
pub mod engine;
pub mod piece;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, ColorGrid, LockOutcome};
pub use engine::{Engine, KICK_OFFSETS};
pub use piece::Piece;
pub use scoring::{fall_interval, level_for_lines, line_clear_score};
pub use shapes::{color, rotation_states, Mask};
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
