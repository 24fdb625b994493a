//! Terminal presentation for blockfall.
//!
//! A small game-oriented rendering layer: [`GameView`] paints a
//! [`GameSnapshot`](core::GameSnapshot) into a [`FrameBuffer`] and
//! [`TerminalRenderer`] flushes that buffer to the terminal through crossterm.
//! No widget toolkit is involved; cells are drawn two columns wide to keep the
//! well roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_changed_rows_into, encode_full_into, TerminalRenderer};
