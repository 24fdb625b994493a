//! Terminal input: the intent mapper between crossterm and the engine.
//!
//! Maps key events to [`crate::types::Intent`]s and owns the auto-shift
//! timing, so the engine only ever sees one atomic intent per occurrence.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::{InputHandler, RepeatBatch};
pub use map::{handle_key_event, intent_for_code, is_repeatable};
