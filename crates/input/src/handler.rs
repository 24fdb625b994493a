//! Auto-shift input handler for terminal environments.
//!
//! Turns key presses into intents and generates repeats while a movement key
//! is held: left/right after the DAS delay and then every ARR interval, soft
//! drop every `SOFT_DROP_REPEAT_MS`.
//!
//! Most terminals never report key releases. Until a release has been seen,
//! held keys are released automatically after a period without key events,
//! and that period is kept shorter than the first repeat delay so a single tap
//! never repeats.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent};
use log::debug;

use crate::map::{handle_key_event, intent_for_code, is_repeatable};
use crate::types::{Intent, DEFAULT_ARR_MS, DEFAULT_DAS_MS, SOFT_DROP_REPEAT_MS};

/// Intents produced by one `update` call
pub type RepeatBatch = ArrayVec<Intent, 32>;

const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Repeat timer for one held key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Repeater {
    held_ms: u32,
    started: bool,
}

impl Repeater {
    fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance by `elapsed_ms` and return how many repeats are due.
    fn advance(&mut self, elapsed_ms: u32, delay_ms: u32, interval_ms: u32) -> u32 {
        self.held_ms = self.held_ms.saturating_add(elapsed_ms);
        let mut due = 0;
        if !self.started {
            if self.held_ms < delay_ms {
                return 0;
            }
            self.held_ms -= delay_ms;
            self.started = true;
            due += 1;
        }
        let interval = interval_ms.max(1);
        due += self.held_ms / interval;
        self.held_ms %= interval;
        due
    }
}

#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Held horizontal intent, `Left` or `Right`
    horizontal: Option<Intent>,
    horizontal_repeat: Repeater,
    down_held: bool,
    down_repeat: Repeater,
    /// Simulated time since the last key event
    idle_ms: u32,
    das_ms: u32,
    arr_ms: u32,
    key_release_timeout_ms: u32,
    /// Set once the terminal is known to report key releases
    release_events: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_ms: u32, arr_ms: u32) -> Self {
        Self {
            horizontal: None,
            horizontal_repeat: Repeater::default(),
            down_held: false,
            down_repeat: Repeater::default(),
            idle_ms: 0,
            das_ms,
            arr_ms,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
            release_events: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Declare whether key release events will arrive. With release events
    /// held keys stay held until released.
    pub fn with_release_events(mut self, reported: bool) -> Self {
        self.release_events = reported;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    /// Idle time after which held keys are released, or `None` when the
    /// terminal reports releases.
    ///
    /// Capped below the first repeat delay of every held key.
    fn auto_release_after_ms(&self) -> Option<u32> {
        if self.release_events {
            return None;
        }
        let mut limit = self.key_release_timeout_ms;
        if self.horizontal.is_some() {
            limit = limit.min(self.das_ms.saturating_sub(1));
        }
        if self.down_held {
            limit = limit.min(SOFT_DROP_REPEAT_MS - 1);
        }
        Some(limit)
    }

    /// Map a key press to an intent, starting hold tracking for movement keys.
    ///
    /// A press of a key that is already held yields nothing; the repeat timer
    /// owns further movement.
    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<Intent> {
        let intent = handle_key_event(key)?;
        if !is_repeatable(intent) {
            return Some(intent);
        }

        self.idle_ms = 0;
        match intent {
            Intent::SoftDrop => {
                if self.down_held {
                    return None;
                }
                self.down_held = true;
                self.down_repeat.reset();
            }
            _ => {
                if self.horizontal == Some(intent) {
                    return None;
                }
                self.horizontal = Some(intent);
                self.horizontal_repeat.reset();
            }
        }
        Some(intent)
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        self.release_events = true;
        match intent_for_code(code) {
            Some(Intent::SoftDrop) => self.release_down(),
            Some(intent @ (Intent::Left | Intent::Right)) if self.horizontal == Some(intent) => {
                self.release_horizontal();
            }
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = None;
        self.horizontal_repeat.reset();
    }

    fn release_down(&mut self) {
        self.down_held = false;
        self.down_repeat.reset();
    }

    /// Advance hold timers by `elapsed_ms` and return the repeats that fell due.
    pub fn update(&mut self, elapsed_ms: u32) -> RepeatBatch {
        let mut intents = RepeatBatch::new();

        self.idle_ms = self.idle_ms.saturating_add(elapsed_ms);
        if let Some(limit) = self.auto_release_after_ms() {
            if self.idle_ms >= limit && (self.horizontal.is_some() || self.down_held) {
                debug!("auto-release after {}ms without key events", self.idle_ms);
                self.release_horizontal();
                self.release_down();
            }
        }

        if let Some(intent) = self.horizontal {
            let due = self
                .horizontal_repeat
                .advance(elapsed_ms, self.das_ms, self.arr_ms);
            for _ in 0..due {
                let _ = intents.try_push(intent);
            }
        }

        if self.down_held {
            let due = self
                .down_repeat
                .advance(elapsed_ms, SOFT_DROP_REPEAT_MS, SOFT_DROP_REPEAT_MS);
            for _ in 0..due {
                let _ = intents.try_push(Intent::SoftDrop);
            }
        }

        intents
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.release_down();
        self.idle_ms = 0;
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
