//! Shared types for blockfall - enums, constants and the color type
//!
//! Everything here is plain data with no dependencies, so the same definitions
//! can be used by the simulation core, the input mapper and the terminal view.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//! - **Spawn origin**: column 3, row -2 (two rows above the visible grid)
//!
//! Rows above the grid (negative row index) form the spawn buffer. A falling
//! piece may occupy them, a locked cell never does.
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame tick (~60 FPS) |
//! | `BASE_FALL_MS` | 500 | Fall interval at level 1 |
//! | `FALL_STEP_MS` | 50 | Interval reduction per level |
//! | `MIN_FALL_MS` | 80 | Fastest fall interval |
//! | `DEFAULT_DAS_MS` | 100 | Hold time before left/right auto-shift |
//! | `DEFAULT_ARR_MS` | 100 | Auto-shift repeat interval |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, ShapeKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn column of a new piece's 4x4 mask origin
pub const SPAWN_COL: i8 = 3;

/// Spawn row of a new piece's 4x4 mask origin (above the visible grid)
pub const SPAWN_ROW: i8 = -2;

/// Host frame tick in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall interval at level 1
pub const BASE_FALL_MS: u32 = 500;

/// Fall interval reduction per level above 1
pub const FALL_STEP_MS: u32 = 50;

/// Floor for the fall interval
pub const MIN_FALL_MS: u32 = 80;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Delay before a held left/right key starts repeating
pub const DEFAULT_DAS_MS: u32 = 100;

/// Interval between left/right repeats once auto-shift is active
pub const DEFAULT_ARR_MS: u32 = 100;

/// Delay and interval of soft drop repeats while down is held
pub const SOFT_DROP_REPEAT_MS: u32 = 50;

/// Line clear scores indexed by rows cleared in one lock.
///
/// Clears outside 1-4 fall back to `100 * cleared`.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];


/// The seven piece kinds.
///
/// Ordered as the catalog lists them; `ALL` is what uniform random selection
/// draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    S,
    Z,
    I,
    O,
    J,
    L,
    T,
}

impl ShapeKind {
    /// Every kind, in catalog order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::T,
    ];

    /// Parse a kind from its letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("I"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("o"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("?"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            "t" => Some(ShapeKind::T),
            _ => None,
        }
    }

    /// Uppercase letter for display
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
            ShapeKind::T => "T",
        }
    }
}

/// Discrete player intents consumed by the simulation engine.
///
/// The host is responsible for key repeat timing; each intent is one atomic
/// action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Move piece one column left
    Left,
    /// Move piece one column right
    Right,
    /// Move piece one row down
    SoftDrop,
    /// Drop piece as far as it goes and lock it
    HardDrop,
    /// Rotate clockwise with a horizontal kick search
    RotateCw,
    /// Pause or resume
    TogglePause,
    /// Start over after game over
    Restart,
    /// Leave the game
    Quit,
}

impl Intent {
    /// Parse an intent from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Intent::Left),
            "right" => Some(Intent::Right),
            "softdrop" => Some(Intent::SoftDrop),
            "harddrop" => Some(Intent::HardDrop),
            "rotatecw" => Some(Intent::RotateCw),
            "togglepause" => Some(Intent::TogglePause),
            "restart" => Some(Intent::Restart),
            "quit" => Some(Intent::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Left => "left",
            Intent::Right => "right",
            Intent::SoftDrop => "softDrop",
            Intent::HardDrop => "hardDrop",
            Intent::RotateCw => "rotateCw",
            Intent::TogglePause => "togglePause",
            Intent::Restart => "restart",
            Intent::Quit => "quit",
        }
    }
}

/// Run status of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunStatus {
    #[default]
    Playing,
    Paused,
    /// Terminal state; only restart and quit are honored
    GameOver,
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A board cell: `None` is empty, `Some(kind)` is a locked cell of that kind
pub type Cell = Option<ShapeKind>;

/// Column/row coordinate on the board (row may be negative above the grid)
pub type Coord = (i8, i8);
