//! Simulation engine - the game state machine
//!
//! Owns the board, the active and next piece, scoring and timing. Each host
//! frame calls [`Engine::step`] with the elapsed time and the intents gathered
//! since the last frame; intents are applied first, then gravity, and the
//! returned snapshot reflects the settled state.
//!
//! Every positional change follows the same pattern: build a candidate piece,
//! validate it against the board, then commit it or drop it. The active piece
//! is therefore always valid (or in the spawn buffer) between frames.

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, LockOutcome};
use crate::piece::Piece;
use crate::scoring::{fall_interval, level_for_lines, line_clear_score};
use crate::snapshot::GameSnapshot;
use crate::types::{Intent, RunStatus};

/// Horizontal offsets tried, in order, when a rotation collides
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

#[derive(Debug, Clone)]
pub struct Engine<R = StdRng> {
    board: Board,
    /// `None` only after game over
    active: Option<Piece>,
    next: Piece,
    rng: R,
    score: u32,
    lines: u32,
    level: u32,
    fall_interval: Duration,
    fall_timer: Duration,
    status: RunStatus,
    quit_requested: bool,
}

impl Engine<StdRng> {
    /// Engine with a deterministic piece sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Start a game on an empty board, drawing pieces from `rng`
    pub fn new(rng: R) -> Self {
        Self::with_board(rng, Board::new())
    }

    /// Start a game from an existing board position
    pub fn with_board(mut rng: R, board: Board) -> Self {
        let active = Piece::random(&mut rng);
        let next = Piece::random(&mut rng);
        Self {
            board,
            active: Some(active),
            next,
            rng,
            score: 0,
            lines: 0,
            level: 1,
            fall_interval: fall_interval(1),
            fall_timer: Duration::ZERO,
            status: RunStatus::Playing,
            quit_requested: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Advance one frame: apply `intents` in order, then gravity.
    pub fn step(&mut self, elapsed: Duration, intents: &[Intent]) -> GameSnapshot {
        for &intent in intents {
            self.apply_intent(intent);
        }
        self.tick(elapsed);
        self.snapshot()
    }

    /// Apply one intent. Returns whether it changed anything.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        match intent {
            Intent::Quit => {
                self.quit_requested = true;
                true
            }
            Intent::TogglePause => self.toggle_pause(),
            Intent::Restart => {
                if self.status != RunStatus::GameOver {
                    return false;
                }
                self.restart();
                true
            }
            _ if self.status != RunStatus::Playing => false,
            Intent::Left => self.try_shift(-1, 0),
            Intent::Right => self.try_shift(1, 0),
            Intent::SoftDrop => self.try_shift(0, 1),
            Intent::RotateCw => self.try_rotate(),
            Intent::HardDrop => self.hard_drop(),
        }
    }

    /// Gravity: accumulate time and fall one row per elapsed interval.
    ///
    /// At most one row per call. Returns true if the piece fell or locked.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.status != RunStatus::Playing || self.active.is_none() {
            return false;
        }

        self.fall_timer += elapsed;
        if self.fall_timer < self.fall_interval {
            return false;
        }
        self.fall_timer = Duration::ZERO;

        if !self.try_shift(0, 1) {
            self.lock_active();
        }
        true
    }

    /// Reset everything except the random source
    pub fn restart(&mut self) {
        self.board.clear();
        self.active = Some(Piece::random(&mut self.rng));
        self.next = Piece::random(&mut self.rng);
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.fall_interval = fall_interval(1);
        self.fall_timer = Duration::ZERO;
        self.status = RunStatus::Playing;
        info!("game restarted");
    }

    fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            RunStatus::Playing => RunStatus::Paused,
            RunStatus::Paused => RunStatus::Playing,
            RunStatus::GameOver => return false,
        };
        debug!("status -> {:?}", self.status);
        true
    }

    /// Commit `candidate` as the active piece if the board accepts it
    fn try_commit(&mut self, candidate: Piece) -> bool {
        if self.board.is_valid(&candidate) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    fn try_shift(&mut self, dcol: i8, drow: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        match active.translated(dcol, drow) {
            Some(candidate) => self.try_commit(candidate),
            None => false,
        }
    }

    /// Rotate clockwise, trying each kick offset until one fits
    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let rotated = active.rotate_cw();
        KICK_OFFSETS
            .iter()
            .any(|&dcol| {
                rotated
                    .translated(dcol, 0)
                    .is_some_and(|candidate| self.try_commit(candidate))
            })
    }

    /// Drop as far as possible and lock immediately
    fn hard_drop(&mut self) -> bool {
        let Some(mut landed) = self.active else {
            return false;
        };
        while let Some(below) = landed
            .translated(0, 1)
            .filter(|p| self.board.is_valid(p))
        {
            landed = below;
        }
        debug!("hard drop {:?} to row {}", landed.kind, landed.bottom_row());
        self.active = Some(landed);
        self.lock_active();
        true
    }

    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        if self.board.lock(&piece) == LockOutcome::TopOut {
            self.end_game();
            return;
        }

        let cleared = self.board.clear_full_rows();
        debug!(
            "locked {:?} at ({}, {}) rotation {}, cleared {}",
            piece.kind, piece.col, piece.row, piece.rotation, cleared
        );

        if cleared > 0 {
            self.lines += cleared;
            self.score = self.score.saturating_add(line_clear_score(cleared));
            let level = level_for_lines(self.lines);
            if level != self.level {
                info!("level {} -> {}", self.level, level);
            }
            self.level = level;
            self.fall_interval = fall_interval(level);
        }

        if self.board.reaches_top() {
            self.end_game();
            return;
        }

        let fresh = Piece::random(&mut self.rng);
        self.active = Some(std::mem::replace(&mut self.next, fresh));
    }

    fn end_game(&mut self) {
        self.active = None;
        self.status = RunStatus::GameOver;
        info!(
            "game over: score {} lines {} level {}",
            self.score, self.lines, self.level
        );
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.render_grid_into(&mut out.grid);
        out.active = self.active.map(Into::into);
        out.next = self.next.into();
        out.score = self.score;
        out.lines = self.lines;
        out.level = self.level;
        out.status = self.status;
        out.quit_requested = self.quit_requested;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ShapeKind, BOARD_WIDTH};

    fn engine_with(piece: Piece) -> Engine {
        let mut engine = Engine::with_seed(12345);
        engine.active = Some(piece);
        engine
    }

    fn fill_row_except(board: &mut Board, row: i8, gap: i8) {
        for col in 0..BOARD_WIDTH as i8 {
            if col != gap {
                board.set(col, row, Some(ShapeKind::Z));
            }
        }
    }

    #[test]
    fn new_engine_state() {
        let engine = Engine::with_seed(1);
        assert_eq!(engine.status, RunStatus::Playing);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.lines, 0);
        assert_eq!(engine.level, 1);
        assert_eq!(engine.fall_interval, Duration::from_millis(500));
        let active = engine.active.unwrap();
        assert_eq!((active.col, active.row), (3, -2));
    }

    #[test]
    fn left_wall_blocks_movement() {
        let mut engine = engine_with(Piece::at(ShapeKind::O, 0, 5));
        assert!(!engine.apply_intent(Intent::Left));
        assert_eq!(engine.active.unwrap(), Piece::at(ShapeKind::O, 0, 5));
    }

    #[test]
    fn moves_commit_when_valid() {
        let mut engine = engine_with(Piece::at(ShapeKind::O, 4, 5));
        assert!(engine.apply_intent(Intent::Right));
        assert!(engine.apply_intent(Intent::SoftDrop));
        let active = engine.active.unwrap();
        assert_eq!((active.col, active.row), (5, 6));
    }

    #[test]
    fn collision_with_locked_cells_blocks_movement() {
        let mut engine = engine_with(Piece::at(ShapeKind::O, 4, 5));
        engine.board.set(6, 6, Some(ShapeKind::T));
        assert!(!engine.apply_intent(Intent::Right));
        assert_eq!(engine.active.unwrap().col, 4);
    }

    #[test]
    fn o_piece_lock_fills_exactly_its_cells() {
        let mut engine = engine_with(Piece::at(ShapeKind::O, 0, 3));
        assert!(engine.apply_intent(Intent::HardDrop));

        assert_eq!(engine.board.filled_count(), 4);
        for (col, row) in [(0, 18), (1, 18), (0, 19), (1, 19)] {
            assert!(engine.board.is_occupied(col, row));
        }
        assert_eq!(engine.score, 0);
    }

    #[test]
    fn single_line_clear_scores_100() {
        let mut engine = engine_with(Piece::at(ShapeKind::I, 8, 5));
        fill_row_except(&mut engine.board, 19, 9);

        engine.apply_intent(Intent::HardDrop);

        assert_eq!(engine.lines, 1);
        assert_eq!(engine.score, 100);
        assert_eq!(engine.level, 1);
        // The rest of the I piece shifted down by one.
        assert_eq!(engine.board.filled_count(), 3);
        assert!(engine.board.is_occupied(9, 19));
        assert!(!engine.board.is_occupied(9, 16));
    }

    #[test]
    fn four_line_clear_scores_800() {
        let mut engine = engine_with(Piece::at(ShapeKind::I, 8, 0));
        for row in 16..20 {
            fill_row_except(&mut engine.board, row, 9);
        }

        engine.apply_intent(Intent::HardDrop);

        assert_eq!(engine.lines, 4);
        assert_eq!(engine.score, 800);
        assert_eq!(engine.board.filled_count(), 0);
        assert_eq!(engine.status, RunStatus::Playing);
    }

    #[test]
    fn level_and_fall_interval_after_25_lines() {
        let mut engine = engine_with(Piece::at(ShapeKind::I, 8, 5));
        engine.lines = 24;
        fill_row_except(&mut engine.board, 19, 9);

        engine.apply_intent(Intent::HardDrop);

        assert_eq!(engine.lines, 25);
        assert_eq!(engine.level, 3);
        assert_eq!(engine.fall_interval, Duration::from_millis(400));
    }

    #[test]
    fn rotation_kicks_off_the_right_wall() {
        // Vertical I in the last column; horizontal only fits two columns left.
        let mut engine = engine_with(Piece::at(ShapeKind::I, 8, 5));
        assert!(engine.apply_intent(Intent::RotateCw));

        let active = engine.active.unwrap();
        assert_eq!(active.rotation, 1);
        assert_eq!((active.col, active.row), (6, 5));
        assert_eq!(active.occupied_cells(), [(6, 5), (7, 5), (8, 5), (9, 5)]);
    }

    #[test]
    fn rotation_without_room_is_dropped() {
        let piece = Piece::at(ShapeKind::T, 0, 18);
        let mut engine = engine_with(piece);
        assert!(!engine.apply_intent(Intent::RotateCw));
        assert_eq!(engine.active.unwrap(), piece);
    }

    #[test]
    fn rotation_prefers_unshifted_position() {
        let mut engine = engine_with(Piece::at(ShapeKind::T, 4, 5));
        assert!(engine.apply_intent(Intent::RotateCw));
        let active = engine.active.unwrap();
        assert_eq!((active.col, active.rotation), (4, 1));
    }

    #[test]
    fn rotation_kick_tries_left_before_right() {
        // T rotating 0 -> 1 at col 4 collides only on (5, 7); the -1 and +1
        // kicks both fit, the left one wins.
        let mut engine = engine_with(Piece::at(ShapeKind::T, 4, 5));
        engine.board.set(5, 7, Some(ShapeKind::O));
        assert!(engine.board.is_valid(&Piece { rotation: 1, ..Piece::at(ShapeKind::T, 5, 5) }));

        assert!(engine.apply_intent(Intent::RotateCw));
        let active = engine.active.unwrap();
        assert_eq!((active.col, active.row, active.rotation), (3, 5, 1));
    }

    #[test]
    fn sideways_moves_in_spawn_buffer_stop_at_coordinate_limit() {
        let mut engine = engine_with(Piece::new(ShapeKind::T));

        let snap = engine.step(Duration::ZERO, &[Intent::Left; 200]);
        assert_eq!(snap.status, RunStatus::Playing);
        let active = engine.active.unwrap();
        assert_eq!(active.col, i8::MIN);
        assert!(active.occupied_cells().iter().all(|&(_, row)| row < 0));

        // Further moves are refused rather than wrapping; every rotation
        // candidate reaches row 0 off the board.
        assert!(!engine.apply_intent(Intent::Left));
        assert!(!engine.apply_intent(Intent::RotateCw));
        assert_eq!(engine.active.unwrap().col, i8::MIN);

        engine.apply_intent(Intent::HardDrop);
        assert_eq!(engine.status, RunStatus::GameOver);
        assert_eq!(engine.board.filled_count(), 0);

        let mut engine = engine_with(Piece::at(ShapeKind::I, 3, -4));
        engine.step(Duration::ZERO, &[Intent::Right; 200]);
        let active = engine.active.unwrap();
        assert_eq!(active.col, i8::MAX - 3);
        assert_eq!(engine.status, RunStatus::Playing);
    }

    #[test]
    fn gravity_waits_for_the_fall_interval() {
        let mut engine = engine_with(Piece::at(ShapeKind::O, 4, 0));

        assert!(!engine.tick(Duration::from_millis(499)));
        assert_eq!(engine.active.unwrap().row, 0);

        assert!(engine.tick(Duration::from_millis(1)));
        assert_eq!(engine.active.unwrap().row, 1);
        assert_eq!(engine.fall_timer, Duration::ZERO);
    }

    #[test]
    fn gravity_moves_at_most_one_row_per_tick() {
        let mut engine = engine_with(Piece::at(ShapeKind::O, 4, 0));
        engine.tick(Duration::from_secs(5));
        assert_eq!(engine.active.unwrap().row, 1);
    }

    #[test]
    fn gravity_locks_grounded_piece() {
        let mut engine = engine_with(Piece::at(ShapeKind::O, 4, 18));
        let next = engine.next;

        engine.tick(Duration::from_millis(500));

        assert!(engine.board.is_occupied(4, 19));
        assert_eq!(engine.active.unwrap(), next);
    }

    #[test]
    fn lock_above_grid_is_top_out_without_clearing() {
        let mut engine = engine_with(Piece::at(ShapeKind::I, 0, -3));
        engine.board.set(1, 1, Some(ShapeKind::S));
        fill_row_except(&mut engine.board, 19, -1);

        engine.tick(Duration::from_millis(500));

        assert_eq!(engine.status, RunStatus::GameOver);
        assert!(engine.active.is_none());
        // Row 19 is still full: no clear ran.
        assert!(engine.board.is_row_full(19));
        assert_eq!(engine.lines, 0);
        assert!(!engine.board.is_occupied(1, 0));
    }

    #[test]
    fn lock_touching_row_zero_is_game_over() {
        let mut engine = engine_with(Piece::at(ShapeKind::O, 0, 0));
        engine.board.set(0, 2, Some(ShapeKind::L));

        engine.tick(Duration::from_millis(500));

        assert_eq!(engine.status, RunStatus::GameOver);
        assert!(engine.board.is_occupied(0, 0));
    }

    #[test]
    fn paused_engine_ignores_moves_and_gravity() {
        let mut engine = engine_with(Piece::at(ShapeKind::O, 4, 0));
        assert!(engine.apply_intent(Intent::TogglePause));
        assert_eq!(engine.status, RunStatus::Paused);

        let snap = engine.step(
            Duration::from_secs(2),
            &[Intent::Left, Intent::HardDrop, Intent::RotateCw],
        );
        assert_eq!(snap.status, RunStatus::Paused);
        assert_eq!(engine.active.unwrap(), Piece::at(ShapeKind::O, 4, 0));
        assert_eq!(engine.fall_timer, Duration::ZERO);
        assert_eq!(engine.board.filled_count(), 0);

        assert!(engine.apply_intent(Intent::TogglePause));
        assert_eq!(engine.status, RunStatus::Playing);
    }

    #[test]
    fn quit_is_honored_while_paused() {
        let mut engine = Engine::with_seed(3);
        engine.apply_intent(Intent::TogglePause);
        let snap = engine.step(Duration::ZERO, &[Intent::Quit]);
        assert!(snap.quit_requested);
    }

    #[test]
    fn restart_only_after_game_over() {
        let mut engine = Engine::with_seed(3);
        assert!(!engine.apply_intent(Intent::Restart));

        engine.score = 1200;
        engine.lines = 12;
        engine.board.set(0, 19, Some(ShapeKind::J));
        engine.end_game();
        assert!(!engine.apply_intent(Intent::Left));
        assert!(!engine.apply_intent(Intent::TogglePause));

        assert!(engine.apply_intent(Intent::Restart));
        assert_eq!(engine.status, RunStatus::Playing);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.lines, 0);
        assert_eq!(engine.level, 1);
        assert_eq!(engine.board.filled_count(), 0);
        assert!(engine.active.is_some());
    }

    #[test]
    fn step_applies_intents_before_gravity() {
        let mut engine = engine_with(Piece::at(ShapeKind::O, 4, 3));
        let snap = engine.step(Duration::from_millis(500), &[Intent::SoftDrop]);
        assert_eq!(engine.active.unwrap().row, 5);
        assert_eq!(snap.active.unwrap().cells, engine.active.unwrap().occupied_cells());
    }

    #[test]
    fn next_piece_is_promoted_on_lock() {
        let mut engine = Engine::with_seed(99);
        let next = engine.next;
        engine.apply_intent(Intent::HardDrop);
        assert_eq!(engine.active.unwrap().kind, next.kind);
        assert_eq!((engine.active.unwrap().col, engine.active.unwrap().row), (3, -2));
    }

    #[test]
    fn same_seed_same_game() {
        let mut a = Engine::with_seed(2024);
        let mut b = Engine::with_seed(2024);
        for _ in 0..30 {
            let sa = a.step(Duration::from_millis(16), &[Intent::HardDrop]);
            let sb = b.step(Duration::from_millis(16), &[Intent::HardDrop]);
            assert_eq!(sa, sb);
        }
    }
}
