//! Core game session: gravity, player intents, lock-in and game over

use crate::board::{Board, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};
use crate::collision::CollisionDetector;
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::scheduler::{DropScheduler, DEFAULT_DROP_DELAY};
use crate::score::Score;
use crate::tetromino::TetrominoType;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    Playing,
    /// A piece topped out or could not spawn
    GameOver,
    /// Stopped by an external close request
    Closed,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    Close,
}

/// Intents gathered for a single tick. Each applies at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    pub soft_drop: bool,
    pub rotate: bool,
    pub close: bool,
}

impl TickInput {
    /// Fold a frame's worth of actions into one set of flags
    pub fn from_actions(actions: &[Action]) -> Self {
        let mut input = Self::default();
        for action in actions {
            match action {
                Action::MoveLeft => input.move_left = true,
                Action::MoveRight => input.move_right = true,
                Action::SoftDrop => input.soft_drop = true,
                Action::Rotate => input.rotate = true,
                Action::Close => input.close = true,
            }
        }
        input
    }
}

/// Result of locking the current piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOutcome {
    /// Piece placed and the next one spawned
    Continue { lines_cleared: usize },
    /// Session ended; no more ticks are processed
    GameOver,
}

/// Parameters for a new session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub board_width: usize,
    pub board_height: usize,
    pub drop_delay: Duration,
    /// Fixed seed for a reproducible piece sequence
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
            drop_delay: DEFAULT_DROP_DELAY,
            seed: None,
        }
    }
}

/// The main game struct. Owns the board, the falling piece and the score.
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    current_piece: Piece,
    randomizer: Randomizer,
    score: Score,
    scheduler: DropScheduler,
    status: GameStatus,
    running: bool,
}

impl GameSession {
    /// Start a session with the clock at `Instant::now()`
    pub fn new(config: SessionConfig) -> Self {
        Self::start_at(config, Instant::now())
    }

    /// Start a session whose gravity timer begins at `now`
    pub fn start_at(config: SessionConfig, now: Instant) -> Self {
        let randomizer = match config.seed {
            Some(seed) => Randomizer::with_seed(seed),
            None => Randomizer::new(),
        };
        let board = Board::new(config.board_width, config.board_height);
        let placeholder = Piece::spawn(TetrominoType::O, board.width());

        let mut session = Self {
            board,
            current_piece: placeholder,
            randomizer,
            score: Score::new(),
            scheduler: DropScheduler::new(config.drop_delay, now),
            status: GameStatus::Playing,
            running: true,
        };
        info!(
            width = config.board_width,
            height = config.board_height,
            seed = session.randomizer.seed(),
            "session started"
        );
        session.spawn_next();
        session
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> &Piece {
        &self.current_piece
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// False once the session has ended for any reason
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn seed(&self) -> u64 {
        self.randomizer.seed()
    }

    pub fn drop_delay(&self) -> Duration {
        self.scheduler.drop_delay()
    }

    /// Process one tick at the current time
    pub fn update(&mut self, input: TickInput) -> GameStatus {
        self.update_at(input, Instant::now())
    }

    /// Process one tick at `now`
    ///
    /// Order: gravity, soft drop, left, right, rotate. Anything after a
    /// transition out of `Playing` is skipped.
    pub fn update_at(&mut self, input: TickInput, now: Instant) -> GameStatus {
        if !self.running {
            return self.status;
        }
        if input.close {
            self.close();
            return self.status;
        }

        if self.scheduler.is_due(now) {
            self.step_down();
            self.scheduler.reset(now);
            if !self.running {
                return self.status;
            }
        }

        if input.soft_drop {
            // only a drop that moved restarts the gravity timer
            if self.step_down().is_none() {
                self.scheduler.reset(now);
            }
            if !self.running {
                return self.status;
            }
        }

        if input.move_left {
            self.current_piece.move_left(&self.board);
        }
        if input.move_right {
            self.current_piece.move_right(&self.board);
        }
        if input.rotate {
            self.current_piece.rotate(&self.board);
        }

        self.status
    }

    /// Apply a single action at the current time
    pub fn process_action(&mut self, action: Action) -> GameStatus {
        self.process_action_at(action, Instant::now())
    }

    /// Apply a single action at `now`, as a tick carrying only that intent
    pub fn process_action_at(&mut self, action: Action, now: Instant) -> GameStatus {
        self.update_at(TickInput::from_actions(&[action]), now)
    }

    /// External close signal. A finished game keeps its `GameOver` status.
    pub fn close(&mut self) {
        if !self.running {
            return;
        }
        info!(score = self.score.points, "session closed");
        self.running = false;
        self.status = GameStatus::Closed;
    }

    /// Move the piece down one row, locking it if blocked.
    /// Returns None when the piece moved.
    fn step_down(&mut self) -> Option<LockOutcome> {
        if self.current_piece.move_down(&self.board) {
            None
        } else {
            Some(self.lock_piece())
        }
    }

    /// Lock the current piece, clear lines and spawn the next piece
    pub fn lock_piece(&mut self) -> LockOutcome {
        if !self.running {
            return LockOutcome::GameOver;
        }
        let piece = self.current_piece;

        // never got below the top row
        if piece.block_positions().any(|(_, y)| y <= 0) {
            self.end_game("piece locked at the top row");
            return LockOutcome::GameOver;
        }

        let color = piece.color();
        for (x, y) in piece.block_positions() {
            self.board.set_cell(x, y, color);
        }
        self.score.add_piece();
        debug!(kind = ?piece.kind, x = piece.x, y = piece.y, "piece locked");

        let lines_cleared = self.board.clear_lines();
        if lines_cleared > 0 {
            self.score.add_lines(lines_cleared as u32);
            info!(
                lines = lines_cleared,
                score = self.score.points,
                "cleared lines"
            );
        }

        if self.spawn_next() {
            LockOutcome::Continue { lines_cleared }
        } else {
            LockOutcome::GameOver
        }
    }

    fn spawn_next(&mut self) -> bool {
        let kind = self.randomizer.next();
        self.spawn(kind)
    }

    /// Place a fresh `kind` at the top center. Returns false (and ends the
    /// session) when it has nowhere to appear.
    fn spawn(&mut self, kind: TetrominoType) -> bool {
        let piece = Piece::spawn(kind, self.board.width());
        self.current_piece = piece;
        if CollisionDetector::new(&self.board).check_collision(&piece) {
            self.end_game("spawned piece overlaps the stack");
            return false;
        }
        debug!(kind = ?kind, x = piece.x, "piece spawned");
        true
    }

    fn end_game(&mut self, reason: &str) {
        self.running = false;
        self.status = GameStatus::GameOver;
        info!(
            reason,
            score = self.score.points,
            lines = self.score.lines,
            pieces = self.score.pieces,
            "game over"
        );
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
