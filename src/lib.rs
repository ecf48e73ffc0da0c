//! Falling-block game engine
//!
//! Pure game logic for a Tetris-style game: a board that derives its grid
//! from screen and tile size, seven tetrominoes rotated by transpose and
//! column reverse, per-direction collision checks, timed gravity, bottom-up
//! line clearing, and a session that reports game over as a status instead
//! of exiting.
//!
//! Rendering, input devices and audio live outside this crate. A frontend
//! feeds [`TickInput`] into [`GameSession::update_at`] each frame and draws
//! the resulting [`GameSnapshot`].
//!
//! ```
//! use blockfall::{GameSession, GameStatus, SessionConfig, TickInput};
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let config = SessionConfig {
//!     seed: Some(7),
//!     ..SessionConfig::default()
//! };
//! let mut session = GameSession::start_at(config, start);
//! let input = TickInput { soft_drop: true, ..TickInput::default() };
//! let now = start + Duration::from_millis(1);
//! assert_eq!(session.update_at(input, now), GameStatus::Playing);
//! assert_eq!(session.current_piece().y, 1);
//! ```

pub mod board;
pub mod collision;
pub mod game;
pub mod piece;
pub mod randomizer;
pub mod scheduler;
pub mod score;
pub mod settings;
pub mod snapshot;
pub mod tetromino;

pub use board::{Board, Cell};
pub use collision::{CollisionDetector, Direction};
pub use game::{Action, GameSession, GameStatus, LockOutcome, SessionConfig, TickInput};
pub use piece::Piece;
pub use randomizer::Randomizer;
pub use scheduler::DropScheduler;
pub use score::Score;
pub use settings::{Settings, SettingsError};
pub use snapshot::{GameSnapshot, PieceSnapshot};
pub use tetromino::{Color, Shape, TetrominoType};
