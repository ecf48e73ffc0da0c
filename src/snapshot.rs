//! Read-only view of a session for renderers and logs

use crate::game::{GameSession, GameStatus};
use crate::score::Score;
use crate::tetromino::{Color, TetrominoType, MAX_SHAPE_SIZE};
use serde::Serialize;

/// The falling piece as a renderer sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceSnapshot {
    pub kind: TetrominoType,
    pub color: Color,
    pub size: usize,
    /// `matrix[i][j]` is board column `x + i`, row `y + j`
    pub matrix: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    pub x: i32,
    pub y: i32,
}

/// Everything a frame needs, copied out of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major, `None` for empty cells
    pub cells: Vec<Option<Color>>,
    pub piece: PieceSnapshot,
    pub score: Score,
    pub status: GameStatus,
}

impl GameSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        let board = session.board();
        let piece = session.current_piece();
        Self {
            width: board.width(),
            height: board.height(),
            cells: board
                .rows()
                .flat_map(|row| row.iter().map(|cell| cell.color()))
                .collect(),
            piece: PieceSnapshot {
                kind: piece.kind,
                color: piece.color(),
                size: piece.shape.size,
                matrix: piece.shape.matrix,
                x: piece.x,
                y: piece.y,
            },
            score: *session.score(),
            status: session.status(),
        }
    }

    /// Color at (x, y), if filled
    pub fn cell(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells[y * self.width + x]
    }
}

impl GameSession {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{SessionConfig, TickInput};
    use std::time::{Duration, Instant};

    #[test]
    fn test_snapshot_of_fresh_session() {
        let session = GameSession::new(SessionConfig {
            seed: Some(3),
            ..SessionConfig::default()
        });
        let snapshot = session.snapshot();
        assert_eq!(snapshot.width, 20);
        assert_eq!(snapshot.height, 32);
        assert_eq!(snapshot.cells.len(), 20 * 32);
        assert!(snapshot.cells.iter().all(Option::is_none));
        assert_eq!(snapshot.piece.y, 0);
        assert_eq!(snapshot.piece.kind, session.current_piece().kind);
        assert_eq!(snapshot.status, GameStatus::Playing);
    }

    #[test]
    fn test_snapshot_sees_locked_cells() {
        let start = Instant::now();
        let mut session = GameSession::start_at(
            SessionConfig {
                seed: Some(3),
                ..SessionConfig::default()
            },
            start,
        );
        let soft = TickInput {
            soft_drop: true,
            ..TickInput::default()
        };
        // more than enough soft drops to land the first piece
        for i in 1..=40u32 {
            session.update_at(soft, start + Duration::from_millis(i as u64));
        }
        let snapshot = session.snapshot();
        let filled = snapshot.cells.iter().filter(|c| c.is_some()).count();
        assert!(filled >= 4);
        assert_eq!(snapshot.score.pieces as usize * 4, filled);
        assert!(snapshot.cell(20, 0).is_none());
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let session = GameSession::new(SessionConfig {
            seed: Some(11),
            ..SessionConfig::default()
        });
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["width"], 20);
        assert_eq!(json["status"], "Playing");
        assert_eq!(json["score"]["points"], 0);
    }
}
