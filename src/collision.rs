//! Collision checks for a piece against the board
//!
//! Each direction has its own boundary rule. The top edge is never a wall
//! here: cells above row 0 are allowed and only the lifecycle checks in
//! [`crate::game`] treat the top as a limit.

use crate::board::Board;
use crate::piece::Piece;

/// Direction of a one-cell move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    /// Board offset (dx, dy) for a single step
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Read-only collision queries over a board
#[derive(Debug, Clone, Copy)]
pub struct CollisionDetector<'a> {
    board: &'a Board,
}

impl<'a> CollisionDetector<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self { board }
    }

    /// Whether every block of `piece` can step one cell in `direction`
    pub fn can_move(&self, piece: &Piece, direction: Direction) -> bool {
        let (dx, dy) = direction.offset();
        let width = self.board.width() as i32;
        let height = self.board.height() as i32;
        piece.block_positions().all(|(x, y)| {
            let (x, y) = (x + dx, y + dy);
            let blocked_by_wall = match direction {
                Direction::Down => y >= height,
                Direction::Left => x < 0,
                Direction::Right => x >= width,
            };
            !blocked_by_wall && !self.board.is_active(x, y)
        })
    }

    pub fn can_move_down(&self, piece: &Piece) -> bool {
        self.can_move(piece, Direction::Down)
    }

    pub fn can_move_left(&self, piece: &Piece) -> bool {
        self.can_move(piece, Direction::Left)
    }

    pub fn can_move_right(&self, piece: &Piece) -> bool {
        self.can_move(piece, Direction::Right)
    }

    /// Whether `piece` as placed hits a side wall, the floor, or a filled
    /// cell. Blocks above row 0 do not collide.
    pub fn check_collision(&self, piece: &Piece) -> bool {
        piece
            .block_positions()
            .any(|(x, y)| self.board.is_occupied(x, y))
    }
}
