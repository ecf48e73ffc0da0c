//! Active falling piece logic

use crate::board::Board;
use crate::collision::{CollisionDetector, Direction};
use crate::tetromino::{Color, Shape, TetrominoType};

/// An active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub kind: TetrominoType,
    /// Current (possibly rotated) matrix
    pub shape: Shape,
    /// Board column of the matrix origin
    pub x: i32,
    /// Board row of the matrix origin, row 0 at the top
    pub y: i32,
}

impl Piece {
    /// Create a piece at spawn position: horizontally centered, top row 0
    pub fn spawn(kind: TetrominoType, board_width: usize) -> Self {
        let x = board_width as i32 / 2 - kind.size() as i32 / 2;
        Self::at(kind, x, 0)
    }

    /// Create a piece in spawn orientation at an explicit position
    pub fn at(kind: TetrominoType, x: i32, y: i32) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            x,
            y,
        }
    }

    pub fn color(&self) -> Color {
        self.shape.color
    }

    /// Board positions (x, y) of all 4 blocks
    pub fn block_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .map(|(i, j)| (self.x + i as i32, self.y + j as i32))
    }

    /// Candidate translated by (dx, dy)
    pub fn moved(&self, dx: i32, dy: i32) -> Piece {
        Piece {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Candidate turned a quarter in place
    pub fn rotated(&self) -> Piece {
        Piece {
            shape: self.shape.rotated_cw(),
            ..*self
        }
    }

    fn try_step(&mut self, direction: Direction, board: &Board) -> bool {
        if !CollisionDetector::new(board).can_move(self, direction) {
            return false;
        }
        let (dx, dy) = direction.offset();
        *self = self.moved(dx, dy);
        true
    }

    /// Try to move left, returns true if successful
    pub fn move_left(&mut self, board: &Board) -> bool {
        self.try_step(Direction::Left, board)
    }

    /// Try to move right, returns true if successful
    pub fn move_right(&mut self, board: &Board) -> bool {
        self.try_step(Direction::Right, board)
    }

    /// Try to move down, returns true if successful
    pub fn move_down(&mut self, board: &Board) -> bool {
        self.try_step(Direction::Down, board)
    }

    /// Try to rotate without wall kicks, returns true if successful
    pub fn rotate(&mut self, board: &Board) -> bool {
        let candidate = self.rotated();
        if CollisionDetector::new(board).check_collision(&candidate) {
            return false;
        }
        *self = candidate;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_centers_i_piece() {
        let piece = Piece::spawn(TetrominoType::I, 20);
        assert_eq!(piece.x, 8);
        assert_eq!(piece.y, 0);
        // upright bar in column 8
        let positions: Vec<_> = piece.block_positions().collect();
        assert_eq!(positions, vec![(8, 0), (8, 1), (8, 2), (8, 3)]);
    }

    #[test]
    fn test_l_spawn_cells() {
        let piece = Piece::spawn(TetrominoType::L, 20);
        let positions: Vec<_> = piece.block_positions().collect();
        assert_eq!(positions, vec![(9, 2), (10, 0), (10, 1), (10, 2)]);
    }

    #[test]
    fn test_spawn_centers_small_pieces() {
        // 20/2 - 3/2 = 9, 20/2 - 2/2 = 9
        assert_eq!(Piece::spawn(TetrominoType::T, 20).x, 9);
        assert_eq!(Piece::spawn(TetrominoType::O, 20).x, 9);
        assert_eq!(Piece::spawn(TetrominoType::I, 10).x, 3);
    }

    #[test]
    fn test_block_positions() {
        let piece = Piece::at(TetrominoType::O, 3, 5);
        let positions: Vec<_> = piece.block_positions().collect();
        assert_eq!(positions, vec![(3, 5), (3, 6), (4, 5), (4, 6)]);
    }

    #[test]
    fn test_move_down_until_floor() {
        let board = Board::new(20, 32);
        let mut piece = Piece::spawn(TetrominoType::I, 20);
        let mut steps = 0;
        while piece.move_down(&board) {
            steps += 1;
        }
        // bar spans rows y..=y+3
        assert_eq!(steps, 28);
        assert_eq!(piece.y, 28);
    }

    #[test]
    fn test_rotate_four_times_in_open_space() {
        let board = Board::new(20, 32);
        for kind in TetrominoType::all() {
            let mut piece = Piece::at(kind, 8, 14);
            let original = piece;
            for _ in 0..4 {
                assert!(piece.rotate(&board));
            }
            assert_eq!(piece, original, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotation_rejected_at_left_wall() {
        let board = Board::new(20, 32);
        let mut piece = Piece::at(TetrominoType::I, 8, 10);
        assert!(piece.rotate(&board));
        assert!(piece.rotate(&board));
        // upright bar now in matrix column 3; slide it to board column 0
        assert!(piece.block_positions().all(|(x, _)| x == 11));
        while piece.move_left(&board) {}
        assert_eq!(piece.x, -3);
        assert_eq!(piece.block_positions().map(|(x, _)| x).min(), Some(0));

        let before = piece;
        assert!(!piece.rotate(&board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_rotation_rejected_by_stack() {
        let mut board = Board::new(20, 32);
        let mut piece = Piece::at(TetrominoType::T, 8, 10);
        // the turned T needs (10, 11)
        board.set_cell(10, 11, Color::rgb(1, 2, 3));
        let before = piece;
        assert!(!piece.rotate(&board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_rotation_allowed_above_top() {
        let board = Board::new(20, 32);
        let mut piece = Piece::at(TetrominoType::I, 8, -2);
        assert!(piece.rotate(&board));
    }
}
