//! Tetromino definitions and shapes
//!
//! The seven tetrominoes are stored as small square matrices. Each shape uses
//! the top-left `size × size` corner of a fixed 4×4 array, so pieces never
//! allocate.

use serde::{Deserialize, Serialize};

/// Largest matrix extent of any shape
pub const MAX_SHAPE_SIZE: usize = 4;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TetrominoType {
    I, // Light cyan - long bar
    J, // Blue
    L, // Orange
    O, // Yellow - square
    S, // Blue
    T, // Purple
    Z, // Red
}

impl TetrominoType {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::rgb(224, 255, 255),
            TetrominoType::J => Color::rgb(0, 0, 255),
            TetrominoType::L => Color::rgb(255, 165, 0),
            TetrominoType::O => Color::rgb(255, 255, 0),
            TetrominoType::S => Color::rgb(0, 0, 255),
            TetrominoType::T => Color::rgb(128, 0, 128),
            TetrominoType::Z => Color::rgb(255, 0, 0),
        }
    }

    /// Get all tetromino types, in catalog order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::J,
            TetrominoType::L,
            TetrominoType::O,
            TetrominoType::S,
            TetrominoType::T,
            TetrominoType::Z,
        ]
    }

    /// Effective matrix extent
    pub fn size(&self) -> usize {
        match self {
            TetrominoType::I => 4,
            TetrominoType::O => 2,
            _ => 3,
        }
    }

    // One string per matrix column `i`, read top to bottom as `j`. Only the
    // top-left `size × size` corner is used.
    fn pattern(&self) -> [&'static str; MAX_SHAPE_SIZE] {
        match self {
            TetrominoType::I => ["XXXX", "....", "....", "...."],
            TetrominoType::J => ["X...", "XXX.", "....", "...."],
            TetrominoType::L => ["..X.", "XXX.", "....", "...."],
            TetrominoType::O => ["XX..", "XX..", "....", "...."],
            TetrominoType::S => [".XX.", "XX..", "....", "...."],
            TetrominoType::T => [".X..", "XXX.", "....", "...."],
            TetrominoType::Z => ["XX..", ".XX.", "....", "...."],
        }
    }

    /// Build the spawn-orientation shape for this tetromino
    pub fn shape(&self) -> Shape {
        let mut matrix = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, column) in self.pattern().iter().enumerate() {
            for (j, ch) in column.bytes().enumerate() {
                matrix[i][j] = ch == b'X';
            }
        }
        Shape {
            color: self.color(),
            matrix,
            size: self.size(),
        }
    }
}

/// A shape matrix with its color and logical extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub color: Color,
    /// `matrix[i][j]` covers board column `x + i`, row `y + j`
    pub matrix: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
    pub size: usize,
}

impl Shape {
    /// Whether the matrix cell at (i, j) is filled
    pub fn is_active(&self, i: usize, j: usize) -> bool {
        i < self.size && j < self.size && self.matrix[i][j]
    }

    /// Iterate the filled matrix cells as (i, j)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.size).flat_map(move |i| {
            (0..self.size)
                .filter(move |&j| self.matrix[i][j])
                .map(move |j| (i, j))
        })
    }

    /// Swap `matrix[i][j]` with `matrix[j][i]` inside the logical extent
    pub fn transpose(&self) -> Shape {
        let mut out = *self;
        for i in 0..self.size {
            for j in 0..self.size {
                out.matrix[i][j] = self.matrix[j][i];
            }
        }
        out
    }

    /// Reverse each `matrix[i]` inside the logical extent
    pub fn reverse_columns(&self) -> Shape {
        let mut out = *self;
        for i in 0..self.size {
            for j in 0..self.size {
                out.matrix[i][j] = self.matrix[i][self.size - j - 1];
            }
        }
        out
    }

    /// Quarter turn about the matrix origin: transpose, then reverse columns
    pub fn rotated_cw(&self) -> Shape {
        self.transpose().reverse_columns()
    }
}
