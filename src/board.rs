//! Game board representation and row operations

use crate::tetromino::Color;

/// Reference board geometry: 500×800 pixels at 25 pixels per tile
pub const DEFAULT_BOARD_WIDTH: usize = 20;
pub const DEFAULT_BOARD_HEIGHT: usize = 32;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(*color),
        }
    }
}

/// The game board
///
/// Row 0 is the top of the well and rows grow downward. Cells are stored
/// row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_WIDTH, DEFAULT_BOARD_HEIGHT)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Get the cell at (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Whether (x, y) holds a filled cell. Out of bounds is never active.
    pub fn is_active(&self, x: i32, y: i32) -> bool {
        self.get(x, y).is_some_and(|cell| cell.is_filled())
    }

    /// Whether a block may not occupy (x, y)
    ///
    /// The bottom, left and right edges are walls. Above the top is open
    /// space, so negative rows inside the column range are never occupied.
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return true;
        }
        self.is_active(x, y)
    }

    /// Fill a cell with a color
    /// Returns false (and changes nothing) if out of bounds
    pub fn set_cell(&mut self, x: i32, y: i32, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.cells[i] = Cell::Filled(color);
                true
            }
            None => false,
        }
    }

    /// Borrow one row, left to right
    /// Returns None if out of bounds
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        Some(&self.cells[y * self.width..(y + 1) * self.width])
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Check if a row is completely filled. Rows outside the board never are.
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_filled()))
    }

    /// Empty every cell in row `y`
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.height {
            return;
        }
        let start = y * self.width;
        self.cells[start..start + self.width].fill(Cell::Empty);
    }

    /// Move rows `0..from_row` down by one so each row `r` in `1..=from_row`
    /// receives what was in `r - 1`. Row 0 is left empty.
    pub fn shift_rows_down(&mut self, from_row: usize) {
        if self.height == 0 {
            return;
        }
        let from_row = from_row.min(self.height - 1);
        for r in (1..=from_row).rev() {
            let src = (r - 1) * self.width;
            self.cells
                .copy_within(src..src + self.width, r * self.width);
        }
        self.clear_row(0);
    }

    /// Clear completed lines and return the number cleared
    ///
    /// Scans bottom to top. A full row is cleared, the stack above drops by
    /// one, and the same index is checked again since it now holds the row
    /// that used to sit above it.
    pub fn clear_lines(&mut self) -> usize {
        let mut lines_cleared = 0;
        if self.width == 0 {
            return lines_cleared;
        }
        let mut y = self.height;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.clear_row(row);
                self.shift_rows_down(row);
                lines_cleared += 1;
                // re-examine `row`
                continue;
            }
            y -= 1;
        }
        lines_cleared
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Count the filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }
}
