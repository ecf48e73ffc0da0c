//! Score keeping: a flat award per cleared row

use serde::Serialize;

/// Points for each cleared row
pub const POINTS_PER_LINE: u64 = 10;

/// Running totals for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total lines cleared
    pub lines: u32,
    /// Pieces locked into the board
    pub pieces: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `lines` cleared rows and return the points awarded
    pub fn add_lines(&mut self, lines: u32) -> u64 {
        let awarded = POINTS_PER_LINE * lines as u64;
        self.lines += lines;
        self.points += awarded;
        awarded
    }

    /// Count a locked piece
    pub fn add_piece(&mut self) {
        self.pieces += 1;
    }
}
