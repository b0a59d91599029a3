pub mod position;

pub use position::{MoveGuard, Position, Undo};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const SIZE: usize = 8;
pub const CELLS: usize = SIZE * SIZE;

/// Row-major cell contents; `None` is an empty square.
pub type Grid = [[Option<Color>; SIZE]; SIZE];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("illegal move {mv} for {color:?}")]
    IllegalMove { mv: Move, color: Color },
    #[error("bad move notation: {0:?}")]
    Notation(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self { Color::Black => Color::White, Color::White => Color::Black }
    }

    /// Symbol used in board serialization and printing.
    pub fn symbol(self) -> char {
        match self { Color::Black => 'X', Color::White => 'O' }
    }
}

pub const EMPTY_SYMBOL: char = '.';

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: u8,
    pub col: u8,
}

impl Move {
    pub const fn new(row: u8, col: u8) -> Self { Self { row, col } }

    /// Parses transcript notation. The letter selects the row counted from the
    /// bottom (`a` is row 7) and the digit selects the column (`1` is column 0).
    pub fn from_algebraic(s: &str) -> Result<Self, BoardError> {
        let b = s.as_bytes();
        if b.len() != 2 { return Err(BoardError::Notation(s.to_string())); }
        let letter = b[0].to_ascii_lowercase();
        let digit = b[1];
        if !(b'a'..=b'h').contains(&letter) || !(b'1'..=b'8').contains(&digit) {
            return Err(BoardError::Notation(s.to_string()));
        }
        Ok(Self { row: 7 - (letter - b'a'), col: digit - b'1' })
    }

    pub fn to_algebraic(self) -> String {
        let letter = (b'a' + (7 - self.row)) as char;
        let digit = (b'1' + self.col) as char;
        format!("{letter}{digit}")
    }

    pub fn is_corner(self) -> bool {
        let edge = (SIZE - 1) as u8;
        (self.row == 0 || self.row == edge) && (self.col == 0 || self.col == edge)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// 64-character row-major key: `X`, `O` or `.` per cell.
pub fn serialize(grid: &Grid) -> String {
    let mut s = String::with_capacity(CELLS);
    for row in grid {
        for cell in row {
            s.push(cell.map_or(EMPTY_SYMBOL, Color::symbol));
        }
    }
    s
}

pub fn transpose(grid: &Grid) -> Grid {
    let mut out = [[None; SIZE]; SIZE];
    for r in 0..SIZE {
        for c in 0..SIZE { out[c][r] = grid[r][c]; }
    }
    out
}

pub fn rotate_180(grid: &Grid) -> Grid {
    let mut out = [[None; SIZE]; SIZE];
    for r in 0..SIZE {
        for c in 0..SIZE { out[SIZE - 1 - r][SIZE - 1 - c] = grid[r][c]; }
    }
    out
}
