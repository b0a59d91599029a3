use super::{BoardError, Color, Grid, Move, EMPTY_SYMBOL, SIZE};
use std::fmt;
use std::ops::{Deref, DerefMut};

const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Everything needed to take a move back.
#[derive(Clone, Debug)]
pub struct Undo {
    mv: Move,
    flipped: Vec<Move>,
    prev_to_move: Color,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    grid: Grid,
    to_move: Color,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    /// Black to move with Black on (3,3)/(4,4) and White on (3,4)/(4,3).
    pub fn startpos() -> Self {
        let mut grid = [[None; SIZE]; SIZE];
        grid[3][3] = Some(Color::Black);
        grid[4][4] = Some(Color::Black);
        grid[3][4] = Some(Color::White);
        grid[4][3] = Some(Color::White);
        Self { grid, to_move: Color::Black }
    }

    pub fn from_grid(grid: Grid, to_move: Color) -> Self { Self { grid, to_move } }

    /// Builds a position from 8 rows of `X`/`O`/`.` characters.
    pub fn from_rows(rows: [&str; SIZE], to_move: Color) -> Result<Self, BoardError> {
        let mut grid = [[None; SIZE]; SIZE];
        for (r, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().collect();
            if cells.len() != SIZE { return Err(BoardError::Notation(line.to_string())); }
            for (c, ch) in cells.into_iter().enumerate() {
                grid[r][c] = match ch {
                    'X' => Some(Color::Black),
                    'O' => Some(Color::White),
                    '.' => None,
                    _ => return Err(BoardError::Notation(line.to_string())),
                };
            }
        }
        Ok(Self { grid, to_move })
    }

    pub fn grid(&self) -> &Grid { &self.grid }

    pub fn to_move(&self) -> Color { self.to_move }

    pub fn cell(&self, row: usize, col: usize) -> Option<Color> { self.grid[row][col] }

    pub fn count(&self, color: Color) -> usize {
        self.grid.iter().flatten().filter(|&&c| c == Some(color)).count()
    }

    pub fn empty_count(&self) -> usize {
        self.grid.iter().flatten().filter(|c| c.is_none()).count()
    }

    /// Legal moves for the side to move, in row-major order.
    pub fn possible_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(32);
        self.collect_moves(&mut moves);
        moves
    }

    /// Appends the legal moves for the side to move to `out`.
    pub fn collect_moves(&self, out: &mut Vec<Move>) {
        for r in 0..SIZE {
            for c in 0..SIZE {
                let mv = Move::new(r as u8, c as u8);
                if self.is_legal_for(mv, self.to_move) { out.push(mv); }
            }
        }
    }

    pub fn has_moves(&self, color: Color) -> bool {
        (0..SIZE).any(|r| (0..SIZE).any(|c| self.is_legal_for(Move::new(r as u8, c as u8), color)))
    }

    pub fn is_game_over(&self) -> bool {
        !self.has_moves(Color::Black) && !self.has_moves(Color::White)
    }

    pub fn is_legal(&self, mv: Move) -> bool { self.is_legal_for(mv, self.to_move) }

    fn is_legal_for(&self, mv: Move, color: Color) -> bool {
        let (r, c) = (mv.row as usize, mv.col as usize);
        if r >= SIZE || c >= SIZE || self.grid[r][c].is_some() { return false; }
        DIRECTIONS.iter().any(|&d| self.run_length(mv, d, color) > 0)
    }

    /// Number of opponent discs bracketed from `mv` in direction `d`.
    fn run_length(&self, mv: Move, (dr, dc): (i8, i8), color: Color) -> usize {
        let opp = Some(color.opponent());
        let mut r = mv.row as i8 + dr;
        let mut c = mv.col as i8 + dc;
        let mut n = 0usize;
        while (0..SIZE as i8).contains(&r) && (0..SIZE as i8).contains(&c) {
            let cell = self.grid[r as usize][c as usize];
            if cell == opp {
                n += 1;
            } else if cell == Some(color) {
                return n;
            } else {
                return 0;
            }
            r += dr;
            c += dc;
        }
        0
    }

    /// Places a disc for the side to move, flips the bracketed discs and hands
    /// the turn to the opponent.
    pub fn perform_move(&mut self, mv: Move) -> Result<Undo, BoardError> {
        let color = self.to_move;
        if !self.is_legal_for(mv, color) {
            return Err(BoardError::IllegalMove { mv, color });
        }
        let mut flipped = Vec::with_capacity(8);
        for &(dr, dc) in DIRECTIONS.iter() {
            let n = self.run_length(mv, (dr, dc), color);
            for step in 1..=n as i8 {
                let r = (mv.row as i8 + dr * step) as usize;
                let c = (mv.col as i8 + dc * step) as usize;
                self.grid[r][c] = Some(color);
                flipped.push(Move::new(r as u8, c as u8));
            }
        }
        self.grid[mv.row as usize][mv.col as usize] = Some(color);
        self.to_move = color.opponent();
        Ok(Undo { mv, flipped, prev_to_move: color })
    }

    pub fn undo_move(&mut self, undo: Undo) {
        let opp = Some(undo.prev_to_move.opponent());
        for sq in &undo.flipped { self.grid[sq.row as usize][sq.col as usize] = opp; }
        self.grid[undo.mv.row as usize][undo.mv.col as usize] = None;
        self.to_move = undo.prev_to_move;
    }

    /// Hands the turn over without placing a disc.
    pub fn pass(&mut self) { self.to_move = self.to_move.opponent(); }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for (r, row) in self.grid.iter().enumerate() {
            write!(f, "{r}")?;
            for cell in row {
                write!(f, " {}", cell.map_or(EMPTY_SYMBOL, Color::symbol))?;
            }
            writeln!(f)?;
        }
        write!(f, "{:?} to move", self.to_move)
    }
}

/// A move held on a borrowed position. Dropping the guard takes the move
/// back, so an early `?` return still leaves the position untouched.
pub struct MoveGuard<'a> {
    pos: &'a mut Position,
    undo: Option<Undo>,
}

impl<'a> MoveGuard<'a> {
    pub fn apply(pos: &'a mut Position, mv: Move) -> Result<Self, BoardError> {
        let undo = pos.perform_move(mv)?;
        Ok(Self { pos, undo: Some(undo) })
    }
}

impl Deref for MoveGuard<'_> {
    type Target = Position;
    fn deref(&self) -> &Position { &*self.pos }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Position { &mut *self.pos }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() { self.pos.undo_move(undo); }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_moves_match_standard_openings() {
        let pos = Position::startpos();
        let moves = pos.possible_moves();
        let mut expected: Vec<Move> = ["f5", "d3", "c4", "e6"]
            .iter()
            .map(|s| Move::from_algebraic(s).unwrap())
            .collect();
        expected.sort();
        assert_eq!(moves, expected);
    }

    #[test]
    fn perform_then_undo_restores_position() {
        let mut pos = Position::startpos();
        let before = pos.clone();
        let undo = pos.perform_move(Move::new(2, 4)).unwrap();
        assert_eq!(pos.count(Color::Black), 4);
        assert_eq!(pos.count(Color::White), 1);
        assert_eq!(pos.to_move(), Color::White);
        pos.undo_move(undo);
        assert_eq!(pos, before);
    }

    #[test]
    fn illegal_move_is_rejected() {
        let mut pos = Position::startpos();
        assert!(pos.perform_move(Move::new(0, 0)).is_err());
        assert!(pos.perform_move(Move::new(3, 3)).is_err());
    }

    #[test]
    fn guard_undoes_on_drop() {
        let mut pos = Position::startpos();
        let before = pos.clone();
        {
            let guard = MoveGuard::apply(&mut pos, Move::new(4, 2)).unwrap();
            assert_eq!(guard.to_move(), Color::White);
        }
        assert_eq!(pos, before);
    }
}
