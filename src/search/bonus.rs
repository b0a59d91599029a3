use crate::board::{Grid, Move, SIZE};

pub const CORNER_BONUS: i32 = 99;
pub const CORNER_PENALTY: i32 = -24;
pub const EDGE_BONUS: i32 = 2;

const LAST: usize = SIZE - 1;
const CORNERS: [(usize, usize); 4] = [(0, 0), (0, LAST), (LAST, 0), (LAST, LAST)];

/// Positional weights per cell.
///
/// Corners are worth `CORNER_BONUS`. The X-square and both C-squares around a
/// corner carry `CORNER_PENALTY` until that corner is taken, after which they
/// fall back to `EDGE_BONUS` for the rest of the game. Other edge cells hold
/// `EDGE_BONUS` and the interior is zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BonusTable {
    weights: [[i32; SIZE]; SIZE],
}

impl Default for BonusTable {
    fn default() -> Self { Self::new() }
}

impl BonusTable {
    pub fn new() -> Self {
        let mut weights = [[0; SIZE]; SIZE];
        for i in 0..SIZE {
            weights[0][i] = EDGE_BONUS;
            weights[LAST][i] = EDGE_BONUS;
            weights[i][0] = EDGE_BONUS;
            weights[i][LAST] = EDGE_BONUS;
        }
        for &(r, c) in CORNERS.iter() {
            weights[r][c] = CORNER_BONUS;
            for (nr, nc) in neighbours(r, c) { weights[nr][nc] = CORNER_PENALTY; }
        }
        Self { weights }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i32 { self.weights[row][col] }

    /// Relaxes the penalty cells around `mv` if it is a corner.
    pub fn record_move(&mut self, mv: Move) {
        if mv.is_corner() { self.relax_corner(mv.row as usize, mv.col as usize); }
    }

    /// Relaxes around every corner that is occupied in `grid`, whoever owns it.
    pub fn sync_corners(&mut self, grid: &Grid) {
        for &(r, c) in CORNERS.iter() {
            if grid[r][c].is_some() { self.relax_corner(r, c); }
        }
    }

    pub fn is_relaxed(&self, corner: Move) -> bool {
        let (r, c) = (corner.row as usize, corner.col as usize);
        neighbours(r, c).all(|(nr, nc)| self.weights[nr][nc] != CORNER_PENALTY)
    }

    fn relax_corner(&mut self, r: usize, c: usize) {
        for (nr, nc) in neighbours(r, c) {
            if self.weights[nr][nc] == CORNER_PENALTY { self.weights[nr][nc] = EDGE_BONUS; }
        }
    }
}

/// In-board cells of the 3x3 block around `(r, c)`, excluding the centre.
fn neighbours(r: usize, c: usize) -> impl Iterator<Item = (usize, usize)> {
    let rows = r.saturating_sub(1)..=(r + 1).min(LAST);
    rows.flat_map(move |nr| {
        (c.saturating_sub(1)..=(c + 1).min(LAST)).map(move |nc| (nr, nc))
    })
    .filter(move |&(nr, nc)| (nr, nc) != (r, c))
}
