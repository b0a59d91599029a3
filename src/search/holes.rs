use crate::board::{Grid, SIZE};

/// Weight of one unit of parity imbalance.
const PARITY_WEIGHT: i32 = 5;

/// Parity correction over the empty regions of `grid`.
///
/// Every maximal 8-connected region of empty cells is measured once. Returns
/// `(odd_regions - even_regions) * 5`. The caller's grid is only read.
pub fn holes_score(grid: &Grid) -> i32 {
    let mut visited = [[false; SIZE]; SIZE];
    let mut odd = 0i32;
    let mut even = 0i32;
    for r in 0..SIZE {
        for c in 0..SIZE {
            let len = hole_length(grid, &mut visited, r, c);
            if len == 0 { continue; }
            if len % 2 == 1 { odd += 1; } else { even += 1; }
        }
    }
    (odd - even) * PARITY_WEIGHT
}

/// Size of the unvisited empty region containing `(r, c)`, marking it visited.
fn hole_length(grid: &Grid, visited: &mut [[bool; SIZE]; SIZE], r: usize, c: usize) -> usize {
    if grid[r][c].is_some() || visited[r][c] { return 0; }
    let mut stack = vec![(r, c)];
    visited[r][c] = true;
    let mut len = 0usize;
    while let Some((r, c)) = stack.pop() {
        len += 1;
        for nr in r.saturating_sub(1)..=(r + 1).min(SIZE - 1) {
            for nc in c.saturating_sub(1)..=(c + 1).min(SIZE - 1) {
                if grid[nr][nc].is_none() && !visited[nr][nc] {
                    visited[nr][nc] = true;
                    stack.push((nr, nc));
                }
            }
        }
    }
    len
}
