use flipbot::board::{rotate_180, transpose, Grid, SIZE};
use flipbot::search::holes::holes_score;
use flipbot::{Color, Position};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn rotate_90(grid: &Grid) -> Grid {
    let mut out = [[None; SIZE]; SIZE];
    for r in 0..SIZE {
        for c in 0..SIZE { out[c][SIZE - 1 - r] = grid[r][c]; }
    }
    out
}

fn random_grid(rng: &mut SmallRng, fill: f64) -> Grid {
    let mut grid = [[None; SIZE]; SIZE];
    for row in grid.iter_mut() {
        for cell in row.iter_mut() {
            if rng.gen_bool(fill) {
                *cell = Some(if rng.gen_bool(0.5) { Color::Black } else { Color::White });
            }
        }
    }
    grid
}

#[test]
fn invariant_under_rotation_and_transpose() {
    let mut rng = SmallRng::seed_from_u64(9);
    for i in 0..200 {
        let grid = random_grid(&mut rng, 0.4 + (i % 5) as f64 * 0.12);
        let base = holes_score(&grid);
        assert_eq!(holes_score(&transpose(&grid)), base);
        assert_eq!(holes_score(&rotate_180(&grid)), base);
        assert_eq!(holes_score(&rotate_90(&grid)), base);
        assert_eq!(holes_score(&transpose(&rotate_180(&grid))), base);
    }
}

#[test]
fn full_board_is_zero() {
    let mut grid = [[Some(Color::White); SIZE]; SIZE];
    grid[2][5] = Some(Color::Black);
    assert_eq!(holes_score(&grid), 0);
}

#[test]
fn empty_board_is_one_even_region() {
    assert_eq!(holes_score(&[[None; SIZE]; SIZE]), -5);
}

#[test]
fn caller_grid_is_untouched() {
    let pos = Position::startpos();
    let before = pos.clone();
    holes_score(pos.grid());
    assert_eq!(pos, before);
}
