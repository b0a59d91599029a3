use crate::board::{Color, Position, CELLS};
use crate::search::bonus::BonusTable;
use crate::search::holes::holes_score;

// Forced-outcome sentinels; also the unbounded alpha-beta window.
pub const WIN_SCORE: i32 = 30_000;
pub const LOSS_SCORE: i32 = -WIN_SCORE;

/// Disc total above which positional weights are dropped for raw counts.
const ENDGAME_FILL: f64 = 0.85;

/// Static scorer for one side, reading a borrowed bonus table.
#[derive(Clone, Copy, Debug)]
pub struct Evaluator<'a> {
    pub color: Color,
    pub bonus: &'a BonusTable,
}

impl<'a> Evaluator<'a> {
    pub fn new(color: Color, bonus: &'a BonusTable) -> Self { Self { color, bonus } }

    pub fn evaluate(&self, pos: &Position) -> i32 { evaluate(pos, self.color, self.bonus) }
}

/// Scores `pos` from `perspective`.
///
/// Each disc is worth its bonus weight plus one. The side to move's mobility is
/// charged against the perspective side whoever is on move, so the search
/// leans toward positions that leave the opponent few replies. Past the
/// endgame fill line the score becomes raw disc counts with the parity
/// correction added to the opponent.
pub fn evaluate(pos: &Position, perspective: Color, bonus: &BonusTable) -> i32 {
    let opp = perspective.opponent();
    let mut my_count = 0i32;
    let mut op_count = 0i32;
    let mut my_total = -(pos.possible_moves().len() as i32);
    let mut op_total = 0i32;
    for (r, row) in pos.grid().iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            if *cell == Some(perspective) {
                my_count += 1;
                my_total += bonus.get(r, c) + 1;
            } else if *cell == Some(opp) {
                op_count += 1;
                op_total += bonus.get(r, c) + 1;
            }
        }
    }

    if (my_count + op_count) as f64 > CELLS as f64 * ENDGAME_FILL {
        op_total = holes_score(pos.grid()) + op_count;
        my_total = my_count;
    }

    if my_count == 0 { return LOSS_SCORE; }
    if op_count == 0 { return WIN_SCORE; }
    my_total - op_total
}
