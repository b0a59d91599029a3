use crate::board::{Move, MoveGuard, Position};
use crate::search::eval::{Evaluator, LOSS_SCORE, WIN_SCORE};
use crate::search::time::DeadlineOracle;
use crate::search::{node_moves, SearchError};

/// Exhaustive minimax without pruning.
pub struct Minimax<'a, D: DeadlineOracle + ?Sized> {
    eval: Evaluator<'a>,
    deadline: &'a D,
    nodes: u64,
}

impl<'a, D: DeadlineOracle + ?Sized> Minimax<'a, D> {
    pub fn new(eval: Evaluator<'a>, deadline: &'a D) -> Self {
        Self { eval, deadline, nodes: 0 }
    }

    pub fn nodes(&self) -> u64 { self.nodes }

    /// Returns the minimax value of `pos` searched `depth` plies deep, and the
    /// chosen move when `maximizing`. Among equal scores a maximizing node keeps
    /// the last move seen, a minimizing node the first.
    pub fn search(
        &mut self,
        pos: &mut Position,
        depth: u32,
        maximizing: bool,
    ) -> Result<(i32, Option<Move>), SearchError> {
        if self.deadline.exceeded() { return Err(SearchError::DeadlineExceeded); }
        self.nodes += 1;

        let moves = node_moves(pos)?;
        if depth == 0 || moves.is_empty() {
            return Ok((self.eval.evaluate(pos), None));
        }

        if maximizing {
            let mut best = LOSS_SCORE;
            let mut best_move = None;
            for mv in moves {
                let mut child = MoveGuard::apply(pos, mv)?;
                let (v, _) = self.search(&mut child, depth - 1, false)?;
                if best <= v {
                    best = v;
                    best_move = Some(mv);
                }
            }
            Ok((best, best_move))
        } else {
            let mut best = WIN_SCORE;
            for mv in moves {
                let mut child = MoveGuard::apply(pos, mv)?;
                let (v, _) = self.search(&mut child, depth - 1, true)?;
                if v < best { best = v; }
            }
            Ok((best, None))
        }
    }
}
