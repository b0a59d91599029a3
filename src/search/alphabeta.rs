use crate::board::{Move, MoveGuard, Position};
use crate::search::eval::{Evaluator, LOSS_SCORE, WIN_SCORE};
use crate::search::time::DeadlineOracle;
use crate::search::{node_moves, SearchError};

/// Minimax with alpha-beta pruning.
///
/// Cutoffs are fail-hard on the sentinels: a maximizing node that reaches
/// `beta` returns `WIN_SCORE`, a minimizing node that reaches `alpha` returns
/// `LOSS_SCORE`. The window edges `LOSS_SCORE`/`WIN_SCORE` count as unbounded
/// and never trigger a cutoff. The root value matches plain minimax; the move
/// may differ when several moves tie.
pub struct AlphaBeta<'a, D: DeadlineOracle + ?Sized> {
    eval: Evaluator<'a>,
    deadline: &'a D,
    nodes: u64,
}

impl<'a, D: DeadlineOracle + ?Sized> AlphaBeta<'a, D> {
    pub fn new(eval: Evaluator<'a>, deadline: &'a D) -> Self {
        Self { eval, deadline, nodes: 0 }
    }

    pub fn nodes(&self) -> u64 { self.nodes }

    /// Full-window search.
    pub fn search(
        &mut self,
        pos: &mut Position,
        depth: u32,
        maximizing: bool,
    ) -> Result<(i32, Option<Move>), SearchError> {
        self.search_window(pos, depth, LOSS_SCORE, WIN_SCORE, maximizing)
    }

    pub fn search_window(
        &mut self,
        pos: &mut Position,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
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
                let (v, _) = self.search_window(&mut child, depth - 1, alpha, beta, false)?;
                if best <= v {
                    best = v;
                    best_move = Some(mv);
                }
                if best > alpha { alpha = best; }
                if best >= beta && beta != WIN_SCORE { return Ok((WIN_SCORE, None)); }
            }
            Ok((best, best_move))
        } else {
            let mut best = WIN_SCORE;
            for mv in moves {
                let mut child = MoveGuard::apply(pos, mv)?;
                let (v, _) = self.search_window(&mut child, depth - 1, alpha, beta, true)?;
                if v < best { best = v; }
                if best < beta { beta = best; }
                if best <= alpha && alpha != LOSS_SCORE { return Ok((LOSS_SCORE, None)); }
            }
            Ok((best, None))
        }
    }
}
