pub mod alphabeta;
pub mod bonus;
pub mod eval;
pub mod holes;
pub mod minimax;
pub mod time;

use crate::board::{BoardError, Move, Position};
use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;
use thiserror::Error;

pub use alphabeta::AlphaBeta;
pub use bonus::BonusTable;
pub use eval::{Evaluator, LOSS_SCORE, WIN_SCORE};
pub use minimax::Minimax;
pub use time::{saturating_secs, Deadline, DeadlineOracle, TimeBudget};

/// Upper bound on legal moves in any Reversi position.
pub(crate) const MAX_MOVES: usize = 32;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The deadline oracle fired; the attempt at this depth is void.
    #[error("search deadline exceeded")]
    DeadlineExceeded,
    #[error("out of memory while simulating moves: {0}")]
    ResourceExhausted(#[from] TryReserveError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Minimax,
    #[default]
    AlphaBeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub bestmove: Option<Move>,
    pub nodes: u64,
}

/// Runs one fixed-depth search of the given algorithm from a maximizing root.
pub fn search_depth<D: DeadlineOracle + ?Sized>(
    algorithm: Algorithm,
    pos: &mut Position,
    depth: u32,
    eval: Evaluator<'_>,
    deadline: &D,
) -> Result<SearchResult, SearchError> {
    match algorithm {
        Algorithm::Minimax => {
            let mut s = Minimax::new(eval, deadline);
            let (score, bestmove) = s.search(pos, depth, true)?;
            Ok(SearchResult { score, bestmove, nodes: s.nodes() })
        }
        Algorithm::AlphaBeta => {
            let mut s = AlphaBeta::new(eval, deadline);
            let (score, bestmove) = s.search(pos, depth, true)?;
            Ok(SearchResult { score, bestmove, nodes: s.nodes() })
        }
    }
}

/// Legal moves for the side to move, reserved fallibly so an allocation
/// failure surfaces as `ResourceExhausted` rather than an abort.
pub(crate) fn node_moves(pos: &Position) -> Result<Vec<Move>, SearchError> {
    let mut moves = Vec::new();
    moves.try_reserve(MAX_MOVES)?;
    pos.collect_moves(&mut moves);
    Ok(moves)
}
