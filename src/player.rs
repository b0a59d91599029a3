use crate::board::{Color, Move, Position};
use crate::book::OpeningBook;
use crate::config::{ConfigError, PlayerConfig};
use crate::search::{
    search_depth, BonusTable, Deadline, DeadlineOracle, Evaluator, SearchError, TimeBudget,
    LOSS_SCORE, WIN_SCORE,
};
use log::{debug, info, warn};
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no legal moves to choose from")]
    NoLegalMoves,
    /// Anything other than a missed deadline is fatal for the game.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Where the last chosen move came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveSource {
    Forced,
    Book,
    Search { depth: u32 },
    /// Not even depth 1 finished in time.
    Fallback,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub moves_searched: u64,
    pub depth_sum: u64,
    pub book_hits: u64,
    pub nodes: u64,
}

impl PlayerStats {
    pub fn average_depth(&self) -> f64 {
        if self.moves_searched == 0 { 0.0 } else { self.depth_sum as f64 / self.moves_searched as f64 }
    }
}

/// Turn controller for one color across one game.
///
/// Owns the bonus table and the round clock. `choose_move` must be called on
/// this player's turn, and `after_move` once after every move it made.
pub struct Player {
    color: Color,
    config: PlayerConfig,
    bonus: BonusTable,
    book: OpeningBook,
    budget: TimeBudget,
    deadline: Deadline,
    stats: PlayerStats,
    last_source: Option<MoveSource>,
}

impl Player {
    pub fn new(color: Color, config: PlayerConfig) -> Self {
        Self::with_book(color, config, OpeningBook::new())
    }

    pub fn with_book(color: Color, config: PlayerConfig, book: OpeningBook) -> Self {
        let budget = TimeBudget::new(config.round_time(), config.k, config.margin());
        Self {
            color,
            config,
            bonus: BonusTable::new(),
            book,
            budget,
            deadline: Deadline::unbounded(),
            stats: PlayerStats::default(),
            last_source: None,
        }
    }

    /// Validates `config` and builds a player, loading the book named by
    /// `config.book` if any.
    pub fn from_config(color: Color, config: PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let book = match &config.book {
            Some(path) => OpeningBook::load(path, config.book_prefix_len, config.book_lines)?,
            None => OpeningBook::new(),
        };
        info!("{:?} player: {:?}, book of {} positions", color, config.algorithm, book.len());
        Ok(Self::with_book(color, config, book))
    }

    pub fn color(&self) -> Color { self.color }
    pub fn config(&self) -> &PlayerConfig { &self.config }
    pub fn bonus_table(&self) -> &BonusTable { &self.bonus }
    pub fn book(&self) -> &OpeningBook { &self.book }
    pub fn book_mut(&mut self) -> &mut OpeningBook { &mut self.book }
    pub fn budget(&self) -> &TimeBudget { &self.budget }
    pub fn stats(&self) -> PlayerStats { self.stats }
    pub fn last_source(&self) -> Option<MoveSource> { self.last_source }

    /// True once the current move has used up its allotment.
    pub fn deadline_exceeded(&self) -> bool { self.deadline.exceeded() }

    /// Picks a move from `legal` for the position `pos`.
    ///
    /// A single legal move is returned as is; otherwise the book is tried and
    /// then iterative deepening runs until the per-move allotment is spent.
    /// Returns some legal move whenever `legal` is non-empty, unless the search
    /// hits a fatal error.
    pub fn choose_move(&mut self, pos: &Position, legal: &[Move]) -> Result<Move, PlayerError> {
        let start = Instant::now();
        let allotment = self.budget.allotment();
        self.deadline = Deadline::starting_at(start, allotment);

        let chosen = self.select(pos, legal);

        let elapsed = start.elapsed();
        self.budget.end_turn(elapsed);
        if let Ok(mv) = &chosen {
            info!(
                "{:?} plays {} via {:?} in {:.3}s (allotment {:.3}s)",
                self.color, mv, self.last_source, elapsed.as_secs_f64(), allotment.as_secs_f64()
            );
        }
        chosen
    }

    /// Post-move hook: folds the move just made, and any corner already taken
    /// on `after`, into the bonus table.
    pub fn after_move(&mut self, after: &Position, mv: Move) {
        self.bonus.record_move(mv);
        self.bonus.sync_corners(after.grid());
    }

    fn select(&mut self, pos: &Position, legal: &[Move]) -> Result<Move, PlayerError> {
        match legal {
            [] => return Err(PlayerError::NoLegalMoves),
            [only] => {
                self.last_source = Some(MoveSource::Forced);
                return Ok(*only);
            }
            _ => {}
        }

        if let Some(mv) = self.book.lookup(pos.grid()) {
            if legal.contains(&mv) {
                self.stats.book_hits += 1;
                self.last_source = Some(MoveSource::Book);
                return Ok(mv);
            }
            warn!("book move {} is not legal here, searching instead", mv);
        }

        let (found, depth, nodes) = self.iterative_deepening(pos)?;
        self.stats.nodes += nodes;
        match found {
            Some(mv) => {
                self.stats.moves_searched += 1;
                self.stats.depth_sum += depth as u64;
                self.last_source = Some(MoveSource::Search { depth });
                Ok(mv)
            }
            None => {
                self.last_source = Some(MoveSource::Fallback);
                Ok(legal[0])
            }
        }
    }

    /// Searches depth 1, 2, ... and returns the move of the deepest completed
    /// depth, that depth, and the nodes visited. A depth cut short by the
    /// deadline contributes nothing.
    fn iterative_deepening(&self, pos: &Position) -> Result<(Option<Move>, u32, u64), SearchError> {
        debug_assert_eq!(pos.to_move(), self.color, "choose_move called off turn");
        let mut work = pos.clone();
        let eval = Evaluator::new(self.color, &self.bonus);
        let limit = self.config.max_depth.unwrap_or(u32::MAX).min(pos.empty_count() as u32);

        let mut best = None;
        let mut completed = 0u32;
        let mut nodes = 0u64;
        for depth in 1..=limit {
            match search_depth(self.config.algorithm, &mut work, depth, eval, &self.deadline) {
                Ok(r) => {
                    nodes += r.nodes;
                    completed = depth;
                    if r.bestmove.is_some() { best = r.bestmove; }
                    debug!("depth {depth}: score {} move {:?} nodes {}", r.score, r.bestmove, r.nodes);
                    if r.score == WIN_SCORE || r.score == LOSS_SCORE { break; }
                }
                Err(SearchError::DeadlineExceeded) => {
                    debug!("depth {depth} abandoned at deadline");
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok((best, completed, nodes))
    }
}
