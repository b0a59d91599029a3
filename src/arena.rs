//! Whole games between engine players and random movers.

use crate::board::{BoardError, Color, Move, Position};
use crate::player::{Player, PlayerError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("{color:?} chose {mv}, which is not legal here")]
    IllegalChoice { color: Color, mv: Move },
    #[error(transparent)]
    Player(#[from] PlayerError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

pub enum Contestant {
    Engine(Box<Player>),
    Random(SmallRng),
}

impl Contestant {
    pub fn engine(player: Player) -> Self { Contestant::Engine(Box::new(player)) }

    pub fn random(seed: u64) -> Self { Contestant::Random(SmallRng::seed_from_u64(seed)) }

    pub fn name(&self) -> String {
        match self {
            Contestant::Engine(p) => format!("{:?}", p.config().algorithm).to_lowercase(),
            Contestant::Random(_) => "random".to_string(),
        }
    }

    fn choose(&mut self, pos: &Position, legal: &[Move]) -> Result<Move, PlayerError> {
        match self {
            Contestant::Engine(p) => p.choose_move(pos, legal),
            Contestant::Random(rng) => {
                if legal.is_empty() { return Err(PlayerError::NoLegalMoves); }
                Ok(legal[rng.gen_range(0..legal.len())])
            }
        }
    }

    fn after_move(&mut self, after: &Position, mv: Move) {
        if let Contestant::Engine(p) = self { p.after_move(after, mv); }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameRecord {
    /// Moves in algebraic transcript notation.
    pub moves: Vec<String>,
    pub passes: u32,
    pub black_discs: usize,
    pub white_discs: usize,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Color> {
        match self.black_discs.cmp(&self.white_discs) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// The game as one transcript line, as read by the book miner.
    pub fn transcript(&self) -> String { self.moves.concat() }
}

/// Plays one game from the start position to the end, calling `on_move`
/// after every placed disc.
pub fn play_game<F>(black: &mut Contestant, white: &mut Contestant, mut on_move: F) -> Result<GameRecord, ArenaError>
where
    F: FnMut(&Position, Color, Move),
{
    let mut pos = Position::startpos();
    let mut record = GameRecord::default();
    loop {
        let legal = pos.possible_moves();
        if legal.is_empty() {
            if pos.is_game_over() { break; }
            pos.pass();
            record.passes += 1;
            continue;
        }
        let color = pos.to_move();
        let side = match color { Color::Black => &mut *black, Color::White => &mut *white };
        let mv = side.choose(&pos, &legal)?;
        if !legal.contains(&mv) { return Err(ArenaError::IllegalChoice { color, mv }); }
        pos.perform_move(mv)?;
        side.after_move(&pos, mv);
        record.moves.push(mv.to_algebraic());
        on_move(&pos, color, mv);
    }
    record.black_discs = pos.count(Color::Black);
    record.white_discs = pos.count(Color::White);
    Ok(record)
}
