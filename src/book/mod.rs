pub mod corpus;

use crate::board::{rotate_180, serialize, transpose, Grid, Move, Position, SIZE};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("reading book {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("book json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialized board -> recorded move.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningBook {
    entries: HashMap<String, Move>,
}

impl OpeningBook {
    pub fn new() -> Self { Self::default() }

    /// Replays `lines` (most frequent first) from the start position and
    /// records the move played from every position visited.
    ///
    /// Lines are replayed least frequent first so that a more popular line
    /// overwrites a rarer one reaching the same position.
    pub fn build(lines: &[Vec<Move>]) -> Self {
        let mut book = Self::new();
        for (idx, line) in lines.iter().enumerate().rev() {
            let mut pos = Position::startpos();
            for &mv in line {
                if !pos.has_moves(pos.to_move()) { pos.pass(); }
                let key = serialize(pos.grid());
                if let Err(e) = pos.perform_move(mv) {
                    warn!("book line {idx} abandoned at {}: {e}", mv.to_algebraic());
                    break;
                }
                book.entries.insert(key, mv);
            }
        }
        debug!("opening book built: {} lines, {} positions", lines.len(), book.len());
        book
    }

    /// Mines the corpus and builds the book in one step.
    pub fn from_corpus(text: &str, prefix_len: usize, top_n: usize) -> Self {
        Self::build(&corpus::mine_lines(text, prefix_len, top_n))
    }

    /// Loads a `.json` book artifact, or mines any other file as a transcript
    /// corpus keeping the `top_n` most frequent `prefix_len`-move openings.
    pub fn load(path: &Path, prefix_len: usize, top_n: usize) -> Result<Self, BookError> {
        let text = read(path)?;
        if path.extension().map_or(false, |e| e.eq_ignore_ascii_case("json")) {
            Ok(serde_json::from_str(&text)?)
        } else {
            Ok(Self::from_corpus(&text, prefix_len, top_n))
        }
    }

    pub fn load_json(path: &Path) -> Result<Self, BookError> {
        Ok(serde_json::from_str(&read(path)?)?)
    }

    pub fn save_json(&self, path: &Path) -> Result<(), BookError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| BookError::Io { path: path.display().to_string(), source })
    }

    pub fn insert(&mut self, grid: &Grid, mv: Move) { self.entries.insert(serialize(grid), mv); }

    pub fn remove(&mut self, grid: &Grid) -> Option<Move> { self.entries.remove(&serialize(grid)) }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Finds a recorded move for `grid` or one of its symmetric forms.
    ///
    /// Probes identity, transpose, 180° rotation and rotation-then-transpose in
    /// that order, mapping the stored move back onto `grid`'s orientation.
    pub fn lookup(&self, grid: &Grid) -> Option<Move> {
        if self.is_empty() { return None; }
        let last = (SIZE - 1) as u8;

        if let Some(&m) = self.entries.get(&serialize(grid)) { return Some(m); }

        if let Some(&m) = self.entries.get(&serialize(&transpose(grid))) {
            return Some(Move::new(m.col, m.row));
        }

        let rotated = rotate_180(grid);
        if let Some(&m) = self.entries.get(&serialize(&rotated)) {
            return Some(Move::new(last - m.row, last - m.col));
        }

        if let Some(&m) = self.entries.get(&serialize(&transpose(&rotated))) {
            return Some(Move::new(last - m.col, last - m.row));
        }
        None
    }
}

fn read(path: &Path) -> Result<String, BookError> {
    fs::read_to_string(path).map_err(|source| BookError::Io { path: path.display().to_string(), source })
}
