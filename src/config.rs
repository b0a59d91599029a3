use crate::book::corpus::{DEFAULT_PREFIX_LEN, DEFAULT_TOP_N};
use crate::book::BookError;
use crate::search::{saturating_secs, Algorithm};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io { path: String, source: std::io::Error },
    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
    #[error(transparent)]
    Book(#[from] BookError),
}

/// Per-player settings. Every field has a default, so a JSON file only needs
/// the keys it wants to change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub algorithm: Algorithm,
    /// Seconds available for each round of `k` moves.
    pub time_per_k_turns: f64,
    pub k: u32,
    /// Seconds held back from every per-move allotment.
    pub safety_margin: f64,
    /// Transcript corpus or `.json` book artifact; no book when unset.
    pub book: Option<PathBuf>,
    pub book_prefix_len: usize,
    pub book_lines: usize,
    /// Hard cap on iterative deepening; `None` searches until time runs out.
    pub max_depth: Option<u32>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::AlphaBeta,
            time_per_k_turns: 2.0,
            k: 5,
            safety_margin: 0.05,
            book: None,
            book_prefix_len: DEFAULT_PREFIX_LEN,
            book_lines: DEFAULT_TOP_N,
            max_depth: None,
        }
    }
}

impl PlayerConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.display().to_string(), source })?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.k == 0 { return Err(ConfigError::Invalid("k must be at least 1".into())); }
        if !(self.time_per_k_turns > 0.0 && Duration::try_from_secs_f64(self.time_per_k_turns).is_ok()) {
            return Err(ConfigError::Invalid(format!(
                "time_per_k_turns must be a positive number of seconds, got {}",
                self.time_per_k_turns
            )));
        }
        if Duration::try_from_secs_f64(self.safety_margin).is_err() {
            return Err(ConfigError::Invalid(format!(
                "safety_margin must be a non-negative number of seconds, got {}",
                self.safety_margin
            )));
        }
        if self.max_depth == Some(0) { return Err(ConfigError::Invalid("max_depth must be at least 1".into())); }
        Ok(())
    }

    /// Out-of-range values saturate; `validate` is what rejects them.
    pub fn round_time(&self) -> Duration { saturating_secs(self.time_per_k_turns) }

    pub fn margin(&self) -> Duration { saturating_secs(self.safety_margin) }
}
