// Reversi move selection engine
pub mod arena;
pub mod board;
pub mod book;
pub mod config;
pub mod perft;
pub mod player;
pub mod search;

pub use board::{Color, Move, Position};
pub use player::{MoveSource, Player, PlayerError};
