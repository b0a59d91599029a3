use anyhow::Result;
use clap::Parser;
use flipbot::arena::{play_game, Contestant, GameRecord};
use flipbot::config::PlayerConfig;
use flipbot::search::Algorithm;
use flipbot::{Color, Player};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "compare-play", about = "Play games: minimax vs alpha-beta under the same clock")]
struct Args {
    /// Number of games; colors alternate between games
    #[arg(long, default_value_t = 20)]
    games: usize,

    /// Seconds per round of k moves, for both sides
    #[arg(long, default_value_t = 1.0)]
    time_per_k: f64,

    /// Moves per time round
    #[arg(long, default_value_t = 5)]
    k: u32,

    /// Games played at once (each game is searched single-threaded)
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Optional transcript corpus or .json book for both sides
    #[arg(long)]
    book: Option<PathBuf>,

    /// Optional: write summary JSON to this path
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Optional: append every game transcript to this file
    #[arg(long)]
    transcripts_out: Option<PathBuf>,
}

#[derive(Serialize, Default)]
struct Summary {
    games: usize,
    minimax_wins: usize,
    alphabeta_wins: usize,
    draws: usize,
    minimax_avg_depth: f64,
    alphabeta_avg_depth: f64,
}

struct Outcome {
    record: GameRecord,
    minimax_color: Color,
    minimax_depth: f64,
    alphabeta_depth: f64,
}

fn engine(algorithm: Algorithm, color: Color, base: &PlayerConfig) -> Result<Contestant> {
    let cfg = PlayerConfig { algorithm, ..base.clone() };
    Ok(Contestant::engine(Player::from_config(color, cfg)?))
}

fn avg_depth(c: &Contestant) -> f64 {
    match c {
        Contestant::Engine(p) => p.stats().average_depth(),
        Contestant::Random(_) => 0.0,
    }
}

fn play_one(idx: usize, base: &PlayerConfig) -> Result<Outcome> {
    let minimax_color = if idx % 2 == 0 { Color::Black } else { Color::White };
    let mut mm = engine(Algorithm::Minimax, minimax_color, base)?;
    let mut ab = engine(Algorithm::AlphaBeta, minimax_color.opponent(), base)?;
    let record = match minimax_color {
        Color::Black => play_game(&mut mm, &mut ab, |_, _, _| {})?,
        Color::White => play_game(&mut ab, &mut mm, |_, _, _| {})?,
    };
    Ok(Outcome { record, minimax_color, minimax_depth: avg_depth(&mm), alphabeta_depth: avg_depth(&ab) })
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let base = PlayerConfig {
        time_per_k_turns: args.time_per_k,
        k: args.k,
        book: args.book.clone(),
        ..PlayerConfig::default()
    };
    base.validate()?;

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let pb = ProgressBar::new(args.games as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} games ({eta})")?
            .progress_chars("=>-"),
    );
    let outcomes: Vec<Outcome> = pool.install(|| {
        (0..args.games)
            .into_par_iter()
            .map(|i| {
                let r = play_one(i, &base);
                pb.inc(1);
                r
            })
            .collect::<Result<Vec<_>>>()
    })?;
    pb.finish_with_message("done");

    let mut s = Summary { games: outcomes.len(), ..Summary::default() };
    for o in &outcomes {
        match o.record.winner() {
            Some(c) if c == o.minimax_color => s.minimax_wins += 1,
            Some(_) => s.alphabeta_wins += 1,
            None => s.draws += 1,
        }
        s.minimax_avg_depth += o.minimax_depth;
        s.alphabeta_avg_depth += o.alphabeta_depth;
    }
    if !outcomes.is_empty() {
        s.minimax_avg_depth /= outcomes.len() as f64;
        s.alphabeta_avg_depth /= outcomes.len() as f64;
    }

    println!(
        "minimax {} - alphabeta {} - draws {} (avg depth {:.2} vs {:.2})",
        s.minimax_wins, s.alphabeta_wins, s.draws, s.minimax_avg_depth, s.alphabeta_avg_depth
    );
    if let Some(path) = &args.json_out {
        std::fs::write(path, serde_json::to_string_pretty(&s)?)?;
        eprintln!("Wrote summary to {}", path.display());
    }
    if let Some(path) = &args.transcripts_out {
        let text: String = outcomes.iter().map(|o| o.record.transcript() + "\n").collect();
        std::fs::write(path, text)?;
    }
    Ok(())
}
