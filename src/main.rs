use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flipbot::arena::{play_game, Contestant};
use flipbot::config::PlayerConfig;
use flipbot::search::Algorithm;
use flipbot::{Color, Player};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Side {
    Minimax,
    Alphabeta,
    Random,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play one game of Reversi between engines or random movers", long_about = None)]
struct Args {
    /// Who plays Black (moves first)
    #[arg(long, value_enum, default_value = "alphabeta")]
    black: Side,

    /// Who plays White
    #[arg(long, value_enum, default_value = "random")]
    white: Side,

    /// JSON player config applied to both engine sides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds per round of k moves
    #[arg(long)]
    time_per_k: Option<f64>,

    /// Moves per time round
    #[arg(long)]
    k: Option<u32>,

    /// Transcript corpus or .json book artifact
    #[arg(long)]
    book: Option<PathBuf>,

    /// Seed for random movers
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the board after every move
    #[arg(long)]
    verbose: bool,
}

fn base_config(args: &Args) -> Result<PlayerConfig> {
    let mut cfg = match &args.config {
        Some(path) => PlayerConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => PlayerConfig::default(),
    };
    if let Some(t) = args.time_per_k { cfg.time_per_k_turns = t; }
    if let Some(k) = args.k { cfg.k = k; }
    if let Some(b) = &args.book { cfg.book = Some(b.clone()); }
    cfg.validate()?;
    Ok(cfg)
}

fn contestant(side: Side, color: Color, cfg: &PlayerConfig, seed: u64) -> Result<Contestant> {
    let algorithm = match side {
        Side::Minimax => Algorithm::Minimax,
        Side::Alphabeta => Algorithm::AlphaBeta,
        Side::Random => return Ok(Contestant::random(seed)),
    };
    let cfg = PlayerConfig { algorithm, ..cfg.clone() };
    Ok(Contestant::engine(Player::from_config(color, cfg)?))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let cfg = base_config(&args)?;

    let mut black = contestant(args.black, Color::Black, &cfg, args.seed)?;
    let mut white = contestant(args.white, Color::White, &cfg, args.seed.wrapping_add(1))?;
    println!("{} (X) vs {} (O)", black.name(), white.name());

    let record = play_game(&mut black, &mut white, |pos, color, mv| {
        println!("{:?} plays {} {}", color, mv.to_algebraic(), mv);
        if args.verbose { println!("{pos}\n"); }
    })?;

    for (side, label) in [(&black, "Black"), (&white, "White")] {
        if let Contestant::Engine(p) = side {
            let s = p.stats();
            println!(
                "{label}: {} searched moves, avg depth {:.2}, {} book hits, {} nodes",
                s.moves_searched, s.average_depth(), s.book_hits, s.nodes
            );
        }
    }
    println!("Final: X {} - O {} ({} passes)", record.black_discs, record.white_discs, record.passes);
    match record.winner() {
        Some(c) => println!("{:?} wins", c),
        None => println!("Draw"),
    }
    println!("Transcript: {}", record.transcript());
    Ok(())
}
