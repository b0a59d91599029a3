use anyhow::{Context, Result};
use clap::Parser;
use flipbot::book::corpus::{mine_lines, DEFAULT_PREFIX_LEN, DEFAULT_TOP_N};
use flipbot::book::OpeningBook;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "build-book", about = "Mine a transcript corpus into a JSON opening book")]
struct Args {
    /// Transcript corpus, one game per line
    #[arg(value_name = "CORPUS")]
    corpus: PathBuf,

    /// Output JSON book
    #[arg(long, default_value = "book.json")]
    out: PathBuf,

    /// Moves kept from the start of each game
    #[arg(long, default_value_t = DEFAULT_PREFIX_LEN)]
    prefix_len: usize,

    /// Number of most frequent openings to keep
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// Print the selected openings
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let text = std::fs::read_to_string(&args.corpus)
        .with_context(|| format!("reading {}", args.corpus.display()))?;

    let lines = mine_lines(&text, args.prefix_len, args.top);
    if args.verbose {
        for (i, line) in lines.iter().enumerate() {
            let moves: Vec<String> = line.iter().map(|m| m.to_algebraic()).collect();
            println!("{:>3}: {}", i + 1, moves.concat());
        }
    }
    let book = OpeningBook::build(&lines);
    book.save_json(&args.out)?;
    eprintln!("Wrote {} positions from {} openings to {}", book.len(), lines.len(), args.out.display());
    Ok(())
}
