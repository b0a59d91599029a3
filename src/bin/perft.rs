use flipbot::perft::perft;
use flipbot::Position;

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for the Reversi move generator")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// Split the root moves across threads
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    use clap::Parser;
    use rayon::prelude::*;
    use std::time::Instant;

    env_logger::init();
    let args = Args::parse();
    let base = Position::startpos();
    let t0 = Instant::now();
    let nodes = if args.threads <= 1 || args.depth == 0 {
        perft(&mut base.clone(), args.depth)
    } else {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads).build()?;
        let roots = base.possible_moves();
        pool.install(|| {
            roots.par_iter().map(|&mv| {
                let mut b = base.clone();
                match b.perform_move(mv) {
                    Ok(_) => perft(&mut b, args.depth - 1),
                    Err(_) => 0,
                }
            }).sum::<u64>()
        })
    };
    let dt = t0.elapsed().as_secs_f64();
    if args.nps {
        let nps = if dt > 0.0 { nodes as f64 / dt } else { f64::INFINITY };
        println!("nodes: {} elapsed: {:.3}s nps: {:.0}", nodes, dt, nps);
    } else {
        println!("nodes: {}", nodes);
    }
    Ok(())
}
