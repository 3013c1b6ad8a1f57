use chess_rules::perft::{perft, perft_detailed, perft_divide, run_all_tests};
use chess_rules::{Position, RulesResult};
use clap::Parser;
use std::process::ExitCode;
use std::time::Instant;

/// Count legal move sequences from a position
#[derive(Parser, Debug)]
#[command(name = "perft", version, about)]
struct Args {
    /// Position to search, as FEN
    #[arg(long, default_value = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1")]
    fen: String,

    /// Search depth in plies
    #[arg(short, long, default_value_t = 4)]
    depth: u32,

    /// Print the node count under each root move
    #[arg(long)]
    divide: bool,

    /// Also tally captures, en passant, promotions, checks and mates
    #[arg(long)]
    detailed: bool,

    /// Run the built-in reference positions up to --depth instead
    #[arg(long)]
    suite: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every count matched (always true outside --suite)
fn run(args: &Args) -> RulesResult<bool> {
    if args.suite {
        let (passed, total) = run_all_tests(Some(args.depth))?;
        println!("{}/{} positions passed", passed, total);
        return Ok(passed == total);
    }

    let mut position = Position::from_fen(&args.fen)?;
    println!("{}", position.board());

    let start_time = Instant::now();
    if args.divide {
        let divide = perft_divide(&mut position, args.depth)?;
        for (mv, nodes) in &divide {
            println!("{}: {}", mv, nodes);
        }
        let total: u64 = divide.iter().map(|(_, nodes)| nodes).sum();
        println!("\nNodes searched: {}", total);
    } else if args.detailed {
        let result = perft_detailed(&mut position, args.depth)?;
        println!("Depth {}: {} nodes", args.depth, result.nodes);
        println!("  captures:   {}", result.captures);
        println!("  en passant: {}", result.en_passant);
        println!("  promotions: {}", result.promotions);
        println!("  checks:     {}", result.checks);
        println!("  checkmates: {}", result.checkmates);
    } else {
        let nodes = perft(&mut position, args.depth)?;
        println!("Depth {}: {} nodes", args.depth, nodes);
    }
    println!("Time: {:.3}s", start_time.elapsed().as_secs_f64());

    Ok(true)
}
