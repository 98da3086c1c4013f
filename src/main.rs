use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use magic_chess::board::{attack_tables, START_FEN};
use magic_chess::{Color, Engine, EngineConfig, PieceKind, Position, Square};

#[derive(Parser, Debug)]
#[command(author, version, about = "Magic bitboard chess engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Count leaf nodes of the legal move tree
    Perft {
        #[command(flatten)]
        position: PositionArgs,
        #[arg(short, long, default_value_t = 4)]
        depth: u32,
    },
    /// Leaf counts for each root move
    Divide {
        #[command(flatten)]
        position: PositionArgs,
        #[arg(short, long, default_value_t = 3)]
        depth: u32,
    },
    /// Search for the best move
    Search {
        #[command(flatten)]
        position: PositionArgs,
        /// Maximum depth
        #[arg(short, long, default_value_t = 64)]
        depth: u32,
        /// Time budget in milliseconds, 0 for none
        #[arg(short, long, default_value_t = 1000)]
        time: u64,
        #[arg(long, default_value_t = 1)]
        threads: usize,
        /// Extend the horizon with a capture search
        #[arg(short, long)]
        quiescence: bool,
    },
}

#[derive(Args, Debug)]
struct PositionArgs {
    /// FEN or board-only FEN; the starting position if omitted
    #[arg(long)]
    fen: Option<String>,
    /// Moves to play first, in coordinate notation (e2e4 e7e8q)
    #[arg(long, num_args = 1..)]
    moves: Vec<String>,
}

/// Split `e7e8q` into squares and promotion kind
fn parse_coordinate_move(text: &str) -> Result<(Square, Square, PieceKind)> {
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        bail!("invalid move '{text}', expected e.g. e2e4 or e7e8q");
    }
    let from: Square = text[0..2].parse()?;
    let to: Square = text[2..4].parse()?;
    let promotion = match text.as_bytes().get(4) {
        None | Some(b'q') => PieceKind::Queen,
        Some(b'r') => PieceKind::Rook,
        Some(b'b') => PieceKind::Bishop,
        Some(b'n') => PieceKind::Knight,
        Some(_) => bail!("invalid promotion piece in '{text}'"),
    };
    Ok((from, to, promotion))
}

/// Apply the position arguments to `engine`
fn setup(engine: &mut Engine, args: &PositionArgs) -> Result<()> {
    engine.set_position_from_fen(args.fen.as_deref().unwrap_or(START_FEN))?;
    for text in &args.moves {
        let (from, to, promotion) = parse_coordinate_move(text)?;
        let side = engine.side_to_move();
        engine
            .apply_move_promoting(side, from, to, promotion)
            .with_context(|| format!("applying {text}"))?;
    }
    Ok(())
}

fn resolve(args: &PositionArgs) -> Result<(Position, Color)> {
    let mut engine = Engine::new(EngineConfig::default())?;
    setup(&mut engine, args)?;
    Ok((*engine.position(), engine.side_to_move()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    attack_tables::init()?;
    info!("attack tables ready in {:?}", start.elapsed());

    match cli.command {
        Command::Perft { position, depth } => {
            let (pos, side) = resolve(&position)?;
            let start = Instant::now();
            let nodes = pos.perft(side, depth);
            let elapsed = start.elapsed();
            println!("perft({depth}) = {nodes} in {elapsed:?}");
        }
        Command::Divide { position, depth } => {
            let (pos, side) = resolve(&position)?;
            let split = pos.divide(side, depth);
            let total: u64 = split.iter().map(|(_, count)| count).sum();
            for (mv, count) in &split {
                println!("{mv}: {count}");
            }
            println!("\n{} moves, {total} nodes", split.len());
        }
        Command::Search {
            position,
            depth,
            time,
            threads,
            quiescence,
        } => {
            let config = EngineConfig::default()
                .with_max_depth(depth)
                .with_time_budget_ms(time)
                .with_threads(threads)
                .with_quiescence(quiescence);
            let mut engine = Engine::new(config)?;
            setup(&mut engine, &position)?;
            let side = engine.side_to_move();
            engine.start_search(side)?;

            let mut last_depth = 0;
            loop {
                let info = engine.search_info();
                if info.depth != last_depth {
                    last_depth = info.depth;
                    println!(
                        "info depth {} score cp {} nodes {} nps {} pv {}",
                        info.depth, info.score_cp, info.nodes, info.nps, info.pv
                    );
                }
                if info.done {
                    break;
                }
                thread::sleep(Duration::from_millis(10));
            }
            engine.wait_for_search();
            match engine.best_move() {
                Ok(mv) => println!("bestmove {mv}"),
                Err(err) => println!("bestmove (none): {err}"),
            }
        }
    }
    Ok(())
}
