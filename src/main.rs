// src/main.rs

use chess_engine_core::config::{self, EngineConfig};
use chess_engine_core::{Engine, GameBoard, RulesEngine};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Starting position in FEN; defaults to the standard initial position
    #[arg(long)]
    fen: Option<String>,

    /// UCI moves to play from the starting position before searching
    #[arg(long, num_args = 1.., value_delimiter = ' ')]
    moves: Vec<String>,

    /// Search depth in plies; overrides the profile
    #[arg(long)]
    depth: Option<u8>,

    /// Path to a Polyglot opening book; overrides the profile
    #[arg(long)]
    book: Option<PathBuf>,

    /// Name of a saved configuration profile
    #[arg(long)]
    profile: Option<String>,

    /// Print the move and telemetry as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    std::panic::set_hook(Box::new(tracing_panic::panic_hook));

    let args = Args::parse();

    let mut engine_config = match &args.profile {
        Some(name) => config::load_profile(name)?,
        None => EngineConfig::default(),
    };
    if let Some(depth) = args.depth {
        engine_config.search_depth = depth;
    }
    if let Some(book) = args.book {
        engine_config.book_path = Some(book);
    }

    let mut board = match &args.fen {
        Some(fen) => GameBoard::from_fen(fen)?,
        None => GameBoard::default(),
    };
    for uci in &args.moves {
        board.try_push(uci)?;
    }

    if board.legal_moves().is_empty() {
        return Err(format!("no legal moves in {}", board.fen()).into());
    }

    let depth = engine_config.search_depth;
    info!(fen = %board.fen(), depth, "selecting move");
    let mut engine = Engine::new(engine_config);
    let (mv, search_info) = engine.select_move(depth, &mut board);

    if args.json {
        let report = serde_json::json!({
            "move": mv.to_string(),
            "info": search_info,
            "tt": engine.tt_stats(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("bestmove {mv}");
        match search_info.score {
            Some(score) => println!(
                "score {score} nodes {} time {:?}",
                search_info.nodes_visited, search_info.elapsed
            ),
            None => println!("book move ({:?})", search_info.elapsed),
        }
    }

    Ok(())
}
