// src/engine.rs

use crate::config::EngineConfig;
use crate::game::book::OpeningBook;
use crate::game::search::tt::{TTStats, TranspositionTable};
use crate::game::search::Searcher;
use crate::rules::{Move, RulesEngine};
use crate::Score;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::info;

/// Telemetry for a single `select_move` call.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SearchInfo {
    pub nodes_visited: u64,
    pub elapsed: Duration,
    pub resolved_via_book: bool,
    /// Root score on the White-positive scale; `None` for book moves.
    pub score: Option<Score>,
}

/// Move selection: the opening book first, then alpha-beta search.
///
/// Owns its transposition table. Run one engine per concurrent search.
pub struct Engine {
    config: EngineConfig,
    book: OpeningBook,
    searcher: Searcher,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let book = match &config.book_path {
            Some(path) => OpeningBook::load(path, config.book.clone()),
            None => OpeningBook::disabled(config.book.clone()),
        };
        Self::with_book(config, book)
    }

    pub fn with_book(config: EngineConfig, book: OpeningBook) -> Self {
        let searcher = Searcher::new(
            TranspositionTable::new(config.tt_size_mb),
            config.piece_values,
            config.quiescence_depth,
        );
        Self {
            config,
            book,
            searcher,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn book(&self) -> &OpeningBook {
        &self.book
    }

    pub fn tt_stats(&self) -> TTStats {
        self.searcher.tt().stats()
    }

    /// Forgets everything learned in the previous game.
    pub fn new_game(&mut self) {
        self.searcher.tt_mut().clear();
    }

    /// Chooses a move for the side to move.
    ///
    /// # Panics
    ///
    /// If the side to move has no legal moves.
    pub fn select_move<B: RulesEngine>(&mut self, depth: u8, board: &mut B) -> (Move, SearchInfo) {
        self.searcher.reset_nodes();
        let start = Instant::now();
        assert!(
            !board.legal_moves().is_empty(),
            "select_move called in a position without legal moves"
        );

        if let Some(mv) = self.book.lookup(board) {
            let info = SearchInfo {
                nodes_visited: 0,
                elapsed: start.elapsed(),
                resolved_via_book: true,
                score: None,
            };
            info!(%mv, elapsed = ?info.elapsed, "book move selected");
            return (mv, info);
        }

        let (mv, score) = self.searcher.root_search(depth, board);
        let info = SearchInfo {
            nodes_visited: self.searcher.nodes(),
            elapsed: start.elapsed(),
            resolved_via_book: false,
            score: Some(score),
        };

        let stats = self.tt_stats();
        info!(
            %mv,
            depth,
            score,
            nodes = info.nodes_visited,
            elapsed = ?info.elapsed,
            tt_size = stats.size,
            tt_hit_rate = stats.hit_rate,
            tt_collisions = stats.collisions,
            "search complete"
        );
        (mv, info)
    }
}
