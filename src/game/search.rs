// src/game/search.rs

pub mod ordering;
pub mod quiescence;
pub mod tt;

use crate::constants::{INFINITY, MATE_SCORE, MATE_THRESHOLD};
use crate::game::evaluation::PieceValues;
use crate::rules::{Move, RulesEngine};
use crate::Score;
use shakmaty::Color;
use tt::{Bound, TranspositionTable};

/// Moves a mate score one ply closer to zero as it propagates upward, so a
/// mate found deeper in the tree ranks below a faster one.
pub fn mate_adjust(score: Score) -> Score {
    if score > MATE_THRESHOLD {
        score - 1
    } else if score < -MATE_THRESHOLD {
        score + 1
    } else {
        score
    }
}

/// Depth-limited minimax with alpha-beta pruning over a mutable board.
///
/// White maximizes and Black minimizes; every score is on the evaluator's
/// White-positive scale. The board is mutated with `push`/`pop` pairs and is
/// back in its original state whenever a search call returns.
pub struct Searcher {
    tt: TranspositionTable,
    values: PieceValues,
    quiescence_depth: u8,
    nodes: u64,
}

impl Searcher {
    pub fn new(tt: TranspositionTable, values: PieceValues, quiescence_depth: u8) -> Self {
        Self {
            tt,
            values,
            quiescence_depth,
            nodes: 0,
        }
    }

    /// Nodes visited since the last `reset_nodes`, quiescence nodes included.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn reset_nodes(&mut self) {
        self.nodes = 0;
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn tt_mut(&mut self) -> &mut TranspositionTable {
        &mut self.tt
    }

    pub fn search_root<B: RulesEngine>(&mut self, depth: u8, board: &mut B) -> Move {
        self.root_search(depth, board).0
    }

    /// Best move for the side to move and its score.
    ///
    /// The first ordered move is the default; a later move with an equal
    /// score replaces it. A move into a claimable draw scores exactly zero.
    ///
    /// # Panics
    ///
    /// If the side to move has no legal moves.
    pub fn root_search<B: RulesEngine>(&mut self, depth: u8, board: &mut B) -> (Move, Score) {
        let depth = depth.max(1);
        let maximize = board.turn() == Color::White;
        self.tt.new_search();

        let moves = ordering::order_moves(board, &self.values);
        assert!(!moves.is_empty(), "root search requested in a position without legal moves");

        let mut best_move = moves[0];
        let mut best_value = if maximize { -INFINITY } else { INFINITY };

        for mv in moves {
            board.push(mv);
            let value = if board.can_claim_draw() {
                0
            } else {
                mate_adjust(self.search(depth - 1, board, -INFINITY, INFINITY, !maximize))
            };
            board.pop();

            if (maximize && value >= best_value) || (!maximize && value <= best_value) {
                best_value = value;
                best_move = mv;
            }
        }

        (best_move, best_value)
    }

    pub fn search<B: RulesEngine>(
        &mut self,
        depth: u8,
        board: &mut B,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Score {
        self.nodes += 1;
        let alpha_orig = alpha;
        let beta_orig = beta;

        let entry = self.tt.lookup(board);
        if let Some(entry) = entry.filter(|e| e.depth >= depth) {
            match entry.bound {
                Bound::Exact => return entry.score,
                Bound::Lower if entry.score >= beta => return entry.score,
                Bound::Upper if entry.score <= alpha => return entry.score,
                _ => {}
            }
        }

        if board.is_checkmate() {
            return if maximizing { -MATE_SCORE } else { MATE_SCORE };
        }
        if board.is_game_over() {
            return 0;
        }

        if depth == 0 {
            let (score, nodes) =
                quiescence::quiesce(board, alpha, beta, self.quiescence_depth, &self.values);
            self.nodes += nodes;
            return score;
        }

        let mut moves = ordering::order_moves(board, &self.values);
        if let Some(tt_move) = entry.and_then(|e| e.best_move) {
            if let Some(index) = moves.iter().position(|&m| m == tt_move) {
                moves[..=index].rotate_right(1);
            }
        }

        let mut best_move = None;
        let mut best_score = if maximizing { -INFINITY } else { INFINITY };

        for mv in moves {
            board.push(mv);
            let score = mate_adjust(self.search(depth - 1, board, alpha, beta, !maximizing));
            board.pop();

            if maximizing {
                if score > best_score || best_move.is_none() {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score || best_move.is_none() {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best_score);
            }

            if beta <= alpha {
                break;
            }
        }

        let bound = if best_score <= alpha_orig {
            Bound::Upper
        } else if best_score >= beta_orig {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(board, depth, best_score, bound, best_move);

        best_score
    }
}
