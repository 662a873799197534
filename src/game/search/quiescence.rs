// src/game/search/quiescence.rs

//! Capture-only search at the horizon, so a position is never scored
//! statically while material is about to change hands.

use super::{mate_adjust, ordering};
use crate::constants::MATE_SCORE;
use crate::game::evaluation::{self, PieceValues};
use crate::rules::RulesEngine;
use crate::Score;
use shakmaty::Color;

/// Quiescence search on the White-positive scale.
///
/// `alpha`/`beta` bound the score from White's point of view, like the rest
/// of the minimax search. Returns the score and the number of nodes visited.
pub fn quiesce<B: RulesEngine>(
    board: &mut B,
    alpha: Score,
    beta: Score,
    max_extra_depth: u8,
    values: &PieceValues,
) -> (Score, u64) {
    match board.turn() {
        Color::White => search(board, alpha, beta, max_extra_depth, values),
        Color::Black => {
            let (score, nodes) = search(board, -beta, -alpha, max_extra_depth, values);
            (-score, nodes)
        }
    }
}

// Negamax: scores are from the side to move's point of view.
fn search<B: RulesEngine>(
    board: &mut B,
    mut alpha: Score,
    beta: Score,
    depth: u8,
    values: &PieceValues,
) -> (Score, u64) {
    let mut nodes = 1;

    if board.is_checkmate() {
        return (-MATE_SCORE, nodes);
    }

    let standing_pat = match board.turn() {
        Color::White => evaluation::evaluate(board, values),
        Color::Black => -evaluation::evaluate(board, values),
    };
    if depth == 0 {
        return (standing_pat, nodes);
    }

    if standing_pat >= beta {
        return (beta, nodes);
    }
    if alpha < standing_pat {
        alpha = standing_pat;
    }

    let captures: Vec<_> = ordering::order_moves(board, values)
        .into_iter()
        .filter(|&m| board.is_capture(m))
        .collect();

    for m in captures {
        board.push(m);
        let (score, child_nodes) = search(board, -beta, -alpha, depth - 1, values);
        board.pop();
        nodes += child_nodes;

        let score = mate_adjust(-score);
        if score >= beta {
            return (beta, nodes);
        }
        if score > alpha {
            alpha = score;
        }
    }

    (alpha, nodes)
}
