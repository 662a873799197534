// src/game/search/ordering.rs

//! Heuristic move ordering: the mover's most promising moves come first so
//! alpha-beta finds its cutoffs early.

use crate::constants::INFINITY;
use crate::game::evaluation::{is_endgame, pst, PieceValues};
use crate::rules::{Move, RulesEngine};
use crate::Score;
use shakmaty::{Color, Role};
use std::cmp::Reverse;

/// How good a move looks, on the evaluator's White-positive scale.
///
/// Promotions get the most extreme value for the mover. Captures add the
/// value of the captured piece minus the value of the capturing piece, and
/// every move adds the piece-square delta of the moving piece.
pub fn move_value<B: RulesEngine>(board: &B, mv: Move, endgame: bool, values: &PieceValues) -> Score {
    let turn = board.turn();
    if mv.is_promotion() {
        return match turn {
            Color::White => INFINITY,
            Color::Black => -INFINITY,
        };
    }

    let Some(piece) = board.piece_at(mv.from) else {
        return 0;
    };

    let position_change =
        pst::square_value(piece, mv.to, endgame) - pst::square_value(piece, mv.from, endgame);

    let capture_value = if board.is_en_passant(mv) {
        values.of(Role::Pawn)
    } else if let Some(captured) = board.piece_at(mv.to).filter(|p| p.color != turn) {
        values.of(captured.role) - values.of(piece.role)
    } else {
        0
    };

    let value = capture_value + position_change;
    match turn {
        Color::White => value,
        Color::Black => -value,
    }
}

/// Legal moves sorted best-first for the side to move.
///
/// Descending values for White, ascending for Black. The sort is stable, so
/// ties keep the rules engine's enumeration order.
pub fn order_moves<B: RulesEngine>(board: &B, values: &PieceValues) -> Vec<Move> {
    let endgame = is_endgame(board);
    let mut moves = board.legal_moves();
    match board.turn() {
        Color::White => moves.sort_by_cached_key(|&mv| Reverse(move_value(board, mv, endgame, values))),
        Color::Black => moves.sort_by_cached_key(|&mv| move_value(board, mv, endgame, values)),
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBoard;

    fn ordered(fen: &str) -> Vec<String> {
        let board = GameBoard::from_fen(fen).unwrap();
        order_moves(&board, &PieceValues::default())
            .into_iter()
            .map(|m| m.to_string())
            .collect()
    }

    #[test]
    fn test_promotions_come_first_for_white() {
        let moves = ordered("4k3/1P6/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(moves[..4].iter().all(|m| m.starts_with("b7b8")));
    }

    #[test]
    fn test_promotions_come_first_for_black() {
        let moves = ordered("r3k3/8/8/8/8/8/1p6/4K3 b q - 0 1");
        assert!(moves[..4].iter().all(|m| m.starts_with("b2b1")));
    }

    #[test]
    fn test_weak_piece_capturing_strong_piece_ranks_high() {
        // Pawn takes queen beats queen takes pawn.
        let moves = ordered("4k3/8/8/3q4/4P3/8/3Q4/4K3 w - - 0 1");
        let pxq = moves.iter().position(|m| m == "e4d5").unwrap();
        let qxq = moves.iter().position(|m| m == "d2d5").unwrap();
        assert_eq!(pxq, 0);
        assert!(pxq < qxq);
    }

    #[test]
    fn test_black_captures_ordered_for_black() {
        let moves = ordered("4k3/8/8/8/8/4p3/3Q4/4K3 b - - 0 1");
        assert_eq!(moves[0], "e3d2");
    }

    #[test]
    fn test_order_keeps_every_legal_move() {
        let board = GameBoard::default();
        let mut ordered = order_moves(&board, &PieceValues::default());
        let mut legal = board.legal_moves();
        ordered.sort_by_key(|m| m.to_string());
        legal.sort_by_key(|m| m.to_string());
        assert_eq!(ordered, legal);
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        let board = GameBoard::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        let values = PieceValues::default();
        let endgame = is_endgame(&board);
        let legal = board.legal_moves();
        let ordered = order_moves(&board, &values);
        for pair in ordered.windows(2) {
            let a = move_value(&board, pair[0], endgame, &values);
            let b = move_value(&board, pair[1], endgame, &values);
            assert!(a >= b);
            if a == b {
                let ia = legal.iter().position(|m| *m == pair[0]).unwrap();
                let ib = legal.iter().position(|m| *m == pair[1]).unwrap();
                assert!(ia < ib);
            }
        }
    }
}
