//! Unit tests for the static evaluator.

use super::*;
use crate::game::GameBoard;
use shakmaty::Piece;

fn board(fen: &str) -> GameBoard {
    GameBoard::from_fen(fen).unwrap()
}

#[test]
fn test_evaluate_starting_position() {
    let pos = GameBoard::default();
    assert_eq!(evaluate(&pos, &PieceValues::default()), 0);
}

#[test]
fn test_evaluate_white_advantage() {
    let pos = board("4k3/8/8/8/8/8/8/4K2Q w - - 0 1");
    let score = evaluate(&pos, &PieceValues::default());
    assert!(score > 850);
}

#[test]
fn test_evaluate_black_advantage() {
    let pos = board("4k2q/8/8/8/8/8/8/4K3 w - - 0 1");
    let score = evaluate(&pos, &PieceValues::default());
    assert!(score < -850);
}

#[test]
fn test_score_does_not_depend_on_side_to_move() {
    let white = board("4k2q/8/8/8/8/8/8/4K3 w - - 0 1");
    let black = board("4k2q/8/8/8/8/8/8/4K3 b - - 0 1");
    let values = PieceValues::default();
    assert_eq!(evaluate(&white, &values), evaluate(&black, &values));
}

#[test]
fn test_mirrored_position_negates_score() {
    let pos = board("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4");
    let mirrored = board("rnbqk2r/pppp1ppp/5n2/2b1p3/4P3/2N2N2/PPPP1PPP/R1BQKB1R b KQkq - 4 4");
    let values = PieceValues::default();
    assert_eq!(evaluate(&pos, &values), -evaluate(&mirrored, &values));
}

#[test]
fn test_pawn_table_rewards_advancement() {
    let values = PieceValues::default();
    let home = evaluate(&board("k7/8/8/8/8/8/3P4/4K3 w - - 0 1"), &values);
    let advanced = evaluate(&board("k7/3P4/8/8/8/8/8/4K3 w - - 0 1"), &values);
    assert!(advanced > home);
}

#[test]
fn test_custom_piece_values() {
    let pos = board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    let cheap = PieceValues { rook: 100, ..PieceValues::default() };
    let default_score = evaluate(&pos, &PieceValues::default());
    assert_eq!(default_score - evaluate(&pos, &cheap), 400);
}

#[test]
fn test_endgame_without_queens() {
    assert!(is_endgame(&board("4k3/pppppppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQ - 0 1")));
}

#[test]
fn test_not_endgame_at_start() {
    assert!(!is_endgame(&GameBoard::default()));
}

#[test]
fn test_endgame_with_queen_and_one_minor() {
    assert!(is_endgame(&board("3qk1n1/8/8/8/8/8/8/3QK1N1 w - - 0 1")));
    assert!(!is_endgame(&board("3qkbn1/8/8/8/8/8/8/3QK1N1 w - - 0 1")));
}

#[test]
fn test_king_table_switches_in_endgame() {
    let values = PieceValues::default();
    // Centralised white king against a cornered black king: only the
    // endgame table rewards the centre.
    let score = evaluate(&board("7k/8/8/8/3K4/8/8/8 w - - 0 1"), &values);
    assert!(score > 0);
    let middlegame = evaluate(&board("qnb4k/8/8/8/3K4/8/8/QNB5 w - - 0 1"), &values);
    assert!(middlegame < 0);
}

#[test]
fn test_evaluate_does_not_mutate_board() {
    let pos = board("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3");
    let before = pos.fen();
    let _ = evaluate(&pos, &PieceValues::default());
    assert_eq!(pos.fen(), before);
}

#[test]
fn test_square_values_by_rank() {
    let white_queen = Piece { color: Color::White, role: Role::Queen };
    let black_queen = Piece { color: Color::Black, role: Role::Queen };
    assert_eq!(pst::square_value(white_queen, Square::B3, false), 0);
    assert_eq!(pst::square_value(white_queen, Square::B6, false), 5);
    assert_eq!(pst::square_value(white_queen, Square::C7, false), 5);
    assert_eq!(pst::square_value(black_queen, Square::B6, false), 0);
    assert_eq!(pst::square_value(black_queen, Square::B3, false), 5);

    let white_king = Piece { color: Color::White, role: Role::King };
    assert_eq!(pst::square_value(white_king, Square::A4, false), -20);
    assert_eq!(pst::square_value(white_king, Square::G1, false), 30);
    assert_eq!(pst::square_value(white_king, Square::A1, true), -50);
    assert_eq!(pst::square_value(white_king, Square::H1, true), -50);
}
