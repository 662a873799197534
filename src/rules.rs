// src/rules.rs

//! The capability interface the search core consumes from a chess rules engine.
//!
//! Search, ordering, evaluation and the opening book are all generic over
//! [`RulesEngine`]; none of them know which concrete board sits behind it.

use shakmaty::{Color, Piece, Role, Square};
use std::fmt;

/// A move as origin, destination and optional promotion piece.
///
/// Castling is written as the king's two-square move (`e1g1`), matching UCI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Role>,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to, promotion: None }
    }

    pub const fn with_promotion(from: Square, to: Square, role: Role) -> Self {
        Self { from, to, promotion: Some(role) }
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(role) = self.promotion {
            write!(f, "{}", role.char())?;
        }
        Ok(())
    }
}

/// Board state plus the rules that act on it.
///
/// `push`/`pop` must be exact inverses: after `pop` the board is identical to
/// what it was before the matching `push`. Moves handed to `push` must come
/// from `legal_moves` of the current position.
pub trait RulesEngine {
    fn turn(&self) -> Color;

    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// Legal moves in the rules engine's own enumeration order.
    fn legal_moves(&self) -> Vec<Move>;

    fn push(&mut self, mv: Move);

    fn pop(&mut self);

    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    fn is_insufficient_material(&self) -> bool;

    /// Threefold repetition or the fifty-move rule.
    fn can_claim_draw(&self) -> bool;

    /// Checkmate, stalemate, insufficient material or an automatic draw.
    fn is_game_over(&self) -> bool;

    /// Polyglot-compatible Zobrist key of the current position.
    fn position_hash(&self) -> u64;

    fn is_en_passant(&self, mv: Move) -> bool {
        match self.piece_at(mv.from) {
            Some(piece) if piece.role == Role::Pawn => {
                mv.from.file() != mv.to.file() && self.piece_at(mv.to).is_none()
            }
            _ => false,
        }
    }

    fn is_capture(&self, mv: Move) -> bool {
        let turn = self.turn();
        self.piece_at(mv.to).is_some_and(|p| p.color != turn) || self.is_en_passant(mv)
    }
}
