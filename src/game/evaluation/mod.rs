//! Evaluation of a chess position.

pub mod pst;

use crate::constants::{
    BISHOP_VALUE, KING_VALUE, KNIGHT_VALUE, PAWN_VALUE, QUEEN_VALUE, ROOK_VALUE,
};
use crate::rules::RulesEngine;
use crate::Score;
use serde::{Deserialize, Serialize};
use shakmaty::{Color, Role, Square};

/// Material value of each piece type in centipawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceValues {
    pub pawn: Score,
    pub knight: Score,
    pub bishop: Score,
    pub rook: Score,
    pub queen: Score,
    pub king: Score,
}

impl Default for PieceValues {
    fn default() -> Self {
        Self {
            pawn: PAWN_VALUE,
            knight: KNIGHT_VALUE,
            bishop: BISHOP_VALUE,
            rook: ROOK_VALUE,
            queen: QUEEN_VALUE,
            king: KING_VALUE,
        }
    }
}

impl PieceValues {
    pub fn of(&self, role: Role) -> Score {
        match role {
            Role::Pawn => self.pawn,
            Role::Knight => self.knight,
            Role::Bishop => self.bishop,
            Role::Rook => self.rook,
            Role::Queen => self.queen,
            Role::King => self.king,
        }
    }
}

/// Whether the king tables should switch to their endgame variant.
///
/// Endgame when nobody has a queen, or every side that still has one has at
/// most one minor piece besides it.
pub fn is_endgame<B: RulesEngine>(board: &B) -> bool {
    let mut queens = [0u32; 2];
    let mut minors = [0u32; 2];

    for square in Square::ALL {
        if let Some(piece) = board.piece_at(square) {
            let side = piece.color as usize;
            match piece.role {
                Role::Queen => queens[side] += 1,
                Role::Knight | Role::Bishop => minors[side] += 1,
                _ => {}
            }
        }
    }

    (0..2).all(|side| queens[side] == 0 || minors[side] <= 1)
}

/// Static score of the position: positive favors White, negative favors Black.
///
/// Material plus piece-square bonuses. Pure: reads the board, never mutates it.
pub fn evaluate<B: RulesEngine>(board: &B, values: &PieceValues) -> Score {
    let endgame = is_endgame(board);
    let mut total = 0;

    for square in Square::ALL {
        let Some(piece) = board.piece_at(square) else {
            continue;
        };
        let value = values.of(piece.role) + pst::square_value(piece, square, endgame);
        match piece.color {
            Color::White => total += value,
            Color::Black => total -= value,
        }
    }

    total
}

#[cfg(test)]
pub mod tests;
