// game/mod.rs

pub mod book;
pub mod evaluation;
pub mod search;

use crate::rules::{Move, RulesEngine};
use shakmaty::fen::{Fen, ParseFenError};
use shakmaty::uci::{ParseUciMoveError, UciMove};
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Piece, Position, Square};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid FEN: {0}")]
    InvalidFen(#[from] ParseFenError),
    #[error("illegal position: {0}")]
    IllegalPosition(String),
    #[error("invalid UCI move: {0}")]
    InvalidMove(#[from] ParseUciMoveError),
    #[error("illegal move {0} in this position")]
    IllegalMove(String),
}

/// A `shakmaty` position with reversible move application and repetition
/// tracking.
///
/// `push` remembers the previous position, so `pop` restores it exactly.
#[derive(Clone, Debug)]
pub struct GameBoard {
    pos: Chess,
    history: Vec<Chess>,
    // Position keys from the root position up to and including the current one.
    keys: Vec<u64>,
}

impl Default for GameBoard {
    fn default() -> Self {
        Self::from_position(Chess::default())
    }
}

impl GameBoard {
    pub fn from_position(pos: Chess) -> Self {
        let key = hash_position(&pos);
        Self {
            pos,
            history: Vec::new(),
            keys: vec![key],
        }
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let fen: Fen = fen.trim().parse()?;
        let pos: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| BoardError::IllegalPosition(e.to_string()))?;
        Ok(Self::from_position(pos))
    }

    pub fn position(&self) -> &Chess {
        &self.pos
    }

    pub fn fen(&self) -> String {
        Fen::from_position(&self.pos, EnPassantMode::Legal).to_string()
    }

    /// Number of moves pushed since construction.
    pub fn ply(&self) -> usize {
        self.history.len()
    }

    /// Parses and plays a UCI move, rejecting anything not legal here.
    pub fn try_push(&mut self, uci: &str) -> Result<Move, BoardError> {
        let uci: UciMove = uci.trim().parse()?;
        let m = uci
            .to_move(&self.pos)
            .map_err(|_| BoardError::IllegalMove(uci.to_string()))?;
        let mv = convert_move(&m).ok_or_else(|| BoardError::IllegalMove(uci.to_string()))?;
        self.play(m);
        Ok(mv)
    }

    fn play(&mut self, m: shakmaty::Move) {
        self.history.push(self.pos.clone());
        self.pos.play_unchecked(m);
        self.keys.push(hash_position(&self.pos));
    }

    fn repetitions(&self) -> usize {
        let current = hash_position(&self.pos);
        // Positions before the last capture or pawn move cannot recur.
        let window = (self.pos.halfmoves() as usize + 1).min(self.keys.len());
        self.keys[self.keys.len() - window..]
            .iter()
            .filter(|&&key| key == current)
            .count()
    }
}

fn hash_position(pos: &Chess) -> u64 {
    pos.zobrist_hash::<Zobrist64>(EnPassantMode::Legal).0
}

fn convert_move(m: &shakmaty::Move) -> Option<Move> {
    match m.to_uci(CastlingMode::Standard) {
        UciMove::Normal { from, to, promotion } => Some(Move { from, to, promotion }),
        _ => None,
    }
}

impl RulesEngine for GameBoard {
    fn turn(&self) -> Color {
        self.pos.turn()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pos.board().piece_at(square)
    }

    fn legal_moves(&self) -> Vec<Move> {
        self.pos.legal_moves().iter().filter_map(convert_move).collect()
    }

    fn push(&mut self, mv: Move) {
        let uci = UciMove::Normal {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
        };
        match uci.to_move(&self.pos) {
            Ok(m) => self.play(m),
            Err(_) => panic!("illegal move {mv} pushed in {}", self.fen()),
        }
    }

    fn pop(&mut self) {
        let previous = self.history.pop().expect("pop called without a matching push");
        self.keys.pop();
        self.pos = previous;
    }

    fn is_check(&self) -> bool {
        self.pos.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.pos.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.pos.is_stalemate()
    }

    fn is_insufficient_material(&self) -> bool {
        self.pos.is_insufficient_material()
    }

    fn can_claim_draw(&self) -> bool {
        self.pos.halfmoves() >= 100 || self.repetitions() >= 3
    }

    fn is_game_over(&self) -> bool {
        self.pos.is_game_over() || self.pos.halfmoves() >= 150 || self.repetitions() >= 5
    }

    fn position_hash(&self) -> u64 {
        hash_position(&self.pos)
    }
}
