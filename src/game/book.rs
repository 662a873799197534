// src/game/book.rs

//! Polyglot opening book.
//!
//! A book file is a sequence of 16-byte big-endian records: position key
//! (u64), move (u16), weight (u16) and a learn field (u32). The whole file is
//! read once into a table keyed by position hash and never changes afterwards.

use crate::constants::{DEFAULT_BOOK_MIN_WEIGHT, POLYGLOT_ENTRY_SIZE};
use crate::rules::{Move, RulesEngine};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use shakmaty::{Role, Square};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum BookError {
    #[error("cannot read opening book: {0}")]
    Io(#[from] io::Error),
    #[error("opening book is {len} bytes, not a whole number of 16-byte entries")]
    Truncated { len: usize },
    #[error("opening book contains no entries")]
    Empty,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookOptions {
    /// Entries lighter than this are never played.
    pub min_weight: u16,
    /// Pick proportionally to weight; otherwise uniformly among eligible moves.
    pub weighted: bool,
}

impl Default for BookOptions {
    fn default() -> Self {
        Self {
            min_weight: DEFAULT_BOOK_MIN_WEIGHT,
            weighted: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BookEntry {
    raw_move: u16,
    weight: u16,
}

pub struct OpeningBook {
    entries: HashMap<u64, Vec<BookEntry>>,
    options: BookOptions,
    enabled: bool,
}

impl OpeningBook {
    /// A book that never has a move.
    pub fn disabled(options: BookOptions) -> Self {
        Self {
            entries: HashMap::new(),
            options,
            enabled: false,
        }
    }

    /// Loads a book, falling back to a disabled one if the file is missing
    /// or malformed.
    pub fn load(path: impl AsRef<Path>, options: BookOptions) -> Self {
        let path = path.as_ref();
        match Self::try_load(path, options.clone()) {
            Ok(book) => {
                info!(path = %path.display(), positions = book.len(), "opening book loaded");
                book
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "opening book disabled");
                Self::disabled(options)
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>, options: BookOptions) -> Result<Self, BookError> {
        let data = fs::read(path)?;
        Self::from_bytes(&data, options)
    }

    pub fn from_bytes(data: &[u8], options: BookOptions) -> Result<Self, BookError> {
        if data.len() % POLYGLOT_ENTRY_SIZE != 0 {
            return Err(BookError::Truncated { len: data.len() });
        }
        if data.is_empty() {
            return Err(BookError::Empty);
        }

        let mut entries: HashMap<u64, Vec<BookEntry>> = HashMap::new();
        for record in data.chunks_exact(POLYGLOT_ENTRY_SIZE) {
            let key = u64::from_be_bytes([
                record[0], record[1], record[2], record[3], record[4], record[5], record[6], record[7],
            ]);
            let raw_move = u16::from_be_bytes([record[8], record[9]]);
            let weight = u16::from_be_bytes([record[10], record[11]]);
            entries.entry(key).or_default().push(BookEntry { raw_move, weight });
        }

        Ok(Self {
            entries,
            options,
            enabled: true,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn options(&self) -> &BookOptions {
        &self.options
    }

    /// Number of distinct positions in the book.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every legal book move for the position with its weight.
    pub fn moves_with_weights<B: RulesEngine>(&self, board: &B) -> Vec<(Move, u16)> {
        let Some(entries) = self.entries.get(&board.position_hash()) else {
            return Vec::new();
        };
        let legal = board.legal_moves();
        entries
            .iter()
            .filter_map(|entry| {
                let mv = decode_move(entry.raw_move, board)?;
                legal.contains(&mv).then_some((mv, entry.weight))
            })
            .collect()
    }

    pub fn is_in_book<B: RulesEngine>(&self, board: &B) -> bool {
        !self.moves_with_weights(board).is_empty()
    }

    pub fn lookup<B: RulesEngine>(&self, board: &B) -> Option<Move> {
        self.lookup_with_rng(board, &mut rand::thread_rng())
    }

    /// Picks a book move using `rng`, or `None` when out of book.
    pub fn lookup_with_rng<B: RulesEngine, R: Rng>(&self, board: &B, rng: &mut R) -> Option<Move> {
        if !self.enabled {
            return None;
        }

        let eligible: Vec<(Move, u16)> = self
            .moves_with_weights(board)
            .into_iter()
            .filter(|&(_, weight)| weight >= self.options.min_weight)
            .collect();
        if eligible.is_empty() {
            return None;
        }

        let total: u32 = eligible.iter().map(|&(_, weight)| u32::from(weight)).sum();
        let choice = if self.options.weighted && total > 0 {
            let pick = rng.gen_range(0..total);
            let mut cumulative = 0;
            eligible.iter().find_map(|&(mv, weight)| {
                cumulative += u32::from(weight);
                (cumulative > pick).then_some(mv)
            })
        } else {
            eligible.choose(rng).map(|&(mv, _)| mv)
        };

        if let Some(mv) = choice {
            debug!(%mv, candidates = eligible.len(), "book move");
        }
        choice
    }
}

/// Decodes a Polyglot move: bits 0-5 target square, 6-11 origin square,
/// 12-14 promotion piece. Castling is stored as king-takes-own-rook.
fn decode_move<B: RulesEngine>(raw: u16, board: &B) -> Option<Move> {
    let to = Square::new(u32::from(raw & 0x3f));
    let from = Square::new(u32::from((raw >> 6) & 0x3f));
    let promotion = match (raw >> 12) & 0x7 {
        0 => None,
        1 => Some(Role::Knight),
        2 => Some(Role::Bishop),
        3 => Some(Role::Rook),
        4 => Some(Role::Queen),
        _ => return None,
    };

    let is_king = board.piece_at(from).is_some_and(|p| p.role == Role::King);
    let to = match (is_king, from, to) {
        (true, Square::E1, Square::H1) => Square::G1,
        (true, Square::E1, Square::A1) => Square::C1,
        (true, Square::E8, Square::H8) => Square::G8,
        (true, Square::E8, Square::A8) => Square::C8,
        _ => to,
    };

    Some(Move { from, to, promotion })
}
