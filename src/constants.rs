use crate::Score;

// --- Piece values ---
pub const PAWN_VALUE: Score = 100;
pub const KNIGHT_VALUE: Score = 320;
pub const BISHOP_VALUE: Score = 330;
pub const ROOK_VALUE: Score = 500;
pub const QUEEN_VALUE: Score = 900;
// Both kings are always on the board, so this cancels out of the material sum.
pub const KING_VALUE: Score = 20_000;

// Search
pub const MATE_SCORE: Score = 1_000_000_000;
pub const MATE_THRESHOLD: Score = 999_000_000;
pub const INFINITY: Score = 2_000_000_000;
pub const DEFAULT_SEARCH_DEPTH: u8 = 3;
pub const DEFAULT_QUIESCENCE_DEPTH: u8 = 4;

// Transposition table
pub const DEFAULT_TT_SIZE_MB: usize = 64;
pub const TT_ENTRY_SIZE: usize = 32; // approximate bytes per entry

// Opening book
pub const DEFAULT_BOOK_MIN_WEIGHT: u16 = 10;
pub const POLYGLOT_ENTRY_SIZE: usize = 16;
