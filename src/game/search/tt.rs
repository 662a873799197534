// src/game/search/tt.rs

use crate::constants::TT_ENTRY_SIZE;
use crate::rules::{Move, RulesEngine};
use crate::Score;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// What a stored score says about the true value of the position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    /// The score is the true minimax value.
    Exact,
    /// The true value is at least the score (the search failed high).
    Lower,
    /// The true value is at most the score (the search failed low).
    Upper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub hash: u64,
    pub depth: u8,
    pub score: Score,
    pub bound: Bound,
    pub best_move: Option<Move>,
    pub age: u32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TTStats {
    pub size: usize,
    pub max_size: usize,
    pub hits: u64,
    pub misses: u64,
    pub collisions: u64,
    pub hit_rate: f64,
}

/// Search results keyed by position hash, bounded to a fixed number of entries.
///
/// When full, inserting a new position evicts the entry with the oldest age.
/// Not synchronized: one table per concurrent search.
pub struct TranspositionTable {
    table: HashMap<u64, TTEntry>,
    // (age, hash) of every entry in `table`, oldest first.
    by_age: BTreeSet<(u32, u64)>,
    max_entries: usize,
    current_age: u32,
    hits: u64,
    misses: u64,
    collisions: u64,
}

impl TranspositionTable {
    /// A table sized to roughly `size_mb` megabytes.
    pub fn new(size_mb: usize) -> Self {
        Self::with_entries(size_mb * 1024 * 1024 / TT_ENTRY_SIZE)
    }

    pub fn with_entries(max_entries: usize) -> Self {
        Self {
            table: HashMap::new(),
            by_age: BTreeSet::new(),
            max_entries: max_entries.max(1),
            current_age: 0,
            hits: 0,
            misses: 0,
            collisions: 0,
        }
    }

    /// Marks the start of an independent search; older entries age out.
    pub fn new_search(&mut self) {
        self.current_age = self.current_age.wrapping_add(1);
    }

    pub fn lookup<B: RulesEngine>(&mut self, board: &B) -> Option<TTEntry> {
        self.probe(board.position_hash())
    }

    pub fn probe(&mut self, hash: u64) -> Option<TTEntry> {
        match self.table.get_mut(&hash) {
            Some(entry) => {
                self.hits += 1;
                if entry.age != self.current_age {
                    self.by_age.remove(&(entry.age, hash));
                    self.by_age.insert((self.current_age, hash));
                    entry.age = self.current_age;
                }
                Some(*entry)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn store<B: RulesEngine>(
        &mut self,
        board: &B,
        depth: u8,
        score: Score,
        bound: Bound,
        best_move: Option<Move>,
    ) {
        let hash = board.position_hash();
        self.insert(TTEntry {
            hash,
            depth,
            score,
            bound,
            best_move,
            age: self.current_age,
        });
    }

    pub fn insert(&mut self, entry: TTEntry) {
        if let Some(old_age) = self.table.get(&entry.hash).map(|old| old.age) {
            self.by_age.remove(&(old_age, entry.hash));
        } else if self.table.len() >= self.max_entries {
            self.evict_oldest();
        }
        self.by_age.insert((entry.age, entry.hash));
        self.table.insert(entry.hash, entry);
    }

    fn evict_oldest(&mut self) {
        if let Some((_, hash)) = self.by_age.pop_first() {
            self.table.remove(&hash);
            self.collisions += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn stats(&self) -> TTStats {
        let probes = self.hits + self.misses;
        TTStats {
            size: self.table.len(),
            max_size: self.max_entries,
            hits: self.hits,
            misses: self.misses,
            collisions: self.collisions,
            hit_rate: if probes > 0 { self.hits as f64 / probes as f64 } else { 0.0 },
        }
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.by_age.clear();
        self.hits = 0;
        self.misses = 0;
        self.collisions = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameBoard;

    fn entry(hash: u64, score: Score) -> TTEntry {
        TTEntry {
            hash,
            depth: 1,
            score,
            bound: Bound::Exact,
            best_move: None,
            age: 0,
        }
    }

    #[test]
    fn test_exact_round_trip() {
        let mut tt = TranspositionTable::with_entries(16);
        let board = GameBoard::default();
        let best = board.legal_moves()[0];
        tt.store(&board, 4, 37, Bound::Exact, Some(best));

        let found = tt.lookup(&board).unwrap();
        assert_eq!(found.score, 37);
        assert_eq!(found.depth, 4);
        assert_eq!(found.bound, Bound::Exact);
        assert_eq!(found.best_move, Some(best));
    }

    #[test]
    fn test_store_overwrites_wholesale() {
        let mut tt = TranspositionTable::with_entries(16);
        let board = GameBoard::default();
        tt.store(&board, 4, 37, Bound::Exact, board.legal_moves().first().copied());
        tt.store(&board, 2, -5, Bound::Upper, None);

        let found = tt.lookup(&board).unwrap();
        assert_eq!((found.depth, found.score, found.bound, found.best_move), (2, -5, Bound::Upper, None));
        assert_eq!(tt.len(), 1);
    }

    #[test]
    fn test_hits_and_misses_are_counted() {
        let mut tt = TranspositionTable::with_entries(16);
        assert!(tt.probe(1).is_none());
        tt.insert(entry(1, 0));
        assert!(tt.probe(1).is_some());
        assert!(tt.probe(1).is_some());

        let stats = tt.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert!((stats.hit_rate - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_oldest_entry_is_evicted() {
        let mut tt = TranspositionTable::with_entries(2);
        tt.insert(entry(1, 1));
        tt.new_search();
        tt.insert(TTEntry { age: 1, ..entry(2, 2) });
        tt.insert(TTEntry { age: 1, ..entry(3, 3) });

        assert_eq!(tt.len(), 2);
        assert!(tt.probe(1).is_none());
        assert!(tt.probe(2).is_some());
        assert!(tt.probe(3).is_some());
        assert_eq!(tt.stats().collisions, 1);
    }

    #[test]
    fn test_lookup_refreshes_age() {
        let mut tt = TranspositionTable::with_entries(2);
        tt.insert(entry(1, 1));
        tt.insert(entry(2, 2));
        tt.new_search();
        // Touching entry 1 makes entry 2 the oldest.
        assert!(tt.probe(1).is_some());
        tt.insert(TTEntry { age: 1, ..entry(3, 3) });

        assert!(tt.probe(1).is_some());
        assert!(tt.probe(2).is_none());
    }

    #[test]
    fn test_eviction_follows_age_order() {
        let mut tt = TranspositionTable::with_entries(3);
        for hash in [10, 20, 30] {
            tt.insert(TTEntry { age: tt.current_age, ..entry(hash, 0) });
            tt.new_search();
        }
        // Refreshing 10 leaves 20 as the oldest, then 30.
        assert!(tt.probe(10).is_some());
        tt.insert(TTEntry { age: tt.current_age, ..entry(40, 0) });
        tt.insert(TTEntry { age: tt.current_age, ..entry(50, 0) });

        assert_eq!(tt.len(), 3);
        assert_eq!(tt.by_age.len(), 3);
        for (hash, kept) in [(10, true), (20, false), (30, false), (40, true), (50, true)] {
            assert_eq!(tt.table.contains_key(&hash), kept, "entry {hash}");
        }
        assert_eq!(tt.stats().collisions, 2);
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let mut tt = TranspositionTable::with_entries(2);
        tt.insert(entry(1, 1));
        tt.insert(entry(2, 2));
        tt.insert(entry(2, 5));
        assert_eq!(tt.len(), 2);
        assert_eq!(tt.by_age.len(), 2);
        assert_eq!(tt.stats().collisions, 0);
    }

    #[test]
    fn test_size_from_megabytes() {
        let tt = TranspositionTable::new(1);
        assert_eq!(tt.stats().max_size, 1024 * 1024 / TT_ENTRY_SIZE);
    }

    #[test]
    fn test_clear() {
        let mut tt = TranspositionTable::with_entries(4);
        tt.insert(entry(1, 1));
        let _ = tt.probe(1);
        tt.clear();
        assert!(tt.is_empty());
        assert!(tt.by_age.is_empty());
        assert_eq!(tt.stats(), TTStats { max_size: 4, ..TTStats::default() });
    }
}
