// src/lib.rs

//! A chess move-selection core: static evaluation, move ordering, alpha-beta
//! search with quiescence and a transposition table, and a Polyglot opening
//! book in front of it all.

pub mod config;
pub mod constants;
pub mod engine;
pub mod game;
pub mod rules;

/// Centipawn score, positive when White stands better.
pub type Score = i32;

pub use config::EngineConfig;
pub use engine::{Engine, SearchInfo};
pub use game::GameBoard;
pub use rules::{Move, RulesEngine};
