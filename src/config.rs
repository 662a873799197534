// src/config.rs

use crate::constants::{DEFAULT_QUIESCENCE_DEPTH, DEFAULT_SEARCH_DEPTH, DEFAULT_TT_SIZE_MB};
use crate::game::book::BookOptions;
use crate::game::evaluation::PieceValues;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const PROFILES_DIR: &str = "profiles";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search_depth: u8,
    pub quiescence_depth: u8,
    pub tt_size_mb: usize,
    /// Polyglot book file; no path means no book.
    pub book_path: Option<PathBuf>,
    pub book: BookOptions,
    pub piece_values: PieceValues,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: DEFAULT_SEARCH_DEPTH,
            quiescence_depth: DEFAULT_QUIESCENCE_DEPTH,
            tt_size_mb: DEFAULT_TT_SIZE_MB,
            book_path: None,
            book: BookOptions::default(),
            piece_values: PieceValues::default(),
        }
    }
}

pub fn save_profile(name: &str, config: &EngineConfig) -> io::Result<()> {
    save_profile_in(Path::new(PROFILES_DIR), name, config)
}

pub fn load_profile(name: &str) -> io::Result<EngineConfig> {
    load_profile_in(Path::new(PROFILES_DIR), name)
}

pub fn get_profiles() -> io::Result<Vec<String>> {
    get_profiles_in(Path::new(PROFILES_DIR))
}

pub fn save_profile_in(dir: &Path, name: &str, config: &EngineConfig) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", name));
    let json = serde_json::to_string_pretty(config)?;
    fs::File::create(path)?.write_all(json.as_bytes())
}

pub fn load_profile_in(dir: &Path, name: &str) -> io::Result<EngineConfig> {
    let path = dir.join(format!("{}.json", name));
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(io::Error::from)
}

pub fn get_profiles_in(dir: &Path) -> io::Result<Vec<String>> {
    let mut profiles = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            if let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) {
                profiles.push(name.to_string());
            }
        }
    }
    profiles.sort();
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig {
            search_depth: 5,
            book_path: Some(PathBuf::from("books/performance.bin")),
            book: BookOptions { min_weight: 2, weighted: false },
            ..EngineConfig::default()
        };
        save_profile_in(dir.path(), "deep", &config).unwrap();
        save_profile_in(dir.path(), "default", &EngineConfig::default()).unwrap();

        assert_eq!(load_profile_in(dir.path(), "deep").unwrap(), config);
        assert_eq!(get_profiles_in(dir.path()).unwrap(), vec!["deep", "default"]);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{ "search_depth": 2 }"#).unwrap();
        assert_eq!(config.search_depth, 2);
        assert_eq!(config.quiescence_depth, DEFAULT_QUIESCENCE_DEPTH);
        assert_eq!(config.piece_values, PieceValues::default());
    }

    #[test]
    fn test_malformed_profile_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let err = load_profile_in(dir.path(), "broken").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
