//! Persisted top-10 leaderboard
//!
//! Stored under one key as a JSON array of entries, best first. A missing or
//! unreadable key yields the stock board of five entries.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::platform::storage;

/// Maximum number of entries to keep
pub const MAX_ENTRIES: usize = 10;

/// A finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u64,
    /// Final mass
    pub mass: f32,
    /// Final tier
    pub tier: u32,
    /// Run length in seconds
    pub time: f32,
    /// Display date, already formatted
    pub date: String,
}

impl LeaderboardEntry {
    fn stock(name: &str, score: u64, mass: f32, tier: u32, time: f32) -> Self {
        Self {
            name: name.to_string(),
            score,
            mass,
            tier,
            time,
            date: "2024-01-01".to_string(),
        }
    }
}

/// Entries sorted by score, descending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self {
            entries: vec![
                LeaderboardEntry::stock("Nova", 5000, 120.0, 6, 600.0),
                LeaderboardEntry::stock("Orbit", 2500, 60.0, 5, 420.0),
                LeaderboardEntry::stock("Comet", 1200, 35.0, 4, 300.0),
                LeaderboardEntry::stock("Pebble", 500, 18.0, 3, 180.0),
                LeaderboardEntry::stock("Dust", 100, 3.0, 2, 60.0),
            ],
        }
    }
}

impl Leaderboard {
    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "gravity_garden_leaderboard";

    /// Board with no entries
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Rank a score would achieve (1-indexed), None if it doesn't qualify
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a run if it qualifies. Returns the rank achieved (1-indexed).
    ///
    /// Ties go below existing entries.
    pub fn add_entry(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        let rank = self.potential_rank(entry.score)?;
        self.entries.insert(rank - 1, entry);
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    /// Parse a stored board, re-sorting and trimming whatever was saved
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        let mut board: Leaderboard = serde_json::from_str(json)?;
        board.entries.sort_by_key(|e| std::cmp::Reverse(e.score));
        board.entries.truncate(MAX_ENTRIES);
        Ok(board)
    }

    pub fn to_json(&self) -> Result<String, StorageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load from storage; absence or corruption yields the stock board
    pub fn load() -> Self {
        match storage::get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match Self::from_json(&json) {
                Ok(board) => {
                    log::info!("Loaded {} leaderboard entries", board.len());
                    board
                }
                Err(e) => {
                    log::warn!("Discarding stored leaderboard: {}", e);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No leaderboard found, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Leaderboard unavailable: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), StorageError> {
        storage::set(Self::STORAGE_KEY, &self.to_json()?)?;
        log::info!("Leaderboard saved ({} entries)", self.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, score: u64) -> LeaderboardEntry {
        LeaderboardEntry {
            name: name.to_string(),
            score,
            mass: 10.0,
            tier: 3,
            time: 90.0,
            date: "2026-10-19".to_string(),
        }
    }

    #[test]
    fn test_default_has_five_sorted_entries() {
        let board = Leaderboard::default();
        assert_eq!(board.len(), 5);
        assert!(board.entries().windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_insert_sorted_and_truncated() {
        let mut board = Leaderboard::empty();
        for score in [300, 100, 200] {
            board.add_entry(entry("p", score));
        }
        let scores: Vec<u64> = board.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);

        for i in 0..20 {
            board.add_entry(entry("filler", 1000 + i));
        }
        assert_eq!(board.len(), MAX_ENTRIES);
        assert_eq!(board.top_score(), Some(1019));
        assert_eq!(board.entries().last().map(|e| e.score), Some(1010));
    }

    #[test]
    fn test_qualifies_and_rank() {
        let mut board = Leaderboard::empty();
        assert!(!board.qualifies(0));
        assert_eq!(board.potential_rank(50), Some(1));
        for i in 1..=MAX_ENTRIES as u64 {
            board.add_entry(entry("p", i * 100));
        }
        assert!(!board.qualifies(100));
        assert!(board.qualifies(101));
        assert_eq!(board.potential_rank(550), Some(6));
        assert_eq!(board.add_entry(entry("late", 50)), None);
    }

    #[test]
    fn test_json_is_a_plain_array() {
        let mut board = Leaderboard::empty();
        board.add_entry(entry("Ada", 42));
        let json = board.to_json().unwrap();
        assert!(json.starts_with('['));
        assert!(json.contains("\"name\":\"Ada\""));
        assert_eq!(Leaderboard::from_json(&json).unwrap(), board);
    }

    #[test]
    fn test_from_json_resorts() {
        let json = r#"[
            {"name":"a","score":1,"mass":1,"tier":1,"time":1,"date":"d"},
            {"name":"b","score":9,"mass":1,"tier":1,"time":1,"date":"d"}
        ]"#;
        let board = Leaderboard::from_json(json).unwrap();
        assert_eq!(board.top_score(), Some(9));
        assert!(Leaderboard::from_json("{not json").is_err());
    }

    #[test]
    fn test_load_save_roundtrip() {
        storage::remove(Leaderboard::STORAGE_KEY).unwrap();
        assert_eq!(Leaderboard::load(), Leaderboard::default());

        let mut board = Leaderboard::load();
        board.add_entry(entry("Grace", 9999));
        board.save().unwrap();
        assert_eq!(Leaderboard::load().top_score(), Some(9999));

        storage::set(Leaderboard::STORAGE_KEY, "garbage").unwrap();
        assert_eq!(Leaderboard::load(), Leaderboard::default());
    }
}
