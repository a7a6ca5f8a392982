//! Score history and its on-disk collaborator
//!
//! The simulation core only appends to the in-memory list; reading and
//! writing the JSON file is the persistence collaborator implemented at
//! the bottom of this module. A missing or unreadable file is never fatal:
//! it loads as an empty history.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Number of entries shown on the leaderboard
pub const TOP_SCORES: usize = 10;

/// One finalized game-over record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub score: u64,
    pub level: u32,
    /// Active-play seconds, pause time excluded
    pub elapsed_seconds: f64,
    pub name: String,
}

/// Append-only score history in arrival order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreHistory {
    records: Vec<ScoreRecord>,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized record
    pub fn add(&mut self, record: ScoreRecord) {
        self.records.push(record);
    }

    /// All records in arrival order
    pub fn records(&self) -> &[ScoreRecord] {
        &self.records
    }

    /// Best score across the whole history
    pub fn high_score(&self) -> u64 {
        self.records.iter().map(|r| r.score).max().unwrap_or(0)
    }

    /// The top `n` records by descending score, for display
    pub fn top(&self, n: usize) -> Vec<ScoreRecord> {
        let mut sorted = self.records.clone();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted.truncate(n);
        sorted
    }

    /// Load a history from a JSON file; missing or corrupt files come back
    /// as an empty history
    pub fn load_or_default(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<ScoreHistory>(&json) {
                Ok(history) => {
                    log::info!("loaded {} score records", history.records.len());
                    history
                }
                Err(err) => {
                    log::warn!("score history unreadable ({err}), starting fresh");
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("no score history found, starting fresh");
                Self::new()
            }
        }
    }

    /// Write the history as JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("score history saved ({} records)", self.records.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, score: u64) -> ScoreRecord {
        ScoreRecord {
            score,
            level: 1,
            elapsed_seconds: 60.0,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_top_sorts_descending_and_truncates() {
        let mut history = ScoreHistory::new();
        for i in 0..15u64 {
            history.add(record("p", i * 10));
        }

        let top = history.top(TOP_SCORES);
        assert_eq!(top.len(), TOP_SCORES);
        assert_eq!(top[0].score, 140);
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
        // Arrival order untouched
        assert_eq!(history.records()[0].score, 0);
    }

    #[test]
    fn test_high_score_of_empty_history_is_zero() {
        let history = ScoreHistory::new();
        assert_eq!(history.high_score(), 0);
        assert!(history.top(10).is_empty());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let history = ScoreHistory::load_or_default(Path::new("/nonexistent/scores.json"));
        assert!(history.records().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut history = ScoreHistory::new();
        history.add(record("Alice", 1200));
        history.add(record("Bob", 800));

        let path = std::env::temp_dir().join("star_siege_scores_test.json");
        history.save(&path).unwrap();
        let loaded = ScoreHistory::load_or_default(&path);
        fs::remove_file(&path).ok();

        assert_eq!(loaded.records(), history.records());
        assert_eq!(loaded.high_score(), 1200);
    }
}
