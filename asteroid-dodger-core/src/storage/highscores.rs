//! Top-10 high score table.
//!
//! File format: one `score:name` per line, split at the first `:`.

use std::path::Path;

use serde::{Serialize, Deserialize};
use tracing::{debug, warn};

use crate::core::constants::{MAX_HIGH_SCORES, MAX_NAME_LENGTH};
use super::{StorageError, content_lines, read_optional, write_file};

/// One row of the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    pub name: String,
}

impl HighScoreEntry {
    /// Parse a `score:name` line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let (score, name) = line
            .split_once(':')
            .ok_or_else(|| "missing ':' separator".to_string())?;
        let score = score
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("bad score {score:?}: {e}"))?;
        Ok(Self {
            score,
            name: name.to_string(),
        })
    }
}

/// Strip separator and line-break characters and cap the length.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ':' | '\n' | '\r'))
        .take(MAX_NAME_LENGTH)
        .collect()
}

/// Scores sorted best first, at most 10.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from file contents. Malformed lines are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut entries = Vec::new();
        for (number, line) in content_lines(contents) {
            match HighScoreEntry::parse(line) {
                Ok(entry) => entries.push(entry),
                Err(reason) => {
                    let err = StorageError::InvalidLine { line: number, reason };
                    warn!(error = %err, "skipping high score line");
                }
            }
        }

        let mut table = Self { entries };
        table.normalize();
        table
    }

    /// Load from disk. A missing file gives an empty table.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let table = match read_optional(path)? {
            Some(contents) => Self::parse(&contents),
            None => Self::new(),
        };
        debug!(path = %path.display(), entries = table.len(), "high scores loaded");
        Ok(table)
    }

    /// Write the table, one line per entry.
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        write_file(path, &self.to_file_string())
    }

    pub fn to_file_string(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}:{}\n", e.score, sanitize_name(&e.name)))
            .collect()
    }

    /// Whether a score earns a place in the table.
    pub fn qualifies(&self, score: u32) -> bool {
        match self.entries.last() {
            Some(lowest) if self.is_full() => score > lowest.score,
            _ => true,
        }
    }

    /// Add a score. Returns its 0-based rank if it made the table.
    pub fn insert(&mut self, score: u32, name: &str) -> Option<usize> {
        let entry = HighScoreEntry {
            score,
            name: sanitize_name(name),
        };
        // Stable sort puts the newcomer after equal scores
        let rank = self.entries.iter().take_while(|e| e.score >= score).count();
        if rank >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Best entry, if any.
    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_HIGH_SCORES
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_line() {
        let e = HighScoreEntry::parse("1200:ACE:PILOT").unwrap();
        assert_eq!(e.score, 1200);
        // Split at the first separator only
        assert_eq!(e.name, "ACE:PILOT");

        assert!(HighScoreEntry::parse("no separator").is_err());
        assert!(HighScoreEntry::parse("abc:name").is_err());
        assert!(HighScoreEntry::parse("-5:name").is_err());
    }

    #[test]
    fn test_parse_sorts_and_skips_garbage() {
        let table = HighScoreTable::parse("100:bob\ngarbage\n\n300:amy\n200:cat\n");
        let scores: Vec<u32> = table.entries().iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![300, 200, 100]);
        assert_eq!(table.best().map(|e| e.name.as_str()), Some("amy"));
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("a:b\nc\rd"), "abcd");
        assert_eq!(sanitize_name("ABCDEFGHIJKLMNOPQRS"), "ABCDEFGHIJKLMNO");
        assert_eq!(sanitize_name(""), "");
    }

    #[test]
    fn test_qualifies() {
        let mut table = HighScoreTable::new();
        assert!(table.qualifies(0));

        for i in 1..=10u32 {
            table.insert(i * 100, "p");
        }
        assert!(table.is_full());
        assert!(!table.qualifies(100));
        assert!(table.qualifies(101));
    }

    #[test]
    fn test_insert_rank_and_truncate() {
        let mut table = HighScoreTable::new();
        for i in 1..=10u32 {
            table.insert(i * 100, "p");
        }

        assert_eq!(table.insert(550, "new"), Some(5));
        assert_eq!(table.len(), 10);
        assert_eq!(table.entries().last().map(|e| e.score), Some(200));

        // Ties go after existing entries
        assert_eq!(table.insert(1000, "tie"), Some(1));
        assert_eq!(table.insert(1, "low"), None);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("high_score.txt");

        let mut table = HighScoreTable::new();
        table.insert(500, "Zed");
        table.insert(900, "Ann:na");
        table.save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "900:Annna\n500:Zed\n");

        let loaded = HighScoreTable::load(&path).unwrap();
        assert_eq!(loaded, table);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let table = HighScoreTable::load(&dir.path().join("missing.txt")).unwrap();
        assert!(table.is_empty());
    }

    proptest! {
        #[test]
        fn prop_table_sorted_and_bounded(
            rows in proptest::collection::vec((any::<u32>(), "[a-zA-Z:]{0,20}"), 0..30)
        ) {
            let mut table = HighScoreTable::new();
            for (score, name) in &rows {
                table.insert(*score, name);
            }

            prop_assert!(table.len() <= MAX_HIGH_SCORES);
            prop_assert!(table.entries().windows(2).all(|w| w[0].score >= w[1].score));
            for e in table.entries() {
                prop_assert!(e.name.chars().count() <= MAX_NAME_LENGTH);
                prop_assert!(!e.name.contains(':'));
            }

            // Survives a trip through the file format
            let reparsed = HighScoreTable::parse(&table.to_file_string());
            prop_assert_eq!(reparsed, table);
        }
    }
}
