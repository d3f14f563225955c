//! Flat-file persistence.
//!
//! Both files are plain `key:value` text in the data directory. A missing
//! file is not an error; it just means nothing has been saved yet.

pub mod highscores;
pub mod settings;

use std::path::{Path, PathBuf};

pub use highscores::{HighScoreEntry, HighScoreTable, sanitize_name};
pub use settings::AudioSettings;

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A line could not be parsed.
    #[error("line {line}: {reason}")]
    InvalidLine {
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },
}

impl StorageError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read a file, treating "not found" as `None`.
pub(crate) fn read_optional(path: &Path) -> Result<Option<String>, StorageError> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

/// Write a whole file, creating the parent directory if needed.
pub(crate) fn write_file(path: &Path, contents: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
    }
    std::fs::write(path, contents).map_err(|e| StorageError::io(path, e))
}

/// Non-empty trimmed lines with their 1-based line numbers.
pub(crate) fn content_lines(contents: &str) -> impl Iterator<Item = (usize, &str)> {
    contents
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let got = read_optional(&dir.path().join("nope.txt")).unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn test_write_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file.txt");
        write_file(&path, "a:b\n").unwrap();
        assert_eq!(read_optional(&path).unwrap().as_deref(), Some("a:b\n"));
    }

    #[test]
    fn test_content_lines_skips_blanks() {
        let lines: Vec<_> = content_lines("a\n\n  b  \n").collect();
        assert_eq!(lines, vec![(1, "a"), (3, "b")]);
    }

    #[test]
    fn test_error_display() {
        let err = StorageError::InvalidLine {
            line: 3,
            reason: "missing ':'".into(),
        };
        assert_eq!(err.to_string(), "line 3: missing ':'");
    }
}
