//! Error types for the Sanity lexer
//!
//! Lexing itself never fails: every character sequence tokenizes. The errors
//! here come from the collaborators that feed characters into the lexer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while acquiring or reading source text
#[derive(Error, Debug)]
pub enum Error {
    /// An input could not be opened
    ///
    /// **Triggered by:** A missing or unreadable input file
    #[error("Failed to open '{}': {source}", .path.display())]
    Io {
        /// Path that was being opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A read failed part way through the input
    #[error("Read error: {0}")]
    Read(#[from] std::io::Error),

    /// The input contained bytes that are not valid UTF-8
    ///
    /// **Triggered by:** Feeding a binary or non-UTF-8 encoded file
    /// **Prevention:** Re-encode the source file as UTF-8
    #[error("Invalid UTF-8 sequence at line {line}, column {column}")]
    InvalidUtf8 {
        /// Line of the offending character (1-indexed)
        line: u32,
        /// Column of the offending character (1-indexed)
        column: u32,
    },
}

impl Error {
    /// Create an open error for the given path
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for lexer collaborators
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_mentions_path() {
        let err = Error::open(
            "missing.sane",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        let msg = err.to_string();
        assert!(msg.contains("missing.sane"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_invalid_utf8_message() {
        let err = Error::InvalidUtf8 { line: 3, column: 7 };
        assert_eq!(
            err.to_string(),
            "Invalid UTF-8 sequence at line 3, column 7"
        );
    }
}
