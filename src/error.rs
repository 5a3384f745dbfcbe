//! # Error Types
//!
//! The menu engine itself never fails: invalid selection input, unknown
//! attribute values and malformed descriptors are normalized silently. Errors
//! only surface at the edges of the crate, when option sources or user
//! configuration are read from disk.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading option sources or persisted configuration.
#[derive(Debug, Error)]
pub enum MenuError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be parsed or serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A markup pattern failed to compile.
    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// An option source file was readable but its contents were unusable.
    #[error("Invalid option source {}: {message}", path.display())]
    Source { path: PathBuf, message: String },

    /// Configuration is invalid or its location could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for fallible menu operations.
pub type Result<T> = std::result::Result<T, MenuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_mentions_path() {
        let err = MenuError::Source {
            path: PathBuf::from("/tmp/menu.html"),
            message: "no options".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid option source /tmp/menu.html: no options"
        );
    }

    #[test]
    fn test_pattern_error_converts() {
        let err: MenuError = regex::Regex::new("(unclosed")
            .expect_err("invalid pattern")
            .into();
        assert!(matches!(err, MenuError::Pattern(_)));
        assert!(err.to_string().starts_with("Pattern error"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: MenuError = io.into();
        assert!(matches!(err, MenuError::Io(_)));
    }
}
