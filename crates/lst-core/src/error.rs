//! Error types and handling for LST operations

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for parsing, printing and templating operations
#[derive(Debug, Error)]
pub enum LstError {
    /// Lexical or syntax error in a single source file
    #[error("Syntax error in '{}' at offset {offset}: {message}", path.display())]
    Syntax {
        path: PathBuf,
        offset: usize,
        message: String,
    },

    /// File system I/O errors
    #[error("IO error for path '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Template substitution or splicing errors
    #[error("Template error: {message}")]
    Template { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Io,
    Config,
    Template,
    Internal,
}

impl LstError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LstError::Syntax { .. } => ErrorKind::Syntax,
            LstError::Io { .. } => ErrorKind::Io,
            LstError::Config { .. } => ErrorKind::Config,
            LstError::Template { .. } => ErrorKind::Template,
            LstError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error only affects one file, so a batch can keep going
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Syntax | ErrorKind::Io)
    }

    /// Create a syntax error
    pub fn syntax(path: impl Into<PathBuf>, offset: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            path: path.into(),
            offset,
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Byte offset of a syntax error, if this is one
    pub fn offset(&self) -> Option<usize> {
        match self {
            LstError::Syntax { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

/// Standard Result type for LST operations
pub type Result<T> = std::result::Result<T, LstError>;

/// Extension trait for Result to provide additional convenience methods
pub trait ResultExt<T> {
    /// Log the error and continue with None
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                if err.is_recoverable() {
                    tracing::warn!("Continuing after error: {}", err);
                } else {
                    tracing::error!("Fatal error: {}", err);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_are_recoverable() {
        let err = LstError::syntax("main.tf", 12, "unexpected `}`");
        assert_eq!(err.kind(), ErrorKind::Syntax);
        assert!(err.is_recoverable());
        assert_eq!(err.offset(), Some(12));
        assert_eq!(
            err.to_string(),
            "Syntax error in 'main.tf' at offset 12: unexpected `}`"
        );
    }

    #[test]
    fn internal_errors_are_fatal() {
        let err = LstError::internal("boom");
        assert!(!err.is_recoverable());
        assert_eq!(err.offset(), None);
        assert_eq!(Err::<(), _>(err).log_and_continue(), None);
    }
}
