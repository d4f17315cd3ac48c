//! Error types for gapmap analysis operations.
//!
//! Library functions return [`AnalysisError`] so callers can decide whether a
//! failure is fatal to the whole run or only to one component. Command
//! handlers convert these into `anyhow::Error` at the edges.
//!
//! # Propagation
//!
//! - `MissingInput` and `MissingTargetDocument` are soft: the component or
//!   document is skipped and the batch continues.
//! - `InvalidInput` and per-file `Io` errors fail one component only.
//! - `Io` errors while listing the component root abort the run.
//!
//! # Example
//!
//! ```rust
//! use gapmap::errors::AnalysisError;
//!
//! let err = AnalysisError::invalid_input("not valid UTF-8", "button/button.ts");
//! assert_eq!(err.category(), "Invalid input");
//! assert!(!err.is_skippable());
//! ```

pub mod collection;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use collection::{AnalysisFailure, OperationType};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// File system I/O errors (read, write, permissions, listing)
    #[error("I/O error: {message}{}", display_path(.path))]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    /// A component's primary source file does not exist
    #[error("Missing source file: {}", .path.display())]
    MissingInput { path: PathBuf },

    /// A documentation file that should be patched does not exist
    #[error("Missing documentation file: {}", .path.display())]
    MissingTargetDocument { path: PathBuf },

    /// Input could not be interpreted as text
    #[error("Invalid input: {message} (path: {})", .path.display())]
    InvalidInput { message: String, path: PathBuf },

    /// Configuration file issues
    #[error("Config error: {message}{}", display_path(.path))]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// A pattern in a pattern table failed to compile
    #[error("Invalid pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" (path: {})", p.display()))
        .unwrap_or_default()
}

impl AnalysisError {
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
            path: None,
        }
    }

    pub fn io_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }

    pub fn missing_target(path: impl Into<PathBuf>) -> Self {
        Self::MissingTargetDocument { path: path.into() }
    }

    pub fn invalid_input(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            path: path.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    pub fn config_with_path(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn pattern(pattern: impl Into<String>, source: &regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: source.to_string(),
        }
    }

    /// Get the associated path, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } | Self::Config { path, .. } => path.as_ref(),
            Self::MissingInput { path }
            | Self::MissingTargetDocument { path }
            | Self::InvalidInput { path, .. } => Some(path),
            Self::Pattern { .. } => None,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::Io { .. } => "I/O",
            Self::MissingInput { .. } => "Missing input",
            Self::MissingTargetDocument { .. } => "Missing document",
            Self::InvalidInput { .. } => "Invalid input",
            Self::Config { .. } => "Config",
            Self::Pattern { .. } => "Pattern",
        }
    }

    /// Skippable errors turn into a skipped result instead of a failure.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::MissingInput { .. } | Self::MissingTargetDocument { .. }
        )
    }
}

impl From<io::Error> for AnalysisError {
    fn from(err: io::Error) -> Self {
        Self::io(err.to_string())
    }
}
