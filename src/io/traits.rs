//! I/O trait definitions.
//!
//! Gap analysis and doc patching are pure functions over text. This trait
//! is the boundary where that text comes from and goes to, so loading and
//! patching logic can be exercised against any file system implementation.

use crate::errors::AnalysisError;
use std::path::Path;

/// File system operations used by component loading and doc patching.
///
/// Implementations must be `Send + Sync`; components are loaded from
/// several threads at once.
pub trait FileSystem: Send + Sync {
    /// Read a file's contents as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Io` if the file can't be read and
    /// `AnalysisError::InvalidInput` if it isn't valid UTF-8.
    fn read_to_string(&self, path: &Path) -> Result<String, AnalysisError>;

    /// Read a file's contents as raw bytes.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, AnalysisError>;

    /// Write content to a file, creating it if it doesn't exist.
    fn write(&self, path: &Path, content: &str) -> Result<(), AnalysisError>;

    fn exists(&self, path: &Path) -> bool;

    fn is_file(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;
}
