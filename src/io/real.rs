//! Production implementation of [`FileSystem`].

use super::decode_text;
use crate::errors::AnalysisError;
use crate::io::traits::FileSystem;
use std::fs;
use std::path::Path;

/// Delegates directly to `std::fs`. Thread-safe and shareable across the
/// analysis pool.
#[derive(Debug, Default, Clone)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, AnalysisError> {
        let bytes = self.read_bytes(path)?;
        decode_text(bytes, path)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, AnalysisError> {
        fs::read(path)
            .map_err(|e| AnalysisError::io_with_path(format!("Failed to read file: {}", e), path))
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), AnalysisError> {
        fs::write(path, content)
            .map_err(|e| AnalysisError::io_with_path(format!("Failed to write file: {}", e), path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
