pub mod output;
pub mod real;
pub mod traits;
pub mod walker;

pub use real::RealFileSystem;
pub use traits::FileSystem;
pub use walker::{discover_components, load_component, ComponentDir, ComponentLayout};

use crate::errors::AnalysisError;
use anyhow::Result;
use std::fs;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// Interpret file contents as text. Anything that is not UTF-8 is rejected
/// as invalid input rather than lossily converted.
pub fn decode_text(bytes: Vec<u8>, path: &Path) -> Result<String, AnalysisError> {
    String::from_utf8(bytes).map_err(|e| {
        AnalysisError::invalid_input(format!("file is not valid UTF-8 text: {}", e), path)
    })
}
