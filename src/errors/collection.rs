//! Per-component failure records.
//!
//! Components are independent, so one unreadable file must not hide the
//! results for every other component. Failures are recorded here and the
//! batch continues.

use super::AnalysisError;
use serde::Serialize;
use std::path::PathBuf;

/// Information about a failed operation on a single component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisFailure {
    pub path: PathBuf,
    pub operation: OperationType,
    pub error: String,
}

impl AnalysisFailure {
    pub fn new(path: PathBuf, operation: OperationType, error: &AnalysisError) -> Self {
        Self {
            path,
            operation,
            error: error.to_string(),
        }
    }

    pub fn file_read(path: PathBuf, error: &AnalysisError) -> Self {
        Self::new(path, OperationType::FileRead, error)
    }

    pub fn analysis(path: PathBuf, error: &AnalysisError) -> Self {
        Self::new(path, OperationType::Analysis, error)
    }

    pub fn doc_patch(path: PathBuf, error: &AnalysisError) -> Self {
        Self::new(path, OperationType::DocPatch, error)
    }

    /// Pick the operation from the error kind: decode failures belong to the
    /// analysis step, everything else to reading.
    pub fn from_load_error(path: PathBuf, error: &AnalysisError) -> Self {
        match error {
            AnalysisError::InvalidInput { .. } => Self::analysis(path, error),
            _ => Self::file_read(path, error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    FileRead,
    Analysis,
    DocPatch,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FileRead => "File read",
            Self::Analysis => "Analysis",
            Self::DocPatch => "Doc patch",
        }
    }
}
