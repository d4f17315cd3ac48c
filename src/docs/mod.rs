//! Test documentation synthesis.
//!
//! Test documents are scanned for suites and cases, each case gets an
//! inferred description, and the component's documentation file is patched
//! with the result.

pub mod describe;
pub mod extract;
pub mod patch;

use crate::core::{total_cases, ComponentRecord, TestSuite};
use crate::errors::AnalysisError;
use crate::io::FileSystem;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub use describe::DescriptionInferencer;
pub use extract::{extract_test_cases, group_by_suite};
pub use patch::{patch_document, PatchOptions};

/// Result of patching one documentation file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PatchOutcome {
    Updated { path: PathBuf, test_count: usize },
    Unchanged { path: PathBuf, test_count: usize },
    Skipped { path: PathBuf, reason: String },
}

impl PatchOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Updated { path, .. } | Self::Unchanged { path, .. } | Self::Skipped { path, .. } => {
                path
            }
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Everything needed to document one component.
#[derive(Debug, Clone, Copy)]
pub struct DocSettings<'a> {
    pub inferencer: &'a DescriptionInferencer,
    pub options: &'a PatchOptions,
    pub default_suite: &'a str,
    pub date: NaiveDate,
    pub dry_run: bool,
}

/// Collect suites across all of a component's test documents, in path order.
pub fn collect_suites(
    component: &ComponentRecord,
    inferencer: &DescriptionInferencer,
    default_suite: &str,
) -> Vec<TestSuite> {
    let cases = component
        .test_texts
        .iter()
        .flat_map(|text| extract_test_cases(text, inferencer, default_suite))
        .collect();
    group_by_suite(cases)
}

/// Patch `doc_path` with the component's test cases.
///
/// A missing documentation file is reported as skipped, never as an error.
pub fn update_component_docs<F: FileSystem + ?Sized>(
    fs: &F,
    component: &ComponentRecord,
    doc_path: &Path,
    settings: &DocSettings<'_>,
) -> Result<PatchOutcome, AnalysisError> {
    if !fs.is_file(doc_path) {
        let err = AnalysisError::missing_target(doc_path);
        log::warn!("{}: {}", component.name, err);
        return Ok(PatchOutcome::Skipped {
            path: doc_path.to_path_buf(),
            reason: err.to_string(),
        });
    }

    let suites = collect_suites(component, settings.inferencer, settings.default_suite);
    let test_count = total_cases(&suites);
    let original = fs.read_to_string(doc_path)?;
    let patched = patch_document(&original, &suites, settings.date, settings.options);

    if patched == original {
        log::debug!("{}: documentation already current", component.name);
        return Ok(PatchOutcome::Unchanged {
            path: doc_path.to_path_buf(),
            test_count,
        });
    }

    if settings.dry_run {
        log::info!(
            "{}: would update {} ({} tests)",
            component.name,
            doc_path.display(),
            test_count
        );
    } else {
        fs.write(doc_path, &patched)?;
        log::info!(
            "{}: updated {} ({} tests)",
            component.name,
            doc_path.display(),
            test_count
        );
    }

    Ok(PatchOutcome::Updated {
        path: doc_path.to_path_buf(),
        test_count,
    })
}
