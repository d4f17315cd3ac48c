// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod docs;
pub mod errors;
pub mod formatting;
pub mod gaps;
pub mod io;
pub mod patterns;

// Re-export commonly used types
pub use crate::core::{
    ComponentRecord, GapRecord, GapType, Severity, TestCase, TestSuite, DEFAULT_SUITE,
};

pub use crate::errors::{AnalysisError, AnalysisFailure, OperationType};

pub use crate::patterns::{CategoryMatches, PatternCategory, PatternMatcher, PatternTable};

pub use crate::gaps::{
    default_rules, evaluate_rules, ComponentAnalysis, GapAnalyzer, GapBuckets, GapReport,
    GapRule, GapSummary,
};

pub use crate::docs::{
    collect_suites, extract_test_cases, group_by_suite, patch_document, update_component_docs,
    DescriptionInferencer, DocSettings, PatchOptions, PatchOutcome,
};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::io::{discover_components, load_component, ComponentLayout, FileSystem};

pub use crate::config::GapmapConfig;
