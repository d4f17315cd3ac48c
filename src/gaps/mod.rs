//! Test coverage gap detection.
//!
//! Pipeline per component: match risk categories in the primary source,
//! then evaluate the gap rules against the concatenated test documents.
//! Aggregation into a report lives in [`report`].

pub mod report;
pub mod rules;

use crate::core::{ComponentRecord, GapRecord};
use crate::patterns::{CategoryMatches, PatternMatcher, PatternTable};
use serde::Serialize;
use std::path::PathBuf;

pub use report::{GapBucket, GapBuckets, GapReport, GapSummary, SkippedComponent};
pub use rules::{default_rules, evaluate_rules, GapRule, Trigger};

/// Everything found for a single component.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentAnalysis {
    pub name: String,
    pub source: PathBuf,
    pub test_files: Vec<PathBuf>,
    pub patterns: CategoryMatches,
    pub gaps: Vec<GapRecord>,
}

impl ComponentAnalysis {
    pub fn has_gaps(&self) -> bool {
        !self.gaps.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GapAnalyzer<'a> {
    matcher: PatternMatcher<'a>,
    rules: &'a [GapRule],
}

impl<'a> GapAnalyzer<'a> {
    pub fn new(table: &'a PatternTable, rules: &'a [GapRule]) -> Self {
        Self {
            matcher: PatternMatcher::new(table),
            rules,
        }
    }

    pub fn with_defaults() -> GapAnalyzer<'static> {
        GapAnalyzer::new(PatternTable::builtin(), default_rules())
    }

    pub fn analyze(&self, component: &ComponentRecord) -> ComponentAnalysis {
        let patterns = self.matcher.match_source(&component.source_text);
        let corpus = component.test_corpus();
        let gaps = evaluate_rules(self.rules, &component.name, &patterns, &corpus);

        log::debug!(
            "{}: {} pattern matches, {} test file(s), {} gap(s)",
            component.name,
            patterns.total_matches(),
            component.test_paths.len(),
            gaps.len()
        );

        ComponentAnalysis {
            name: component.name.clone(),
            source: component.source_path.clone(),
            test_files: component.test_paths.clone(),
            patterns,
            gaps,
        }
    }
}
