//! Aggregation of per-component analyses into one report.
//!
//! Gaps are bucketed by type. Buckets are ordered by the first time a gap of
//! that type was added, and components are added in directory-sorted order,
//! so the same tree always produces the same report.

use super::ComponentAnalysis;
use crate::core::{GapRecord, GapType, Severity};
use crate::errors::AnalysisFailure;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GapBucket {
    #[serde(rename = "type")]
    pub gap_type: GapType,
    pub gaps: Vec<GapRecord>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct GapBuckets {
    buckets: Vec<GapBucket>,
}

impl GapBuckets {
    pub fn push(&mut self, gap: GapRecord) {
        match self.buckets.iter_mut().find(|b| b.gap_type == gap.gap_type) {
            Some(bucket) => bucket.gaps.push(gap),
            None => self.buckets.push(GapBucket {
                gap_type: gap.gap_type,
                gaps: vec![gap],
            }),
        }
    }

    pub fn get(&self, gap_type: GapType) -> &[GapRecord] {
        self.buckets
            .iter()
            .find(|b| b.gap_type == gap_type)
            .map(|b| b.gaps.as_slice())
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &GapBucket> {
        self.buckets.iter()
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.gaps.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// A component directory without a primary source file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkippedComponent {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub gap_type: GapType,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GapSummary {
    pub components_analyzed: usize,
    pub components_skipped: usize,
    pub failures: usize,
    pub total_gaps: usize,
    pub high: usize,
    pub medium: usize,
    pub by_type: Vec<TypeCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GapReport {
    pub root: PathBuf,
    pub timestamp: DateTime<Utc>,
    pub summary: GapSummary,
    pub buckets: GapBuckets,
    pub components: Vec<ComponentAnalysis>,
    pub skipped: Vec<SkippedComponent>,
    pub failures: Vec<AnalysisFailure>,
}

impl GapReport {
    /// Build a report. `components` is re-sorted by name so callers that
    /// analyzed out of order still get the canonical ordering.
    pub fn build(
        root: PathBuf,
        mut components: Vec<ComponentAnalysis>,
        skipped: Vec<SkippedComponent>,
        failures: Vec<AnalysisFailure>,
    ) -> Self {
        components.sort_by(|a, b| a.name.cmp(&b.name));

        let mut buckets = GapBuckets::default();
        for gap in components.iter().flat_map(|c| c.gaps.iter()) {
            buckets.push(gap.clone());
        }

        let summary = summarize(&components, &skipped, &failures, &buckets);

        Self {
            root,
            timestamp: Utc::now(),
            summary,
            buckets,
            components,
            skipped,
            failures,
        }
    }

    pub fn total_gaps(&self) -> usize {
        self.summary.total_gaps
    }

    /// Whether the gap count is within the allowed tolerance.
    pub fn is_within(&self, max_gaps: usize) -> bool {
        self.total_gaps() <= max_gaps
    }

    pub fn components_with_gaps(&self) -> impl Iterator<Item = &ComponentAnalysis> {
        self.components.iter().filter(|c| c.has_gaps())
    }
}

fn summarize(
    components: &[ComponentAnalysis],
    skipped: &[SkippedComponent],
    failures: &[AnalysisFailure],
    buckets: &GapBuckets,
) -> GapSummary {
    let all_gaps = || buckets.iter().flat_map(|b| b.gaps.iter());
    let count_severity = |severity: Severity| all_gaps().filter(|g| g.severity == severity).count();

    GapSummary {
        components_analyzed: components.len(),
        components_skipped: skipped.len(),
        failures: failures.len(),
        total_gaps: buckets.total(),
        high: count_severity(Severity::High),
        medium: count_severity(Severity::Medium),
        by_type: buckets
            .iter()
            .map(|b| TypeCount {
                gap_type: b.gap_type,
                count: b.gaps.len(),
            })
            .collect(),
    }
}
