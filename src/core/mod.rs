use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_SUITE: &str = "General Tests";

/// A component loaded from disk: its primary source and every test document
/// found for it by naming convention.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComponentRecord {
    pub name: String,
    pub source_path: PathBuf,
    #[serde(skip)]
    pub source_text: String,
    pub test_paths: Vec<PathBuf>,
    #[serde(skip)]
    pub test_texts: Vec<String>,
}

impl ComponentRecord {
    pub fn new(name: impl Into<String>, source_path: PathBuf, source_text: String) -> Self {
        Self {
            name: name.into(),
            source_path,
            source_text,
            test_paths: Vec::new(),
            test_texts: Vec::new(),
        }
    }

    pub fn with_test(mut self, path: PathBuf, text: String) -> Self {
        self.test_paths.push(path);
        self.test_texts.push(text);
        self
    }

    pub fn has_tests(&self) -> bool {
        !self.test_texts.is_empty()
    }

    /// All test documents joined into one searchable corpus.
    pub fn test_corpus(&self) -> String {
        self.test_texts.join("\n")
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "camelCase")]
pub enum GapType {
    DisabledState,
    EventPropagation,
    FormIntegration,
    AsyncOperation,
    Accessibility,
    EdgeCase,
    FocusManagement,
}

impl GapType {
    pub const ALL: [GapType; 7] = [
        GapType::DisabledState,
        GapType::EventPropagation,
        GapType::FormIntegration,
        GapType::AsyncOperation,
        GapType::Accessibility,
        GapType::EdgeCase,
        GapType::FocusManagement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GapType::DisabledState => "disabledState",
            GapType::EventPropagation => "eventPropagation",
            GapType::FormIntegration => "formIntegration",
            GapType::AsyncOperation => "asyncOperation",
            GapType::Accessibility => "accessibility",
            GapType::EdgeCase => "edgeCase",
            GapType::FocusManagement => "focusManagement",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GapType::DisabledState => "Disabled State",
            GapType::EventPropagation => "Event Propagation",
            GapType::FormIntegration => "Form Integration",
            GapType::AsyncOperation => "Async Operations",
            GapType::Accessibility => "Accessibility",
            GapType::EdgeCase => "Edge Cases",
            GapType::FocusManagement => "Focus Management",
        }
    }
}

impl fmt::Display for GapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected mismatch between a risky source pattern and the absence of a
/// matching test.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GapRecord {
    pub component: String,
    #[serde(rename = "type")]
    pub gap_type: GapType,
    pub severity: Severity,
    pub description: String,
    pub recommendation: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestCase {
    pub name: String,
    pub suite_name: String,
    pub source_line: usize,
    pub description: String,
}

/// Suites in order of first appearance, each holding its cases in source order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestSuite {
    pub name: String,
    pub cases: Vec<TestCase>,
}

pub fn total_cases(suites: &[TestSuite]) -> usize {
    suites.iter().map(|suite| suite.cases.len()).sum()
}
