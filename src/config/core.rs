use serde::{Deserialize, Serialize};

use crate::docs::patch::{DEFAULT_ANCHOR_HEADING, DEFAULT_SECTION_HEADING};
use crate::io::output::OutputFormat;

pub const CONFIG_FILE_NAME: &str = ".gapmap.toml";

/// Root configuration structure for gapmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GapmapConfig {
    /// Where components live and how their files are named
    #[serde(default)]
    pub components: Option<ComponentsConfig>,

    /// Tolerances for the analyze command's exit code
    #[serde(default)]
    pub thresholds: Option<ThresholdsConfig>,

    /// Documentation patching settings
    #[serde(default)]
    pub docs: Option<DocsConfig>,

    /// Replacement risk pattern table
    #[serde(default)]
    pub patterns: Option<PatternsConfig>,

    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentsConfig {
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
    #[serde(default = "default_test_suffixes")]
    pub test_suffixes: Vec<String>,
    /// Glob patterns matched against component directory names
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for ComponentsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            source_extension: default_source_extension(),
            test_suffixes: default_test_suffixes(),
            ignore: Vec::new(),
        }
    }
}

pub fn default_root() -> String {
    "src/components".to_string()
}

pub fn default_source_extension() -> String {
    "ts".to_string()
}

pub fn default_test_suffixes() -> Vec<String> {
    vec![".test.ts".to_string(), ".spec.ts".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ThresholdsConfig {
    /// Gaps tolerated before `analyze` exits non-zero
    #[serde(default)]
    pub max_gaps: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocsConfig {
    #[serde(default = "default_doc_file_name")]
    pub file_name: String,
    #[serde(default = "default_section_heading")]
    pub section_heading: String,
    #[serde(default = "default_anchor_heading")]
    pub anchor_heading: String,
    #[serde(default = "default_suite_name")]
    pub default_suite: String,
    /// Extra description rules, tried before the built-in ones
    #[serde(default)]
    pub descriptions: Vec<DescriptionRuleConfig>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            file_name: default_doc_file_name(),
            section_heading: default_section_heading(),
            anchor_heading: default_anchor_heading(),
            default_suite: default_suite_name(),
            descriptions: Vec::new(),
        }
    }
}

pub fn default_doc_file_name() -> String {
    "README.md".to_string()
}

pub fn default_section_heading() -> String {
    DEFAULT_SECTION_HEADING.to_string()
}

pub fn default_anchor_heading() -> String {
    DEFAULT_ANCHOR_HEADING.to_string()
}

pub fn default_suite_name() -> String {
    crate::core::DEFAULT_SUITE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DescriptionRuleConfig {
    pub pattern: String,
    pub template: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PatternsConfig {
    /// When non-empty, replaces the built-in category table
    #[serde(default)]
    pub categories: Vec<PatternCategoryConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternCategoryConfig {
    pub name: String,
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OutputConfig {
    pub default_format: Option<OutputFormat>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}
