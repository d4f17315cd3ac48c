mod core;
mod loader;

pub use self::core::{
    ComponentsConfig, DescriptionRuleConfig, DocsConfig, GapmapConfig, OutputConfig,
    PatternCategoryConfig, PatternsConfig, ThresholdsConfig, CONFIG_FILE_NAME,
};
pub use loader::{
    directory_ancestors, load_config_from, load_config_from_path, parse_and_validate_config,
    resolve_config,
};

use crate::docs::describe::DescriptionInferencer;
use crate::docs::patch::PatchOptions;
use crate::errors::AnalysisError;
use crate::io::output::OutputFormat;
use crate::io::ComponentLayout;
use crate::patterns::PatternTable;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

impl GapmapConfig {
    pub fn components(&self) -> Cow<'_, ComponentsConfig> {
        self.components
            .as_ref()
            .map(Cow::Borrowed)
            .unwrap_or_else(|| Cow::Owned(ComponentsConfig::default()))
    }

    pub fn docs(&self) -> Cow<'_, DocsConfig> {
        self.docs
            .as_ref()
            .map(Cow::Borrowed)
            .unwrap_or_else(|| Cow::Owned(DocsConfig::default()))
    }

    /// Component root, resolved against `base` when relative.
    pub fn component_root(&self, base: &Path) -> PathBuf {
        let root = PathBuf::from(&self.components().root);
        if root.is_absolute() {
            root
        } else {
            base.join(root)
        }
    }

    pub fn layout(&self) -> ComponentLayout {
        let components = self.components();
        ComponentLayout {
            source_extension: components.source_extension.trim_start_matches('.').to_string(),
            test_suffixes: components.test_suffixes.clone(),
            ignore_patterns: Vec::new(),
        }
        .with_ignore_patterns(&components.ignore)
    }

    pub fn max_gaps(&self) -> usize {
        self.thresholds.as_ref().map(|t| t.max_gaps).unwrap_or(0)
    }

    /// The configured pattern table, or the built-in one when none is set.
    pub fn pattern_table(&self) -> Result<Cow<'static, PatternTable>, AnalysisError> {
        match &self.patterns {
            Some(patterns) if !patterns.categories.is_empty() => {
                let sources: Vec<(&str, &[String])> = patterns
                    .categories
                    .iter()
                    .map(|c| (c.name.as_str(), c.patterns.as_slice()))
                    .collect();
                Ok(Cow::Owned(PatternTable::from_sources(&sources)?))
            }
            _ => Ok(Cow::Borrowed(PatternTable::builtin())),
        }
    }

    pub fn description_inferencer(
        &self,
    ) -> Result<Cow<'static, DescriptionInferencer>, AnalysisError> {
        let docs = self.docs();
        if docs.descriptions.is_empty() {
            return Ok(Cow::Borrowed(DescriptionInferencer::builtin()));
        }

        let pairs: Vec<(&str, &str)> = docs
            .descriptions
            .iter()
            .map(|d| (d.pattern.as_str(), d.template.as_str()))
            .collect();
        Ok(Cow::Owned(DescriptionInferencer::with_overrides(&pairs)?))
    }

    pub fn patch_options(&self) -> PatchOptions {
        let docs = self.docs();
        PatchOptions {
            section_heading: docs.section_heading.clone(),
            anchor_heading: docs.anchor_heading.clone(),
        }
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.as_ref().and_then(|o| o.use_color)
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.default_format)
            .unwrap_or_default()
    }
}
