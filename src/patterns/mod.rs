//! Risk pattern matching over component source text.
//!
//! A [`PatternTable`] is configuration data: an ordered list of categories,
//! each holding an ordered list of regular expressions. [`PatternMatcher`]
//! applies the table to one source text and reports every matched substring
//! per category.

pub mod defaults;

use crate::errors::AnalysisError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::ser::{Serialize, SerializeMap, Serializer};

pub use defaults::DEFAULT_CATEGORIES;

pub const EVENT_PROPAGATION: &str = "eventPropagation";
pub const DISABLED_STATES: &str = "disabledStates";
pub const FORM_INTEGRATION: &str = "formIntegration";
pub const ASYNC_OPERATIONS: &str = "asyncOperations";
pub const EVENT_LISTENERS: &str = "eventListeners";
pub const FOCUS_MANAGEMENT: &str = "focusManagement";

#[derive(Debug, Clone)]
pub struct PatternCategory {
    pub name: String,
    pub patterns: Vec<Regex>,
}

#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    categories: Vec<PatternCategory>,
}

static DEFAULT_TABLE: Lazy<PatternTable> = Lazy::new(|| {
    PatternTable::from_sources(DEFAULT_CATEGORIES).expect("built-in pattern table must compile")
});

impl PatternTable {
    /// Compile a table from `(category, [pattern, ...])` pairs, preserving order.
    pub fn from_sources<N, P>(sources: &[(N, &[P])]) -> Result<Self, AnalysisError>
    where
        N: AsRef<str>,
        P: AsRef<str>,
    {
        let categories = sources
            .iter()
            .map(|(name, patterns)| {
                let compiled = patterns
                    .iter()
                    .map(|p| {
                        Regex::new(p.as_ref()).map_err(|e| AnalysisError::pattern(p.as_ref(), &e))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PatternCategory {
                    name: name.as_ref().to_string(),
                    patterns: compiled,
                })
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        Ok(Self { categories })
    }

    pub fn builtin() -> &'static PatternTable {
        &DEFAULT_TABLE
    }

    pub fn categories(&self) -> &[PatternCategory] {
        &self.categories
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Matched substrings per category, in table order. Every category of the
/// table is present even when nothing matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryMatches {
    entries: Vec<(String, Vec<String>)>,
}

impl CategoryMatches {
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, matches)| matches.as_slice())
    }

    /// True when the category exists and has at least one match. Unknown
    /// categories count as empty.
    pub fn has_matches(&self, category: &str) -> bool {
        self.get(category).is_some_and(|m| !m.is_empty())
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, matches)| (name.as_str(), matches.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_matches(&self) -> usize {
        self.entries.iter().map(|(_, m)| m.len()).sum()
    }
}

impl Serialize for CategoryMatches {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, matches) in &self.entries {
            map.serialize_entry(name, matches)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PatternMatcher<'a> {
    table: &'a PatternTable,
}

impl<'a> PatternMatcher<'a> {
    pub fn new(table: &'a PatternTable) -> Self {
        Self { table }
    }

    pub fn match_source(&self, text: &str) -> CategoryMatches {
        let entries = self
            .table
            .categories
            .iter()
            .map(|category| {
                let matches = category
                    .patterns
                    .iter()
                    .flat_map(|re| re.find_iter(text).map(|m| m.as_str().to_string()))
                    .collect();
                (category.name.clone(), matches)
            })
            .collect();

        CategoryMatches { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(sources: &[(&str, &[&str])]) -> PatternTable {
        PatternTable::from_sources(sources).unwrap()
    }

    #[test]
    fn test_every_category_present_when_empty() {
        let table = PatternTable::builtin();
        let matches = PatternMatcher::new(table).match_source("");

        assert_eq!(matches.len(), table.categories().len());
        for name in table.category_names() {
            assert!(matches.contains_category(name), "missing {name}");
            assert!(!matches.has_matches(name));
        }
    }

    #[test]
    fn test_match_order_is_expression_then_position() {
        let table = table(&[("events", &["b+", "a"])]);
        let matches = PatternMatcher::new(&table).match_source("a bb a b");

        assert_eq!(
            matches.get("events").unwrap(),
            &["bb".to_string(), "b".to_string(), "a".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn test_duplicates_retained_across_expressions() {
        let table = table(&[("focus", &["focus", r"\.focus\(\)"])]);
        let matches = PatternMatcher::new(&table).match_source("this.focus()");

        assert_eq!(matches.get("focus").unwrap().len(), 2);
    }

    #[test]
    fn test_builtin_detects_disabled_guard() {
        let matches =
            PatternMatcher::new(PatternTable::builtin()).match_source("if (this.disabled) return;");
        assert!(matches.has_matches(DISABLED_STATES));
        assert!(!matches.has_matches(FORM_INTEGRATION));
    }

    #[test]
    fn test_builtin_detects_listener() {
        let source = "this.addEventListener('click', this.handleClick);";
        let matches = PatternMatcher::new(PatternTable::builtin()).match_source(source);
        assert_eq!(
            matches.get(EVENT_LISTENERS).unwrap(),
            &["addEventListener('click'".to_string()]
        );
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = PatternTable::from_sources(&[("broken", &["(open"][..])]).unwrap_err();
        assert!(matches!(err, AnalysisError::Pattern { .. }));
    }

    #[test]
    fn test_unknown_category_counts_as_empty() {
        let matches = PatternMatcher::new(PatternTable::builtin()).match_source("anything");
        assert!(!matches.has_matches("noSuchCategory"));
        assert!(matches.get("noSuchCategory").is_none());
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let table = table(&[("zeta", &["z"]), ("alpha", &["a"])]);
        let matches = PatternMatcher::new(&table).match_source("za");
        let json = serde_json::to_string(&matches).unwrap();
        assert_eq!(json, r#"{"zeta":["z"],"alpha":["a"]}"#);
    }
}
