//! Human-readable descriptions for test names.
//!
//! An ordered table of `(pattern, template)` rules is tried top to bottom and
//! the first match wins. Templates interpolate capture groups with regex
//! `${N}` syntax. Specific rules must precede general ones: the trailing
//! `should X when Y` rule matches a superset of several rules above it.

use crate::errors::AnalysisError;
use once_cell::sync::Lazy;
use regex::Regex;

const EMPTY_NAME_DESCRIPTION: &str = "Verifies component behavior.";

const BUILTIN_RULES: &[(&str, &str)] = &[
    (
        r"(?i)^should render",
        "Verifies that the component renders correctly with default configuration.",
    ),
    (
        r"(?i)^should emit (\S+) event",
        "Verifies that the component emits the ${1} event.",
    ),
    (
        r"(?i)^should validate (.+)$",
        "Tests ${1} validation logic and error handling.",
    ),
    (
        r"(?i)^should (?:update|reflect) (\S+) (?:property|attribute)",
        "Tests ${1} property updates and reflects changes.",
    ),
    (
        r"(?i)^should .*\bdisabled\b",
        "Verifies that the disabled state prevents user interaction.",
    ),
    (
        r"(?i)accessib|a11y|\baxe\b",
        "Validates accessibility compliance using automated checks.",
    ),
    (
        r"(?i)keyboard|keydown|\bkeys?\b",
        "Tests keyboard navigation and activation support.",
    ),
    (r"(?i)\bfocus", "Verifies focus management behavior."),
    (
        r"(?i)^should handle (.+?) when (.+)$",
        "Tests handling of ${1} when ${2}.",
    ),
    (
        r"(?i)^should (.+?) when (.+)$",
        "Verifies that component ${1} when ${2}.",
    ),
];

static BUILTIN: Lazy<DescriptionInferencer> = Lazy::new(|| {
    DescriptionInferencer::from_pairs(BUILTIN_RULES)
        .expect("built-in description rules must compile")
});

#[derive(Debug, Clone)]
pub struct DescriptionRule {
    pub pattern: Regex,
    pub template: String,
}

#[derive(Debug, Clone, Default)]
pub struct DescriptionInferencer {
    rules: Vec<DescriptionRule>,
}

impl DescriptionInferencer {
    pub fn builtin() -> &'static DescriptionInferencer {
        &BUILTIN
    }

    pub fn from_pairs<P, T>(pairs: &[(P, T)]) -> Result<Self, AnalysisError>
    where
        P: AsRef<str>,
        T: AsRef<str>,
    {
        let rules = pairs
            .iter()
            .map(|(pattern, template)| {
                let compiled = Regex::new(pattern.as_ref())
                    .map_err(|e| AnalysisError::pattern(pattern.as_ref(), &e))?;
                Ok(DescriptionRule {
                    pattern: compiled,
                    template: template.as_ref().to_string(),
                })
            })
            .collect::<Result<Vec<_>, AnalysisError>>()?;

        Ok(Self { rules })
    }

    /// Builtin rules with `extra` rules tried first.
    pub fn with_overrides<P, T>(extra: &[(P, T)]) -> Result<Self, AnalysisError>
    where
        P: AsRef<str>,
        T: AsRef<str>,
    {
        let mut inferencer = Self::from_pairs(extra)?;
        inferencer.rules.extend(BUILTIN.rules.iter().cloned());
        Ok(inferencer)
    }

    pub fn rules(&self) -> &[DescriptionRule] {
        &self.rules
    }

    /// Describe a test name. Never returns an empty string and the result
    /// always ends with a period.
    pub fn describe(&self, name: &str) -> String {
        let name = name.trim();
        if name.is_empty() {
            return EMPTY_NAME_DESCRIPTION.to_string();
        }

        for rule in &self.rules {
            if let Some(caps) = rule.pattern.captures(name) {
                let mut description = String::new();
                caps.expand(&rule.template, &mut description);
                return ensure_sentence(description);
            }
        }

        fallback_description(name)
    }
}

/// Rewrite a leading "should " and turn the name into a sentence.
pub fn fallback_description(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return EMPTY_NAME_DESCRIPTION.to_string();
    }

    let body = match name.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("should ") => {
            format!("Verifies that component {}", name[7..].trim_start())
        }
        _ => name.to_string(),
    };

    ensure_sentence(capitalize_first(&body))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn ensure_sentence(text: String) -> String {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        return EMPTY_NAME_DESCRIPTION.to_string();
    }
    if trimmed.ends_with('.') {
        trimmed.to_string()
    } else {
        format!("{trimmed}.")
    }
}
