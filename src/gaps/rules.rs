//! Fixed gap rules.
//!
//! Each rule pairs a trigger (a source category that must have matches, or
//! nothing at all for unconditional rules) with the test-text markers that
//! count as coverage. A rule fires when it is triggered and none of its
//! coverage markers match the component's test corpus. Rules are
//! independent; every applicable rule fires.

use crate::core::{GapRecord, GapType, Severity};
use crate::patterns::{
    CategoryMatches, ASYNC_OPERATIONS, DISABLED_STATES, EVENT_PROPAGATION, FOCUS_MANAGEMENT,
    FORM_INTEGRATION,
};
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Always,
    Category(&'static str),
}

impl Trigger {
    fn applies(&self, matches: &CategoryMatches) -> bool {
        match self {
            Trigger::Always => true,
            Trigger::Category(name) => matches.has_matches(name),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GapRule {
    pub gap_type: GapType,
    pub severity: Severity,
    pub trigger: Trigger,
    /// Any match in the test corpus counts as coverage.
    pub coverage: Vec<Regex>,
    pub description: &'static str,
    pub recommendation: &'static str,
}

impl GapRule {
    fn new(
        gap_type: GapType,
        severity: Severity,
        trigger: Trigger,
        coverage: &[&str],
        description: &'static str,
        recommendation: &'static str,
    ) -> Self {
        Self {
            gap_type,
            severity,
            trigger,
            coverage: coverage
                .iter()
                .map(|p| Regex::new(p).expect("built-in gap rule pattern must compile"))
                .collect(),
            description,
            recommendation,
        }
    }

    pub fn is_covered(&self, test_text: &str) -> bool {
        self.coverage.iter().any(|re| re.is_match(test_text))
    }

    pub fn evaluate(
        &self,
        component: &str,
        matches: &CategoryMatches,
        test_text: &str,
    ) -> Option<GapRecord> {
        if !self.trigger.applies(matches) || self.is_covered(test_text) {
            return None;
        }

        Some(GapRecord {
            component: component.to_string(),
            gap_type: self.gap_type,
            severity: self.severity,
            description: self.description.to_string(),
            recommendation: self.recommendation.to_string(),
        })
    }
}

static DEFAULT_RULES: Lazy<Vec<GapRule>> = Lazy::new(|| {
    vec![
        GapRule::new(
            GapType::DisabledState,
            Severity::High,
            Trigger::Category(DISABLED_STATES),
            &[r"(?i)disabled.*click|click.*disabled"],
            "Component handles a disabled state but no test clicks it while disabled",
            "Add a test that clicks the disabled component and asserts no event or state change occurs",
        ),
        GapRule::new(
            GapType::EventPropagation,
            Severity::High,
            Trigger::Category(EVENT_PROPAGATION),
            &[r"(?i)preventDefault|stopPropagation"],
            "Component controls event propagation but tests never check preventDefault or stopPropagation",
            "Assert that propagated events are stopped or default actions prevented where expected",
        ),
        GapRule::new(
            GapType::FormIntegration,
            Severity::Medium,
            Trigger::Category(FORM_INTEGRATION),
            &[r"(?i)form.*submit|submit.*form"],
            "Component participates in forms but no test submits a form containing it",
            "Render the component inside a <form> and verify its value and submit behavior",
        ),
        GapRule::new(
            GapType::AsyncOperation,
            Severity::Medium,
            Trigger::Category(ASYNC_OPERATIONS),
            &[r"(?i)rapid.*click|click.*rapid|async.*click|click.*async|multiple.*click"],
            "Component performs async work but tests do not exercise rapid or overlapping clicks",
            "Add a test that clicks repeatedly before pending work settles and checks the final state",
        ),
        GapRule::new(
            GapType::Accessibility,
            Severity::High,
            Trigger::Always,
            &[r"(?i)axe|checkAccessibility|a11y|aria"],
            "No accessibility testing found",
            "Run an automated accessibility audit and assert ARIA attributes and roles",
        ),
        GapRule::new(
            GapType::EdgeCase,
            Severity::Medium,
            Trigger::Always,
            &[
                r"(?i)double.?click|dblclick|rapid.*click",
                r"(?i)touch|mobile",
                r#"(?i)keyboard|keydown|keypress|key:\s*['"](?:Enter| |Space)['"]"#,
                r"(?i)ctrlKey|shiftKey|metaKey|altKey|modifier",
            ],
            "No edge-case interaction tests (double click, touch, keyboard activation, modifier keys)",
            "Cover double clicks, touch input, keyboard activation and modifier-key clicks",
        ),
        GapRule::new(
            GapType::FocusManagement,
            Severity::Medium,
            Trigger::Category(FOCUS_MANAGEMENT),
            &[r"(?i)focus|blur"],
            "Component manages focus but tests never check focus or blur behavior",
            "Assert where focus lands after interaction and that blur is handled",
        ),
    ]
});

pub fn default_rules() -> &'static [GapRule] {
    &DEFAULT_RULES
}

/// Evaluate every rule in order and collect the gaps that fire.
pub fn evaluate_rules(
    rules: &[GapRule],
    component: &str,
    matches: &CategoryMatches,
    test_text: &str,
) -> Vec<GapRecord> {
    rules
        .iter()
        .filter_map(|rule| rule.evaluate(component, matches, test_text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{PatternMatcher, PatternTable};

    fn matches_for(source: &str) -> CategoryMatches {
        PatternMatcher::new(PatternTable::builtin()).match_source(source)
    }

    fn gap_types(gaps: &[GapRecord]) -> Vec<GapType> {
        gaps.iter().map(|g| g.gap_type).collect()
    }

    #[test]
    fn test_empty_tests_fire_unconditional_rules() {
        let gaps = evaluate_rules(default_rules(), "plain", &matches_for(""), "");
        assert_eq!(
            gap_types(&gaps),
            vec![GapType::Accessibility, GapType::EdgeCase]
        );
    }

    #[test]
    fn test_disabled_click_test_suppresses_disabled_gap() {
        let matches = matches_for("if (this.disabled) return;");
        let tests = "it('should not fire when Disabled and user tries to CLICK')";
        let gaps = evaluate_rules(default_rules(), "button", &matches, tests);
        assert!(!gap_types(&gaps).contains(&GapType::DisabledState));
    }

    #[test]
    fn test_disabled_check_is_line_scoped() {
        let matches = matches_for("if (this.disabled) return;");
        let tests = "it('is disabled')\nit('handles click')";
        let gaps = evaluate_rules(default_rules(), "button", &matches, tests);
        assert!(gap_types(&gaps).contains(&GapType::DisabledState));
    }

    #[test]
    fn test_disabled_rule_requires_source_match() {
        let gaps = evaluate_rules(default_rules(), "label", &matches_for("render() {}"), "");
        assert!(!gap_types(&gaps).contains(&GapType::DisabledState));
    }

    #[test]
    fn test_event_propagation_gap() {
        let matches = matches_for("event.stopPropagation();");
        let gaps = evaluate_rules(default_rules(), "menu", &matches, "it('opens')");
        let gap = gaps
            .iter()
            .find(|g| g.gap_type == GapType::EventPropagation)
            .unwrap();
        assert_eq!(gap.severity, Severity::High);
        assert_eq!(gap.component, "menu");

        let covered = evaluate_rules(
            default_rules(),
            "menu",
            &matches,
            "expect(event.defaultPrevented).toBe(true); // preventDefault",
        );
        assert!(!gap_types(&covered).contains(&GapType::EventPropagation));
    }

    #[test]
    fn test_form_and_async_rules_are_medium() {
        let matches = matches_for("static formAssociated = true; async load() { await fetch(url); }");
        let gaps = evaluate_rules(default_rules(), "input", &matches, "");
        let form = gaps
            .iter()
            .find(|g| g.gap_type == GapType::FormIntegration)
            .unwrap();
        let asynchronous = gaps
            .iter()
            .find(|g| g.gap_type == GapType::AsyncOperation)
            .unwrap();
        assert_eq!(form.severity, Severity::Medium);
        assert_eq!(asynchronous.severity, Severity::Medium);
    }

    #[test]
    fn test_any_edge_case_marker_counts() {
        for tests in [
            "it('handles dblclick')",
            "it('works on mobile')",
            "await page.keyboard.press('Enter')",
            "click({ shiftKey: true })",
        ] {
            let gaps = evaluate_rules(default_rules(), "x", &matches_for(""), tests);
            assert!(
                !gap_types(&gaps).contains(&GapType::EdgeCase),
                "marker not recognized in {tests}"
            );
        }
    }

    #[test]
    fn test_rules_fire_in_rule_order() {
        let source = "if (this.disabled) return; e.preventDefault(); this.focus();";
        let gaps = evaluate_rules(default_rules(), "x", &matches_for(source), "");
        assert_eq!(
            gap_types(&gaps),
            vec![
                GapType::DisabledState,
                GapType::EventPropagation,
                GapType::Accessibility,
                GapType::EdgeCase,
                GapType::FocusManagement,
            ]
        );
    }
}
