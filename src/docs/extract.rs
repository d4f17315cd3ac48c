//! Test case extraction from test documents.
//!
//! Scans line by line for suite markers (`describe(...)`) and case markers
//! (`it(...)` / `test(...)`). A case belongs to the most recently opened
//! suite in the same document, or to the default suite before any suite
//! marker has been seen.

use super::describe::DescriptionInferencer;
use crate::core::{TestCase, TestSuite};
use once_cell::sync::Lazy;
use regex::Regex;

static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:^|[^\w.$])(?P<kind>describe|it|test)(?:\.only|\.skip)?\s*\(\s*(?:'(?P<sq>(?:[^'\\]|\\.)*)'|"(?P<dq>(?:[^"\\]|\\.)*)"|`(?P<bq>(?:[^`\\]|\\.)*)`)"#,
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Marker {
    Suite(String),
    Case(String),
}

fn markers_in_line(line: &str) -> Vec<Marker> {
    MARKER
        .captures_iter(line)
        .filter_map(|caps| {
            let title = ["sq", "dq", "bq"]
                .iter()
                .find_map(|group| caps.name(group))
                .map(|m| unescape(m.as_str()))?;
            match &caps["kind"] {
                "describe" => Some(Marker::Suite(title)),
                _ => Some(Marker::Case(title)),
            }
        })
        .collect()
}

/// Drop the backslash from `\x` escapes inside a quoted title.
fn unescape(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut chars = title.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            _ => out.push(c),
        }
    }
    out
}

pub fn extract_test_cases(
    text: &str,
    inferencer: &DescriptionInferencer,
    default_suite: &str,
) -> Vec<TestCase> {
    let mut current_suite: Option<String> = None;
    let mut cases = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim_start().starts_with("//") {
            continue;
        }

        for marker in markers_in_line(line) {
            match marker {
                Marker::Suite(name) => current_suite = Some(name),
                Marker::Case(name) => {
                    let description = inferencer.describe(&name);
                    cases.push(TestCase {
                        suite_name: current_suite
                            .clone()
                            .unwrap_or_else(|| default_suite.to_string()),
                        source_line: index + 1,
                        description,
                        name,
                    });
                }
            }
        }
    }

    cases
}

/// Group cases by suite, keeping suites in order of first appearance and
/// cases in their original order.
pub fn group_by_suite(cases: Vec<TestCase>) -> Vec<TestSuite> {
    let mut suites: Vec<TestSuite> = Vec::new();

    for case in cases {
        match suites.iter_mut().find(|s| s.name == case.suite_name) {
            Some(suite) => suite.cases.push(case),
            None => suites.push(TestSuite {
                name: case.suite_name.clone(),
                cases: vec![case],
            }),
        }
    }

    suites
}
