//! In-place documentation patching.
//!
//! Three independent substitutions are applied to a Markdown document: the
//! first "N unit tests" count, the first "Last Updated:" date, and the test
//! coverage section. The section is replaced when present, inserted before
//! the anchor heading when that exists, and appended otherwise. Rendering is
//! deterministic, so patching an already patched document leaves the
//! section byte-identical.

use crate::core::{total_cases, TestSuite};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const DEFAULT_SECTION_HEADING: &str = "## Test Coverage";
pub const DEFAULT_ANCHOR_HEADING: &str = "## API Reference";
const NO_CASES: &str = "_No test cases found._";

static TEST_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d[\d,]* unit tests").unwrap());
static LAST_UPDATED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)Last Updated:(?P<bold>\*\*)?[ \t]*[^\n|]*?(?P<tail>[ \t]*(?:\*\*)?[ \t]*(?:\||\r?$))",
    )
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOptions {
    pub section_heading: String,
    pub anchor_heading: String,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            section_heading: DEFAULT_SECTION_HEADING.to_string(),
            anchor_heading: DEFAULT_ANCHOR_HEADING.to_string(),
        }
    }
}

pub fn patch_document(
    text: &str,
    suites: &[TestSuite],
    date: NaiveDate,
    options: &PatchOptions,
) -> String {
    let text = replace_test_count(text, total_cases(suites));
    let text = replace_last_updated(&text, date);
    let section = render_section(suites, &options.section_heading);
    upsert_section(&text, &section, options)
}

pub fn replace_test_count(text: &str, total: usize) -> String {
    TEST_COUNT
        .replacen(text, 1, regex::NoExpand(&format!("{total} unit tests")))
        .into_owned()
}

pub fn replace_last_updated(text: &str, date: NaiveDate) -> String {
    let date = date.format("%Y-%m-%d").to_string();
    LAST_UPDATED
        .replacen(text, 1, |caps: &Captures| {
            let bold = caps.name("bold").map_or("", |m| m.as_str());
            let tail = caps.name("tail").map_or("", |m| m.as_str());
            format!("Last Updated:{bold} {date}{tail}")
        })
        .into_owned()
}

/// Render the coverage section: heading, then one subheading and bullet list
/// per non-empty suite. Always ends with exactly one newline.
pub fn render_section(suites: &[TestSuite], heading: &str) -> String {
    let blocks: Vec<String> = suites
        .iter()
        .filter(|suite| !suite.cases.is_empty())
        .map(|suite| {
            let bullets: String = suite
                .cases
                .iter()
                .map(|case| format!("- **{}**: {}\n", case.name, case.description))
                .collect();
            format!("### {}\n\n{}", suite.name, bullets)
        })
        .collect();

    let body = if blocks.is_empty() {
        format!("{NO_CASES}\n")
    } else {
        blocks.join("\n")
    };

    format!("{}\n\n{}", heading.trim(), body)
}

pub fn upsert_section(text: &str, section: &str, options: &PatchOptions) -> String {
    if let Some((start, end)) = find_section(text, &options.section_heading) {
        let mut out = String::with_capacity(text.len() + section.len());
        out.push_str(&text[..start]);
        out.push_str(section);
        if end < text.len() {
            out.push('\n');
        }
        out.push_str(&text[end..]);
        return out;
    }

    if let Some(anchor) = find_heading(text, &options.anchor_heading) {
        let mut out = separated_prefix(&text[..anchor]);
        out.push_str(section);
        out.push('\n');
        out.push_str(&text[anchor..]);
        return out;
    }

    let mut out = separated_prefix(text);
    out.push_str(section);
    out
}

/// The prefix followed by a blank line, unless it is empty.
fn separated_prefix(prefix: &str) -> String {
    let mut out = prefix.to_string();
    if out.is_empty() {
        return out;
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    if !out.ends_with("\n\n") {
        out.push('\n');
    }
    out
}

/// Level of an ATX heading line (`#` count), if the line is one.
pub(crate) fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim_end();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    match trimmed[level..].chars().next() {
        None | Some(' ') | Some('\t') => Some(level),
        _ => None,
    }
}

/// Byte offset and text of every line outside fenced code blocks.
fn unfenced_lines(text: &str) -> Vec<(usize, &str)> {
    let mut lines = Vec::new();
    let mut offset = 0;
    let mut in_fence = false;

    for raw in text.split_inclusive('\n') {
        let line = raw.trim_end_matches(['\n', '\r']);
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
        } else if !in_fence {
            lines.push((offset, line));
        }
        offset += raw.len();
    }

    lines
}

fn find_heading(text: &str, heading: &str) -> Option<usize> {
    let heading = heading.trim();
    unfenced_lines(text)
        .into_iter()
        .find(|(_, line)| line.trim_end() == heading)
        .map(|(offset, _)| offset)
}

/// Byte range of the section starting at `heading`, ending before the next
/// heading of the same or higher level.
fn find_section(text: &str, heading: &str) -> Option<(usize, usize)> {
    let heading = heading.trim();
    let level = heading_level(heading)?;
    let lines = unfenced_lines(text);
    let position = lines
        .iter()
        .position(|(_, line)| line.trim_end() == heading)?;
    let start = lines[position].0;

    let end = lines[position + 1..]
        .iter()
        .find(|(_, line)| heading_level(line).is_some_and(|l| l <= level))
        .map(|(offset, _)| *offset)
        .unwrap_or(text.len());

    Some((start, end))
}
