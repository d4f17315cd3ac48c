use chrono::NaiveDate;
use gapmap::core::DEFAULT_SUITE;
use gapmap::io::RealFileSystem;
use gapmap::{
    collect_suites, extract_test_cases, group_by_suite, patch_document, update_component_docs,
    ComponentRecord, DescriptionInferencer, DocSettings, PatchOptions, PatchOutcome,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const BUTTON_TESTS: &str = indoc! {r#"
    import { fixture } from '@open-wc/testing';

    describe('Button', () => {
      it('should render', async () => {});
      it('should emit press event', async () => {});
      // it('should be skipped', () => {});
    });

    describe('Button states', () => {
      it("should not respond when disabled", () => {});
      test(`should toggle pressed when clicked`, () => {});
    });
"#};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

fn button() -> ComponentRecord {
    ComponentRecord::new("button", PathBuf::from("button/button.ts"), String::new()).with_test(
        PathBuf::from("button/button.test.ts"),
        BUTTON_TESTS.to_string(),
    )
}

#[test]
fn test_extraction_assigns_suites_and_lines() {
    let cases = extract_test_cases(BUTTON_TESTS, DescriptionInferencer::builtin(), DEFAULT_SUITE);

    let summary: Vec<(&str, &str, usize)> = cases
        .iter()
        .map(|c| (c.suite_name.as_str(), c.name.as_str(), c.source_line))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Button", "should render", 4),
            ("Button", "should emit press event", 5),
            ("Button states", "should not respond when disabled", 10),
            ("Button states", "should toggle pressed when clicked", 11),
        ]
    );

    let suites = group_by_suite(cases);
    assert_eq!(suites.len(), 2);
    assert_eq!(
        suites[1].cases[1].description,
        "Verifies that component toggle pressed when clicked."
    );
}

#[test]
fn test_patch_inserts_before_api_reference() {
    let doc = indoc! {"
        # Button

        Covered by 3 unit tests.

        **Last Updated:** 2023-05-01

        ## Usage

        Click it.

        ## API Reference

        | Prop | Type |
    "};
    let suites = collect_suites(&button(), DescriptionInferencer::builtin(), DEFAULT_SUITE);

    let patched = patch_document(doc, &suites, date(), &PatchOptions::default());

    let expected = indoc! {"
        # Button

        Covered by 4 unit tests.

        **Last Updated:** 2024-03-09

        ## Usage

        Click it.

        ## Test Coverage

        ### Button

        - **should render**: Verifies that the component renders correctly with default configuration.
        - **should emit press event**: Verifies that the component emits the press event.

        ### Button states

        - **should not respond when disabled**: Verifies that the disabled state prevents user interaction.
        - **should toggle pressed when clicked**: Verifies that component toggle pressed when clicked.

        ## API Reference

        | Prop | Type |
    "};
    assert_eq!(patched, expected);

    let again = patch_document(&patched, &suites, date(), &PatchOptions::default());
    assert_eq!(again, patched);
}

#[test]
fn test_metadata_lines_stay_well_formed_across_patches() {
    let suites = collect_suites(&button(), DescriptionInferencer::builtin(), DEFAULT_SUITE);
    let options = PatchOptions::default();

    let bold = "# Tabs\n\n**Last Updated: 2020-01-01**\n\nBacked by 1,234 unit tests.\n";
    let once = patch_document(bold, &suites, date(), &options);
    assert!(once.starts_with(
        "# Tabs\n\n**Last Updated: 2024-03-09**\n\nBacked by 4 unit tests.\n\n## Test Coverage\n"
    ));
    assert_eq!(patch_document(&once, &suites, date(), &options), once);

    let table = "| Status | Last Updated: 2020-01-01 | 9 unit tests |\n";
    let once = patch_document(table, &suites, date(), &options);
    assert!(once.starts_with("| Status | Last Updated: 2024-03-09 | 4 unit tests |\n\n"));
    assert_eq!(patch_document(&once, &suites, date(), &options), once);
}

#[test]
fn test_patch_appends_without_anchor() {
    let doc = "# Chip\n\nA small chip.";
    let patched = patch_document(doc, &[], date(), &PatchOptions::default());

    assert_eq!(
        patched,
        "# Chip\n\nA small chip.\n\n## Test Coverage\n\n_No test cases found._\n"
    );
    assert_eq!(
        patch_document(&patched, &[], date(), &PatchOptions::default()),
        patched
    );
}

#[test]
fn test_update_component_docs_on_disk() {
    let dir = TempDir::new().unwrap();
    let doc_path = dir.path().join("README.md");
    fs::write(&doc_path, "# Button\n\n## Test Coverage\n\nstale\n\n## API Reference\n").unwrap();

    let options = PatchOptions::default();
    let settings = DocSettings {
        inferencer: DescriptionInferencer::builtin(),
        options: &options,
        default_suite: DEFAULT_SUITE,
        date: date(),
        dry_run: false,
    };
    let fs_impl = RealFileSystem::new();

    let first = update_component_docs(&fs_impl, &button(), &doc_path, &settings).unwrap();
    let after_first = fs::read_to_string(&doc_path).unwrap();
    let second = update_component_docs(&fs_impl, &button(), &doc_path, &settings).unwrap();

    assert_eq!(
        first,
        PatchOutcome::Updated {
            path: doc_path.clone(),
            test_count: 4
        }
    );
    assert!(matches!(second, PatchOutcome::Unchanged { .. }));
    assert_eq!(fs::read_to_string(&doc_path).unwrap(), after_first);
    assert!(!after_first.contains("stale"));
    assert!(after_first.ends_with("\n\n## API Reference\n"));
}

#[test]
fn test_missing_documentation_is_skipped() {
    let dir = TempDir::new().unwrap();
    let options = PatchOptions::default();
    let settings = DocSettings {
        inferencer: DescriptionInferencer::builtin(),
        options: &options,
        default_suite: DEFAULT_SUITE,
        date: date(),
        dry_run: false,
    };

    let outcome = update_component_docs(
        &RealFileSystem::new(),
        &button(),
        &dir.path().join("README.md"),
        &settings,
    )
    .unwrap();

    assert!(outcome.is_skipped());
    assert!(!dir.path().join("README.md").exists());
}
