use chrono::NaiveDate;
use gapmap::core::{TestCase, TestSuite};
use gapmap::{patch_document, DescriptionInferencer, PatchOptions, PatternMatcher, PatternTable};
use proptest::prelude::*;

fn suite_strategy() -> impl Strategy<Value = Vec<TestSuite>> {
    prop::collection::vec(
        ("[A-Z][a-z]{0,8}", prop::collection::vec("[a-z ]{1,20}", 0..4)),
        0..4,
    )
    .prop_map(|suites| {
        suites
            .into_iter()
            .map(|(name, cases)| TestSuite {
                cases: cases
                    .into_iter()
                    .enumerate()
                    .map(|(i, case)| TestCase {
                        description: DescriptionInferencer::builtin().describe(&case),
                        name: case,
                        suite_name: name.clone(),
                        source_line: i + 1,
                    })
                    .collect(),
                name,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn describe_is_total(name in "\\PC*") {
        let description = DescriptionInferencer::builtin().describe(&name);
        prop_assert!(!description.is_empty());
        prop_assert!(description.ends_with('.'));
    }

    #[test]
    fn matcher_reports_every_category(text in "\\PC{0,200}") {
        let table = PatternTable::builtin();
        let matches = PatternMatcher::new(table).match_source(&text);
        prop_assert_eq!(matches.len(), table.categories().len());
        for name in table.category_names() {
            prop_assert!(matches.contains_category(name));
        }
    }

    #[test]
    fn patching_is_idempotent(
        prefix in "[a-zA-Z .\n]{0,80}",
        suites in suite_strategy(),
    ) {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let options = PatchOptions::default();
        let doc = format!("# Title\n\n{prefix}");

        let once = patch_document(&doc, &suites, date, &options);
        let twice = patch_document(&once, &suites, date, &options);
        prop_assert_eq!(once, twice);
    }
}
