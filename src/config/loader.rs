use std::fs;
use std::path::{Path, PathBuf};

use super::core::{GapmapConfig, CONFIG_FILE_NAME};
use crate::docs::patch::heading_level;
use crate::errors::AnalysisError;

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<GapmapConfig, String> {
    let config = toml::from_str::<GapmapConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;

    if let Some(components) = &config.components {
        if components.test_suffixes.iter().any(|s| s.is_empty()) {
            return Err("components.test_suffixes must not contain empty suffixes".to_string());
        }
        if components.source_extension.trim_start_matches('.').is_empty() {
            return Err("components.source_extension must not be empty".to_string());
        }
    }

    if let Some(docs) = &config.docs {
        if heading_level(docs.section_heading.trim()).is_none() {
            return Err(format!(
                "docs.section_heading must be an ATX heading (1-6 '#' then a space), got '{}'",
                docs.section_heading
            ));
        }
    }

    Ok(config)
}

/// Load an explicitly requested config file. Any failure is an error.
pub fn load_config_from_path(path: &Path) -> Result<GapmapConfig, AnalysisError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        AnalysisError::config_with_path(format!("Failed to read config file: {}", e), path)
    })?;
    parse_and_validate_config(&contents).map_err(|e| AnalysisError::config_with_path(e, path))
}

/// Try one candidate location during discovery. Missing files are silent;
/// unreadable or invalid files are reported and skipped.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<GapmapConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!(
                    "Failed to read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.gapmap.toml`.
pub fn load_config_from(start: &Path) -> GapmapConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            GapmapConfig::default()
        })
}

/// Explicit config path when given, otherwise discovery from `start`.
pub fn resolve_config(
    start: &Path,
    explicit: Option<&Path>,
) -> Result<GapmapConfig, AnalysisError> {
    match explicit {
        Some(path) => load_config_from_path(path),
        None => Ok(load_config_from(start)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let contents = indoc! {r#"
            [components]
            root = "packages/ui"
            test_suffixes = [".test.ts"]
            ignore = ["internal-*"]

            [thresholds]
            max_gaps = 5

            [docs]
            file_name = "docs.md"

            [[docs.descriptions]]
            pattern = "^should toggle"
            template = "Tests toggling."

            [[patterns.categories]]
            name = "disabledStates"
            patterns = ["this\\.disabled"]

            [output]
            default_format = "json"
        "#};

        let config = parse_and_validate_config(contents).unwrap();
        let components = config.components.unwrap();
        assert_eq!(components.root, "packages/ui");
        assert_eq!(components.source_extension, "ts");
        assert_eq!(config.thresholds.unwrap().max_gaps, 5);

        let docs = config.docs.unwrap();
        assert_eq!(docs.file_name, "docs.md");
        assert_eq!(docs.section_heading, "## Test Coverage");
        assert_eq!(docs.descriptions.len(), 1);

        let patterns = config.patterns.unwrap();
        assert_eq!(patterns.categories[0].patterns, vec!["this\\.disabled"]);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(
            parse_and_validate_config("").unwrap(),
            GapmapConfig::default()
        );
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(parse_and_validate_config("[components]\ntest_suffixes = [\"\"]").is_err());
        assert!(parse_and_validate_config("[docs]\nsection_heading = \"Coverage\"").is_err());
        assert!(parse_and_validate_config("thresholds = 3").is_err());
    }

    #[test]
    fn test_section_heading_must_be_findable() {
        for heading in ["#Coverage", "####### Coverage", "Coverage #"] {
            let contents = format!("[docs]\nsection_heading = \"{heading}\"");
            let err = parse_and_validate_config(&contents).unwrap_err();
            assert!(err.contains("docs.section_heading"), "{heading}: {err}");
        }
        let config = parse_and_validate_config("[docs]\nsection_heading = \"### Tests\"").unwrap();
        assert_eq!(config.docs.unwrap().section_heading, "### Tests");
    }

    #[test]
    fn test_directory_ancestors() {
        let ancestors: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c"), 10).collect();
        assert_eq!(
            ancestors,
            vec![
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b"),
                PathBuf::from("/a"),
                PathBuf::from("/"),
            ]
        );
        assert_eq!(directory_ancestors(PathBuf::from("/a/b/c"), 2).count(), 2);
    }

    #[test]
    fn test_discovers_config_in_parent() {
        let root = TempDir::new().unwrap();
        let nested = root.path().join("packages/ui");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[thresholds]\nmax_gaps = 7\n",
        )
        .unwrap();

        let config = load_config_from(&nested);
        assert_eq!(config.thresholds.unwrap().max_gaps, 7);
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[thresholds]\nmax_gaps = 7\n",
        )
        .unwrap();
        let explicit = root.path().join("ci.toml");
        fs::write(&explicit, "[thresholds]\nmax_gaps = 2\n").unwrap();

        let discovered = resolve_config(root.path(), None).unwrap();
        assert_eq!(discovered.max_gaps(), 7);
        let chosen = resolve_config(root.path(), Some(&explicit)).unwrap();
        assert_eq!(chosen.max_gaps(), 2);
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let root = TempDir::new().unwrap();
        let err = load_config_from_path(&root.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, AnalysisError::Config { .. }));
    }
}
