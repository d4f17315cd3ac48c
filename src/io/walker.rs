use crate::core::ComponentRecord;
use crate::errors::AnalysisError;
use crate::io::FileSystem;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Naming conventions for locating a component's files inside its directory.
#[derive(Debug, Clone)]
pub struct ComponentLayout {
    pub source_extension: String,
    pub test_suffixes: Vec<String>,
    pub ignore_patterns: Vec<glob::Pattern>,
}

impl Default for ComponentLayout {
    fn default() -> Self {
        Self {
            source_extension: "ts".to_string(),
            test_suffixes: vec![".test.ts".to_string(), ".spec.ts".to_string()],
            ignore_patterns: Vec::new(),
        }
    }
}

impl ComponentLayout {
    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        self.ignore_patterns = patterns
            .iter()
            .filter_map(|p| match glob::Pattern::new(p) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    log::warn!("Ignoring invalid ignore pattern '{}': {}", p, e);
                    None
                }
            })
            .collect();
        self
    }

    pub fn source_path(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{}.{}", name, self.source_extension))
    }

    /// `<name><suffix>` or `<name>.<variant><suffix>`, e.g. `button.test.ts`
    /// or `button.a11y.test.ts`.
    pub fn is_test_file(&self, name: &str, file_name: &str) -> bool {
        self.test_suffixes.iter().any(|suffix| {
            file_name
                .strip_suffix(suffix.as_str())
                .is_some_and(|stem| stem == name || stem.starts_with(&format!("{name}.")))
        })
    }

    fn is_ignored(&self, name: &str) -> bool {
        self.ignore_patterns.iter().any(|p| p.matches(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDir {
    pub name: String,
    pub path: PathBuf,
}

/// List component directories directly under `root`, sorted by name.
///
/// Failing to read the root is fatal for the whole run.
pub fn discover_components(
    root: &Path,
    layout: &ComponentLayout,
) -> Result<Vec<ComponentDir>, AnalysisError> {
    if !root.is_dir() {
        return Err(AnalysisError::io_with_path(
            "Component root is not a readable directory",
            root,
        ));
    }

    let mut components = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| {
            AnalysisError::io_with_path(format!("Failed to list components: {}", e), root)
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || layout.is_ignored(&name) {
            log::debug!("Ignoring component directory {}", name);
            continue;
        }

        components.push(ComponentDir {
            name,
            path: entry.path().to_path_buf(),
        });
    }

    Ok(components)
}

/// Test documents belonging to a component, searched in the component
/// directory and one level of subdirectories, sorted by path.
pub fn find_test_files(dir: &ComponentDir, layout: &ComponentLayout) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(&dir.path)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.path.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| layout.is_test_file(&dir.name, &entry.file_name().to_string_lossy()))
        .map(|entry| entry.path().to_path_buf())
        .collect();

    files.sort();
    files
}

/// Load a component's primary source and test documents.
///
/// A missing primary source yields `MissingInput`; no test documents is not
/// an error and produces a record with an empty test corpus.
pub fn load_component<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &ComponentDir,
    layout: &ComponentLayout,
) -> Result<ComponentRecord, AnalysisError> {
    let source_path = layout.source_path(&dir.path, &dir.name);
    if !fs.is_file(&source_path) {
        return Err(AnalysisError::missing_input(source_path));
    }

    let source_text = fs.read_to_string(&source_path)?;
    let mut record = ComponentRecord::new(dir.name.clone(), source_path, source_text);

    for test_path in find_test_files(dir, layout) {
        let text = fs.read_to_string(&test_path)?;
        record = record.with_test(test_path, text);
    }

    if !record.has_tests() {
        log::info!("{}: no test documents found", dir.name);
    }

    Ok(record)
}
