use crate::docs::{update_component_docs, DocSettings, PatchOutcome};
use crate::config::{self, GapmapConfig};
use crate::errors::AnalysisFailure;
use crate::formatting::{ColorEnv, FormattingConfig};
use crate::io::{discover_components, load_component, FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

pub struct GenerateDocsConfig {
    pub path: PathBuf,
    pub component: Option<String>,
    pub dry_run: bool,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Default)]
pub struct DocsSummary {
    pub outcomes: Vec<PatchOutcome>,
    pub failures: Vec<AnalysisFailure>,
}

impl DocsSummary {
    pub fn updated(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, PatchOutcome::Updated { .. }))
            .count()
    }
}

pub fn handle_docs(config: GenerateDocsConfig) -> Result<DocsSummary> {
    let project = config::resolve_config(&config.path, config.config.as_deref())?;
    let summary = generate_docs(&RealFileSystem::new(), &config, &project)?;
    FormattingConfig::resolve(false, project.use_color(), &ColorEnv::capture()).apply();
    print_summary(&summary, config.dry_run);
    Ok(summary)
}

/// Patch the documentation file of every selected component.
pub fn generate_docs<F: FileSystem + ?Sized>(
    fs: &F,
    config: &GenerateDocsConfig,
    project: &GapmapConfig,
) -> Result<DocsSummary> {
    let root = project.component_root(&config.path);
    let layout = project.layout();
    let docs = project.docs();
    let inferencer = project.description_inferencer()?;
    let options = project.patch_options();
    let settings = DocSettings {
        inferencer: &inferencer,
        options: &options,
        default_suite: &docs.default_suite,
        date: chrono::Local::now().date_naive(),
        dry_run: config.dry_run,
    };

    let mut dirs = discover_components(&root, &layout)
        .with_context(|| format!("Failed to list components in {}", root.display()))?;
    if let Some(name) = &config.component {
        dirs.retain(|dir| &dir.name == name);
        if dirs.is_empty() {
            anyhow::bail!("Component '{}' not found in {}", name, root.display());
        }
    }

    let mut summary = DocsSummary::default();
    for dir in &dirs {
        let doc_path = dir.path.join(&docs.file_name);
        let result = load_component(fs, dir, &layout)
            .and_then(|record| update_component_docs(fs, &record, &doc_path, &settings));

        match result {
            Ok(outcome) => summary.outcomes.push(outcome),
            Err(err) if err.is_skippable() => {
                log::warn!("Skipping {}: {}", dir.name, err);
                summary.outcomes.push(PatchOutcome::Skipped {
                    path: doc_path,
                    reason: err.to_string(),
                });
            }
            Err(err) => {
                log::warn!("Failed to document {}: {}", dir.name, err);
                let path = err.path().cloned().unwrap_or(doc_path);
                summary.failures.push(AnalysisFailure::doc_patch(path, &err));
            }
        }
    }

    Ok(summary)
}

fn print_summary(summary: &DocsSummary, dry_run: bool) {
    let verb = if dry_run { "would update" } else { "updated" };
    for outcome in &summary.outcomes {
        match outcome {
            PatchOutcome::Updated { path, test_count } => println!(
                "{} {} ({} tests)",
                verb.green(),
                path.display(),
                test_count
            ),
            PatchOutcome::Unchanged { path, .. } => {
                println!("{} {}", "unchanged".dimmed(), path.display())
            }
            PatchOutcome::Skipped { path, reason } => {
                println!("{} {}: {}", "skipped".yellow(), path.display(), reason)
            }
        }
    }
    for failure in &summary.failures {
        println!(
            "{} {} ({}): {}",
            "failed".red(),
            failure.path.display(),
            failure.operation.as_str(),
            failure.error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let components = dir.path().join("src/components");
        write(&components.join("chip/chip.ts"), "export class Chip {}");
        write(
            &components.join("chip/chip.test.ts"),
            "describe('Chip', () => { it('should render', () => {}); });",
        );
        write(&components.join("chip/README.md"), "# Chip\n");
        write(&components.join("tag/tag.ts"), "export class Tag {}");
        dir
    }

    fn run(path: &Path, component: Option<&str>) -> Result<DocsSummary> {
        generate_docs(
            &RealFileSystem::new(),
            &config(path, component),
            &GapmapConfig::default(),
        )
    }

    fn config(path: &Path, component: Option<&str>) -> GenerateDocsConfig {
        GenerateDocsConfig {
            path: path.to_path_buf(),
            component: component.map(String::from),
            dry_run: false,
            config: None,
        }
    }

    #[test]
    fn test_generate_docs_updates_and_skips() {
        let dir = project();
        let summary = run(dir.path(), None).unwrap();

        assert_eq!(summary.updated(), 1);
        assert_eq!(summary.outcomes.len(), 2);
        assert!(summary.outcomes[1].is_skipped());
        assert!(summary.failures.is_empty());

        let readme =
            fs::read_to_string(dir.path().join("src/components/chip/README.md")).unwrap();
        assert!(readme.contains("### Chip"));
    }

    #[test]
    fn test_generate_docs_single_component() {
        let dir = project();
        let summary = run(dir.path(), Some("tag")).unwrap();
        assert_eq!(summary.outcomes.len(), 1);
        assert!(summary.outcomes[0].is_skipped());
    }

    #[test]
    fn test_generate_docs_unknown_component() {
        let dir = project();
        assert!(run(dir.path(), Some("nope")).is_err());
    }
}
