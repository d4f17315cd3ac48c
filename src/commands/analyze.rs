use crate::config;
use crate::errors::{AnalysisError, AnalysisFailure};
use crate::formatting::{ColorEnv, FormattingConfig};
use crate::gaps::{ComponentAnalysis, GapAnalyzer, GapReport, SkippedComponent};
use crate::io::output::{create_writer, OutputFormat};
use crate::io::{discover_components, load_component, ComponentDir, ComponentLayout, FileSystem};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub struct AnalyzeConfig {
    pub path: PathBuf,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub max_gaps: Option<usize>,
    pub config: Option<PathBuf>,
    pub plain: bool,
}

/// Result of one analyze run, used by `main` to pick the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyzeOutcome {
    pub total_gaps: usize,
    pub max_gaps: usize,
}

impl AnalyzeOutcome {
    pub fn within_tolerance(&self) -> bool {
        self.total_gaps <= self.max_gaps
    }
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<AnalyzeOutcome> {
    let project = config::resolve_config(&config.path, config.config.as_deref())?;
    let root = project.component_root(&config.path);
    let layout = project.layout();
    let table = project.pattern_table()?;
    let rules = crate::gaps::default_rules();
    let analyzer = GapAnalyzer::new(&table, rules);

    let report = analyze_components(&crate::io::RealFileSystem::new(), &root, &layout, &analyzer)
        .with_context(|| format!("Failed to analyze components in {}", root.display()))?;

    let format = config.format.unwrap_or_else(|| project.default_format());
    let max_gaps = config.max_gaps.unwrap_or_else(|| project.max_gaps());
    let formatting = FormattingConfig::resolve(
        config.plain,
        project.use_color(),
        &ColorEnv::capture(),
    );
    write_report(&report, format, config.output.as_deref(), formatting)?;

    Ok(AnalyzeOutcome {
        total_gaps: report.total_gaps(),
        max_gaps,
    })
}

enum ComponentResult {
    Analyzed(ComponentAnalysis),
    Skipped(SkippedComponent),
    Failed(AnalysisFailure),
}

/// Discover, load and analyze every component under `root`.
///
/// Components are processed in parallel; results keep directory order.
/// Only a failure to list `root` is returned as an error.
pub fn analyze_components<F: FileSystem + ?Sized>(
    fs: &F,
    root: &Path,
    layout: &ComponentLayout,
    analyzer: &GapAnalyzer<'_>,
) -> Result<GapReport, AnalysisError> {
    let dirs = discover_components(root, layout)?;
    log::info!("Found {} component(s) in {}", dirs.len(), root.display());

    let results: Vec<ComponentResult> = dirs
        .par_iter()
        .map(|dir| analyze_component(fs, dir, layout, analyzer))
        .collect();

    let mut analyzed = Vec::new();
    let mut skipped = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            ComponentResult::Analyzed(analysis) => analyzed.push(analysis),
            ComponentResult::Skipped(skip) => skipped.push(skip),
            ComponentResult::Failed(failure) => failures.push(failure),
        }
    }

    Ok(GapReport::build(
        root.to_path_buf(),
        analyzed,
        skipped,
        failures,
    ))
}

fn analyze_component<F: FileSystem + ?Sized>(
    fs: &F,
    dir: &ComponentDir,
    layout: &ComponentLayout,
    analyzer: &GapAnalyzer<'_>,
) -> ComponentResult {
    match load_component(fs, dir, layout) {
        Ok(record) => ComponentResult::Analyzed(analyzer.analyze(&record)),
        Err(err) if err.is_skippable() => {
            log::warn!("Skipping {}: {}", dir.name, err);
            ComponentResult::Skipped(SkippedComponent {
                name: dir.name.clone(),
                reason: err.to_string(),
            })
        }
        Err(err) => {
            log::warn!("Failed to analyze {}: {}", dir.name, err);
            let path = err.path().cloned().unwrap_or_else(|| dir.path.clone());
            ComponentResult::Failed(AnalysisFailure::from_load_error(path, &err))
        }
    }
}

fn write_report(
    report: &GapReport,
    format: OutputFormat,
    output: Option<&Path>,
    formatting_config: FormattingConfig,
) -> Result<()> {
    match output {
        Some(path) => {
            // Escape codes never go to files.
            colored::control::set_override(false);
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            create_writer(format, BufWriter::new(file)).write_report(report)?;
            log::info!("Report written to {}", path.display());
        }
        None => {
            formatting_config.apply();
            create_writer(format, std::io::stdout()).write_report(report)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GapType;
    use crate::io::RealFileSystem;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_analyze_components_partitions_results() {
        let root = TempDir::new().unwrap();
        write(
            &root.path().join("button/button.ts"),
            "if (this.disabled) return;",
        );
        write(
            &root.path().join("button/button.test.ts"),
            "it('ignores click when disabled', () => {});",
        );
        fs::create_dir_all(root.path().join("ghost")).unwrap();
        write(&root.path().join("broken/broken.ts"), "ok");
        fs::write(root.path().join("broken/broken.test.ts"), [0xff, 0xfe]).unwrap();

        let report = analyze_components(
            &RealFileSystem::new(),
            root.path(),
            &ComponentLayout::default(),
            &GapAnalyzer::with_defaults(),
        )
        .unwrap();

        let names: Vec<_> = report.components.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["button"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].name, "ghost");
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].path.ends_with("broken.test.ts"));
        assert!(report.buckets.get(GapType::DisabledState).is_empty());
    }

    #[test]
    fn test_analyze_components_missing_root() {
        let root = TempDir::new().unwrap();
        let result = analyze_components(
            &RealFileSystem::new(),
            &root.path().join("nope"),
            &ComponentLayout::default(),
            &GapAnalyzer::with_defaults(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_outcome_tolerance() {
        let outcome = AnalyzeOutcome {
            total_gaps: 2,
            max_gaps: 2,
        };
        assert!(outcome.within_tolerance());
        assert!(!AnalyzeOutcome {
            total_gaps: 3,
            max_gaps: 2
        }
        .within_tolerance());
    }
}
