use crate::core::Severity;
use crate::gaps::GapReport;
use anyhow::Result;
use colored::*;
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &GapReport) -> Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &GapReport) -> Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_report(&mut self, report: &GapReport) -> Result<()> {
        self.write_header(report)?;
        self.write_summary(report)?;
        self.write_buckets(report)?;
        self.write_problems(report)?;
        Ok(())
    }
}

impl<W: Write> MarkdownWriter<W> {
    fn write_header(&mut self, report: &GapReport) -> Result<()> {
        writeln!(self.writer, "# Test Gap Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Root: `{}`", report.root.display())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &GapReport) -> Result<()> {
        let summary = &report.summary;
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(
            self.writer,
            "| Components analyzed | {} |",
            summary.components_analyzed
        )?;
        writeln!(
            self.writer,
            "| Components skipped | {} |",
            summary.components_skipped
        )?;
        writeln!(self.writer, "| Failures | {} |", summary.failures)?;
        writeln!(self.writer, "| Total gaps | {} |", summary.total_gaps)?;
        writeln!(self.writer, "| High severity | {} |", summary.high)?;
        writeln!(self.writer, "| Medium severity | {} |", summary.medium)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_buckets(&mut self, report: &GapReport) -> Result<()> {
        for bucket in report.buckets.iter() {
            writeln!(
                self.writer,
                "## {} ({})",
                bucket.gap_type.display_name(),
                bucket.gaps.len()
            )?;
            writeln!(self.writer)?;
            for gap in &bucket.gaps {
                writeln!(
                    self.writer,
                    "- **{}** [{}]: {}. _{}_",
                    gap.component, gap.severity, gap.description, gap.recommendation
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_problems(&mut self, report: &GapReport) -> Result<()> {
        if report.skipped.is_empty() && report.failures.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "## Skipped and Failed")?;
        writeln!(self.writer)?;
        for skipped in &report.skipped {
            writeln!(self.writer, "- {} (skipped): {}", skipped.name, skipped.reason)?;
        }
        for failure in &report.failures {
            writeln!(
                self.writer,
                "- `{}` ({}): {}",
                failure.path.display(),
                failure.operation.as_str(),
                failure.error
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &GapReport) -> Result<()> {
        let summary = &report.summary;

        writeln!(self.writer, "{}", "Test Gap Analysis".bold())?;
        writeln!(self.writer, "{}", "=================".bold())?;
        writeln!(
            self.writer,
            "Analyzed {} component(s) in {}",
            summary.components_analyzed,
            report.root.display()
        )?;
        writeln!(self.writer)?;

        for bucket in report.buckets.iter() {
            writeln!(
                self.writer,
                "{} ({}):",
                bucket.gap_type.display_name().cyan().bold(),
                bucket.gaps.len()
            )?;
            for gap in &bucket.gaps {
                writeln!(
                    self.writer,
                    "  {} {} - {}",
                    severity_label(gap.severity),
                    gap.component.yellow(),
                    gap.description
                )?;
                writeln!(self.writer, "      -> {}", gap.recommendation.dimmed())?;
            }
            writeln!(self.writer)?;
        }

        for skipped in &report.skipped {
            writeln!(
                self.writer,
                "{} {}: {}",
                "skipped".yellow(),
                skipped.name,
                skipped.reason
            )?;
        }
        for failure in &report.failures {
            writeln!(
                self.writer,
                "{} {} ({}): {}",
                "failed".red(),
                failure.path.display(),
                failure.operation.as_str(),
                failure.error
            )?;
        }

        writeln!(
            self.writer,
            "Total gaps: {} ({} high, {} medium)",
            summary.total_gaps.to_string().bold(),
            summary.high.to_string().red(),
            summary.medium.to_string().yellow()
        )?;
        Ok(())
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    match severity {
        Severity::High => "[HIGH]".red().bold(),
        Severity::Medium => "[MEDIUM]".yellow(),
    }
}

pub fn create_writer<W: Write + 'static>(format: OutputFormat, writer: W) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
