use anyhow::Result;
use gapmap::cli::{self, Commands};
use gapmap::commands::{self, AnalyzeConfig, GenerateDocsConfig};
use std::process::ExitCode;

/// Gaps above the configured tolerance
const EXIT_GAPS: u8 = 1;
/// Configuration, discovery or output failure
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = cli::parse_args();
    cli::init_logging(cli.command.verbosity());

    match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Analyze {
            path,
            format,
            output,
            max_gaps,
            config,
            jobs,
            plain,
            verbosity: _,
        } => {
            cli::configure_thread_pool(jobs);
            let outcome = commands::handle_analyze(AnalyzeConfig {
                path,
                format,
                output,
                max_gaps,
                config,
                plain,
            })?;

            if outcome.within_tolerance() {
                Ok(ExitCode::SUCCESS)
            } else {
                log::warn!(
                    "{} gap(s) found, {} tolerated",
                    outcome.total_gaps,
                    outcome.max_gaps
                );
                Ok(ExitCode::from(EXIT_GAPS))
            }
        }
        Commands::Docs {
            path,
            component,
            dry_run,
            config,
            verbosity: _,
        } => {
            commands::handle_docs(GenerateDocsConfig {
                path,
                component,
                dry_run,
                config,
            })?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Init { force } => {
            commands::init_config(force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
