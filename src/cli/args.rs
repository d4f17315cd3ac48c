use crate::io::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gapmap")]
#[command(about = "Test gap analyzer and test documentation generator for UI components", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report risky component behavior that the tests never exercise
    Analyze {
        /// Project directory; the component root is resolved against it
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format (defaults to the configured format, then terminal)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of gaps tolerated before exiting with status 1
        #[arg(long = "max-gaps")]
        max_gaps: Option<usize>,

        /// Configuration file (defaults to discovering .gapmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of parallel jobs (0 = use all cores)
        #[arg(short = 'j', long = "jobs", default_value = "0", env = "GAPMAP_JOBS")]
        jobs: usize,

        /// Disable colored output
        #[arg(long = "plain")]
        plain: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Regenerate the test coverage section of each component's documentation
    Docs {
        /// Project directory; the component root is resolved against it
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Only document the named component
        #[arg(long)]
        component: Option<String>,

        /// Report what would change without writing any file
        #[arg(long = "dry-run")]
        dry_run: bool,

        /// Configuration file (defaults to discovering .gapmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize a gapmap configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Self::Analyze { verbosity, .. } | Self::Docs { verbosity, .. } => *verbosity,
            Self::Init { .. } => 0,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
