//! CLI command implementations.
//!
//! - **analyze**: find untested risk patterns and report gaps
//! - **docs**: regenerate the test coverage section of component documentation
//! - **init**: write a default `.gapmap.toml`

pub mod analyze;
pub mod docs;
pub mod init;

pub use analyze::{analyze_components, handle_analyze, AnalyzeConfig, AnalyzeOutcome};
pub use docs::{generate_docs, handle_docs, DocsSummary, GenerateDocsConfig};
pub use init::init_config;
