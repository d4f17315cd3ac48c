use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r###"# gapmap configuration

[components]
root = "src/components"
source_extension = "ts"
test_suffixes = [".test.ts", ".spec.ts"]
ignore = []

[thresholds]
max_gaps = 0

[docs]
file_name = "README.md"
section_heading = "## Test Coverage"
anchor_heading = "## API Reference"
default_suite = "General Tests"

# Extra description rules, tried before the built-in ones.
# [[docs.descriptions]]
# pattern = "^should toggle"
# template = "Tests toggle behavior."

# Replaces the built-in risk pattern table when present.
# [[patterns.categories]]
# name = "disabledStates"
# patterns = ["this\\.disabled"]

[output]
default_format = "terminal"
"###;

pub fn init_config(force: bool) -> Result<()> {
    init_config_in(Path::new("."), force)
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);

    Ok(())
}
