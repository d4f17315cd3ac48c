//! Color decisions for terminal output.
//!
//! Precedence, highest first: `--plain`, `CLICOLOR_FORCE=1`, `NO_COLOR` or
//! `CLICOLOR=0`, `output.use_color` from the config file, then TTY detection.

use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::stdout().is_terminal(),
        }
    }
}

/// Color-related environment variables, captured once so resolution stays
/// a pure function.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorEnv {
    pub no_color: bool,
    pub clicolor: Option<String>,
    pub clicolor_force: Option<String>,
}

impl ColorEnv {
    pub fn capture() -> Self {
        Self {
            no_color: std::env::var_os("NO_COLOR").is_some(),
            clicolor: std::env::var("CLICOLOR").ok(),
            clicolor_force: std::env::var("CLICOLOR_FORCE").ok(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormattingConfig {
    pub color: ColorMode,
}

impl FormattingConfig {
    pub fn new(color: ColorMode) -> Self {
        Self { color }
    }

    pub fn plain() -> Self {
        Self::new(ColorMode::Never)
    }

    /// Resolve the color mode from every source that can set it.
    pub fn resolve(plain: bool, configured: Option<bool>, env: &ColorEnv) -> Self {
        if plain {
            return Self::plain();
        }
        if env.clicolor_force.as_deref() == Some("1") {
            return Self::new(ColorMode::Always);
        }
        if env.no_color || env.clicolor.as_deref() == Some("0") {
            return Self::plain();
        }
        match configured {
            Some(true) => Self::new(ColorMode::Always),
            Some(false) => Self::plain(),
            None => Self::default(),
        }
    }

    /// Apply the decision process-wide for `colored`.
    pub fn apply(&self) {
        colored::control::set_override(self.color.should_use_color());
    }
}
