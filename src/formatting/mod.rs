use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub emoji: bool,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            emoji: detect_color_support(),
        }
    }
}

impl FormattingConfig {
    /// ASCII-only, no colors
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            emoji: false,
        }
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }
}

/// Result of handling one path, as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Formatted,
    Unchanged,
    WouldReformat,
    NotFound,
    Failed,
}

impl Status {
    fn emoji(self) -> &'static str {
        match self {
            Self::Formatted => "✅",
            Self::Unchanged => "➖",
            Self::WouldReformat => "⚠️",
            Self::NotFound | Self::Failed => "❌",
        }
    }

    fn fallback(self) -> &'static str {
        match self {
            Self::Formatted => "[ok]",
            Self::Unchanged => "[--]",
            Self::WouldReformat => "[!!]",
            Self::NotFound | Self::Failed => "[x]",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Formatted => "Formatted",
            Self::Unchanged => "Unchanged",
            Self::WouldReformat => "Would reformat",
            Self::NotFound => "File not found",
            Self::Failed => "Error",
        }
    }
}

pub struct Formatter {
    config: FormattingConfig,
}

impl Formatter {
    pub fn new(config: FormattingConfig) -> Self {
        // Set colored control based on configuration
        colored::control::set_override(config.color.should_use_color());
        Self { config }
    }

    /// One status line, e.g. `✅ Formatted: Assets/Player.cs`.
    pub fn status(&self, status: Status, subject: &str) -> String {
        let marker = if self.config.emoji {
            status.emoji()
        } else {
            status.fallback()
        };
        format!("{} {}: {}", marker, self.paint(status, status.label()), subject)
    }

    fn paint(&self, status: Status, text: &str) -> String {
        if !self.config.color.should_use_color() {
            return text.to_string();
        }
        match status {
            Status::Formatted => text.green().to_string(),
            Status::Unchanged => text.dimmed().to_string(),
            Status::WouldReformat => text.yellow().to_string(),
            Status::NotFound | Status::Failed => text.red().to_string(),
        }
    }

    pub fn header(&self, text: &str) -> String {
        if self.config.color.should_use_color() {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}
