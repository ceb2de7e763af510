//! `.regionsort.toml` configuration.

mod loader;

pub use loader::{directory_ancestors, load_config, load_config_from, parse_config, CONFIG_FILE_NAME};

use crate::classify::DirectiveRule;
use crate::rewrite::RewriteOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionsortConfig {
    #[serde(default)]
    pub classification: ClassificationConfig,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub files: FilesConfig,
}

/// How members are assigned to buckets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationConfig {
    /// Rule for `#if DEBUG` / `UNITY_EDITOR` guards (default: compatible)
    #[serde(default)]
    pub directive_rule: DirectiveRule,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Also reorganize classes nested in other classes (default: false)
    #[serde(default)]
    pub recurse_nested: bool,
}

/// Which files directory walks pick up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesConfig {
    /// Glob patterns excluded from directory walks
    #[serde(default = "default_ignore_patterns")]
    pub ignore: Vec<String>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            ignore: default_ignore_patterns(),
        }
    }
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        "**/Library/**".to_string(),
        "**/Temp/**".to_string(),
        "**/obj/**".to_string(),
    ]
}

impl RegionsortConfig {
    pub fn rewrite_options(&self) -> RewriteOptions {
        RewriteOptions {
            directive_rule: self.classification.directive_rule,
            recurse_nested: self.layout.recurse_nested,
        }
    }
}
