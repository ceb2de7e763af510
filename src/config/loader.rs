use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::RegionsortConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".regionsort.toml";

/// Read and parse config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse config from TOML string
pub fn parse_config(contents: &str) -> std::result::Result<RegionsortConfig, String> {
    toml::from_str::<RegionsortConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Try loading config from a specific path, warning on anything but "not found"
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<RegionsortConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Directory ancestors of `start`, nearest first, up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search the current directory and its ancestors for `.regionsort.toml`
pub fn load_config() -> RegionsortConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            return RegionsortConfig::default();
        }
    };

    directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            RegionsortConfig::default()
        })
}

/// Load an explicitly requested config file; unlike discovery, failures are errors
pub fn load_config_from(path: &Path) -> Result<RegionsortConfig> {
    let contents = read_config_file(path).map_err(|e| Error::io(path, e))?;
    parse_config(&contents).map_err(|message| Error::Config {
        path: path.to_path_buf(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::DirectiveRule;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"
[classification]
directive_rule = "strict"

[layout]
recurse_nested = true

[files]
ignore = ["Assets/Plugins/**"]
"#,
        )
        .unwrap();

        assert_eq!(config.classification.directive_rule, DirectiveRule::Strict);
        assert!(config.layout.recurse_nested);
        assert_eq!(config.files.ignore, vec!["Assets/Plugins/**"]);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, RegionsortConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_rule() {
        let err = parse_config("[classification]\ndirective_rule = \"loose\"\n").unwrap_err();
        assert!(err.contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_directory_ancestors_is_bounded() {
        let dirs: Vec<PathBuf> = directory_ancestors(PathBuf::from("/a/b/c"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c"), PathBuf::from("/a/b")]);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nrecurse_nested = true").unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert!(config.layout.recurse_nested);
    }

    #[test]
    fn test_load_config_from_missing_file_is_error() {
        let err = load_config_from(Path::new("/definitely/not/here/.regionsort.toml"));
        assert!(matches!(err, Err(Error::Io { .. })));
    }

    #[test]
    fn test_try_load_invalid_config_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nrecurse_nested = \"yes please\"").unwrap();

        assert!(try_load_config_from_path(file.path()).is_none());
        assert!(matches!(
            load_config_from(file.path()),
            Err(Error::Config { .. })
        ));
    }
}
