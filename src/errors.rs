//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for regionsort operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The parser produced no tree at all
    #[error("Unable to parse {}: {message}", source_name(path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// The C# grammar could not be loaded into the parser
    #[error("Failed to load C# grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// Configuration errors
    #[error("Configuration error in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            path: None,
            message: message.into(),
        }
    }

    /// Attach a file path to a parse error that was raised without one.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Parse {
                path: None,
                message,
            } => Self::Parse {
                path: Some(path.into()),
                message,
            },
            other => other,
        }
    }
}

fn source_name(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "<source>".to_string(),
    }
}

/// Result type alias for regionsort operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_with_and_without_path() {
        let bare = Error::parse("parser returned no tree");
        assert_eq!(
            bare.to_string(),
            "Unable to parse <source>: parser returned no tree"
        );

        let located = Error::parse("parser returned no tree").with_path("Assets/Player.cs");
        assert_eq!(
            located.to_string(),
            "Unable to parse Assets/Player.cs: parser returned no tree"
        );
    }

    #[test]
    fn test_io_error_display() {
        let err = Error::io(
            "Assets/Missing.cs",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        );
        assert_eq!(err.to_string(), "Assets/Missing.cs: No such file");
    }
}
