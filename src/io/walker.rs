use crate::errors::{Error, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

const SOURCE_EXTENSION: &str = "cs";

pub struct FileWalker {
    root: PathBuf,
    ignore_patterns: Vec<glob::Pattern>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ignore_patterns: vec![],
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Self {
        self.ignore_patterns = patterns
            .iter()
            .filter_map(|pattern| match glob::Pattern::new(pattern) {
                Ok(compiled) => Some(compiled),
                Err(e) => {
                    log::warn!("Ignoring invalid glob pattern {:?}: {}", pattern, e);
                    None
                }
            })
            .collect();
        self
    }

    /// C# files under the root, honouring `.gitignore`, in a stable order.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| {
                Error::io(
                    &self.root,
                    std::io::Error::new(std::io::ErrorKind::Other, e.to_string()),
                )
            })?;
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let is_source = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SOURCE_EXTENSION));
        if !is_source {
            return false;
        }

        !self
            .ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(path))
    }
}

/// Paths given on the command line, resolved to files.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Targets {
    pub files: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

/// Files are taken as given (whatever their extension); directories are walked.
pub fn collect_targets(paths: &[PathBuf], ignore_patterns: &[String]) -> Result<Targets> {
    let mut targets = Targets::default();

    for path in paths {
        if path.is_dir() {
            let found = FileWalker::new(path.clone())
                .with_ignore_patterns(ignore_patterns)
                .walk()?;
            log::debug!("Found {} C# files under {}", found.len(), path.display());
            targets.files.extend(found);
        } else if path.is_file() {
            targets.files.push(path.clone());
        } else {
            targets.missing.push(path.clone());
        }
    }

    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "class A { }").unwrap();
        path
    }

    #[test]
    fn test_walk_finds_only_csharp_files() {
        let dir = TempDir::new().unwrap();
        let player = touch(dir.path(), "Assets/Player.cs");
        let enemy = touch(dir.path(), "Assets/AI/Enemy.cs");
        touch(dir.path(), "Assets/Player.cs.meta");
        touch(dir.path(), "README.md");

        let files = FileWalker::new(dir.path().to_path_buf()).walk().unwrap();

        assert_eq!(files, vec![enemy, player]);
    }

    #[test]
    fn test_walk_applies_ignore_patterns() {
        let dir = TempDir::new().unwrap();
        let kept = touch(dir.path(), "Assets/Player.cs");
        touch(dir.path(), "Library/PackageCache/Thing.cs");

        let files = FileWalker::new(dir.path().to_path_buf())
            .with_ignore_patterns(&["**/Library/**".to_string()])
            .walk()
            .unwrap();

        assert_eq!(files, vec![kept]);
    }

    #[test]
    fn test_collect_targets_splits_missing_paths() {
        let dir = TempDir::new().unwrap();
        let file = touch(dir.path(), "Single.txt");
        let missing = dir.path().join("Nope.cs");

        let targets = collect_targets(&[file.clone(), missing.clone()], &[]).unwrap();

        assert_eq!(targets.files, vec![file]);
        assert_eq!(targets.missing, vec![missing]);
    }
}
