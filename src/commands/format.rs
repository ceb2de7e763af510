//! Reorganize a batch of files.

use crate::io;
use crate::rewrite::{process_source, ClassReport, RewriteOptions};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Overwrite changed files
    InPlace,
    /// Write nothing; report files that would change
    Check,
    /// Return the new text for printing
    Stdout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Formatted,
    Unchanged,
    WouldReformat,
    Printed(String),
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
    pub classes: Vec<ClassReport>,
}

/// Read, reorganize and (depending on `mode`) write back one file.
pub fn format_file(path: &Path, options: &RewriteOptions, mode: WriteMode) -> Result<FileReport> {
    let source = io::read_file(path)?;
    let rewritten = process_source(&source, options).map_err(|e| e.with_path(path))?;
    let changed = rewritten.changed(&source);

    let outcome = match mode {
        WriteMode::Stdout => FileOutcome::Printed(rewritten.text),
        WriteMode::Check if changed => FileOutcome::WouldReformat,
        WriteMode::InPlace if changed => {
            io::write_file_atomic(path, &rewritten.text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Rewrote {}", path.display());
            FileOutcome::Formatted
        }
        WriteMode::Check | WriteMode::InPlace => FileOutcome::Unchanged,
    };

    Ok(FileReport {
        path: path.to_path_buf(),
        outcome,
        classes: rewritten.classes,
    })
}

/// Process files in parallel; results come back in input order.
pub fn format_files(
    paths: &[PathBuf],
    options: &RewriteOptions,
    mode: WriteMode,
) -> Vec<(PathBuf, Result<FileReport>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), format_file(path, options, mode)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const UNSORTED: &str = "class A\n{\n    void Update() { }\n    int hp;\n}\n";

    fn script(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_in_place_rewrites_changed_file() {
        let dir = TempDir::new().unwrap();
        let path = script(&dir, "A.cs", UNSORTED);

        let report = format_file(&path, &RewriteOptions::default(), WriteMode::InPlace).unwrap();

        assert_eq!(report.outcome, FileOutcome::Formatted);
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("#region === RUNTIME DATA ==="));

        let again = format_file(&path, &RewriteOptions::default(), WriteMode::InPlace).unwrap();
        assert_eq!(again.outcome, FileOutcome::Unchanged);
        assert_eq!(fs::read_to_string(&path).unwrap(), written);
    }

    #[test]
    fn test_check_mode_never_writes() {
        let dir = TempDir::new().unwrap();
        let path = script(&dir, "A.cs", UNSORTED);

        let report = format_file(&path, &RewriteOptions::default(), WriteMode::Check).unwrap();

        assert_eq!(report.outcome, FileOutcome::WouldReformat);
        assert_eq!(fs::read_to_string(&path).unwrap(), UNSORTED);
    }

    #[test]
    fn test_stdout_mode_returns_text() {
        let dir = TempDir::new().unwrap();
        let path = script(&dir, "A.cs", UNSORTED);

        let report = format_file(&path, &RewriteOptions::default(), WriteMode::Stdout).unwrap();

        match report.outcome {
            FileOutcome::Printed(text) => assert!(text.contains("#region === UNITY LIFECYCLE ===")),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), UNSORTED);
    }

    #[test]
    fn test_format_files_keeps_order_and_errors() {
        let dir = TempDir::new().unwrap();
        let first = script(&dir, "A.cs", UNSORTED);
        let missing = dir.path().join("Gone.cs");
        let last = script(&dir, "B.cs", "class B { }\n");

        let results = format_files(
            &[first.clone(), missing.clone(), last.clone()],
            &RewriteOptions::default(),
            WriteMode::Check,
        );

        let paths: Vec<&PathBuf> = results.iter().map(|(p, _)| p).collect();
        assert_eq!(paths, vec![&first, &missing, &last]);
        assert!(results[0].1.is_ok());
        assert!(results[1].1.is_err());
        assert_eq!(
            results[2].1.as_ref().unwrap().outcome,
            FileOutcome::Unchanged
        );
    }
}
