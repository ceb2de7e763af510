pub mod walker;

pub use walker::{collect_targets, FileWalker, Targets};

use crate::errors::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Replace `path` with `content` through a temporary file in the same
/// directory, so a failed write never leaves a truncated script behind.
pub fn write_file_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    temp.write_all(content.as_bytes())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| Error::io(temp.path(), e))?;

    if let Ok(metadata) = fs::metadata(path) {
        // Keep the original file mode; the temp file is created 0600.
        let _ = fs::set_permissions(temp.path(), metadata.permissions());
    }

    temp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Player.cs");
        fs::write(&path, "class Player { }").unwrap();

        write_file_atomic(&path, "class Player\n{\n}\n").unwrap();

        assert_eq!(read_file(&path).unwrap(), "class Player\n{\n}\n");
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_read_missing_file_reports_path() {
        let err = read_file(Path::new("does/not/exist.cs")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.cs"));
    }
}
