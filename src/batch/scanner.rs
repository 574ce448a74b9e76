//! Directory scanning for batch hashing

use crate::core::error::{DftsError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Entries that could not be read during a scan
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Regular files, in walk order sorted by path
    pub files: Vec<PathBuf>,
    /// Paths (when known) and the reason they were skipped
    pub errors: Vec<(Option<PathBuf>, String)>,
}

/// Recursively collect the regular files below `dir`.
///
/// Symbolic links are not followed, so a link cycle cannot stall the walk.
pub fn scan_files(dir: &Path) -> Result<ScanResult> {
    if !dir.exists() {
        return Err(DftsError::file_not_found(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(DftsError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut result = ScanResult::default();
    let walker = WalkDir::new(dir).follow_links(false).sort_by_file_name();

    for entry in walker {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    result.files.push(entry.into_path());
                }
            },
            Err(e) => {
                let path = e.path().map(Path::to_path_buf);
                tracing::warn!(path = ?path, error = %e, "skipping unreadable entry");
                result.errors.push((path, e.to_string()));
            },
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_collects_nested_files() -> Result<()> {
        let temp_dir = TempDir::new()?;
        std::fs::create_dir_all(temp_dir.path().join("nested/deeper"))?;
        std::fs::write(temp_dir.path().join("top.txt"), b"top")?;
        std::fs::write(temp_dir.path().join("nested/mid.txt"), b"mid")?;
        std::fs::write(temp_dir.path().join("nested/deeper/low.txt"), b"low")?;

        let result = scan_files(temp_dir.path())?;
        assert_eq!(result.files.len(), 3);
        assert!(result.errors.is_empty());
        assert!(result.files.iter().all(|p| p.is_file()));
        Ok(())
    }

    #[test]
    fn test_scan_rejects_missing_directory() {
        let err = scan_files(Path::new("/no/such/dir/for/dfts")).unwrap_err();
        assert!(matches!(err, DftsError::FileNotFound { .. }));
    }

    #[test]
    fn test_scan_rejects_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let file = temp_dir.path().join("plain.txt");
        std::fs::write(&file, b"x")?;
        assert!(matches!(
            scan_files(&file).unwrap_err(),
            DftsError::NotADirectory { .. }
        ));
        Ok(())
    }
}
