//! Sorted directory listings. Loaders sort everything they enumerate so
//! scene and frame order never depends on the filesystem.

use crate::source::SourceError;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn sorted_subdirs(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| SourceError::io(dir, e))? {
        let path = entry.map_err(|e| SourceError::io(dir, e))?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Regular files in `dir` with the given extension.
pub(crate) fn sorted_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, SourceError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| SourceError::io(dir, e))? {
        let path = entry.map_err(|e| SourceError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

pub(crate) fn file_name_string(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub(crate) fn file_stem_string(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_files_filters_extension() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", "c.txt"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        fs::create_dir(dir.path().join("d.png")).unwrap();

        let files: Vec<String> = sorted_files(dir.path(), "png")
            .unwrap()
            .iter()
            .map(|p| file_name_string(p))
            .collect();
        assert_eq!(files, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_sorted_subdirs_skips_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("z")).unwrap();
        fs::create_dir(dir.path().join("m")).unwrap();
        fs::write(dir.path().join("calib.txt"), b"").unwrap();

        let dirs: Vec<String> = sorted_subdirs(dir.path())
            .unwrap()
            .iter()
            .map(|p| file_name_string(p))
            .collect();
        assert_eq!(dirs, vec!["m", "z"]);
    }

    #[test]
    fn test_missing_dir_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = sorted_files(&dir.path().join("missing"), "png").unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
