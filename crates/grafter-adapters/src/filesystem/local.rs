//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use grafter_core::{
    application::{
        ApplicationError,
        ports::{DirEntry, Filesystem},
    },
    error::{GrafterError, GrafterResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> GrafterResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> GrafterResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_to_string(&self, path: &Path) -> GrafterResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn read_dir(&self, path: &Path) -> GrafterResult<Vec<DirEntry>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path).map_err(|e| map_io_error(path, e, "list directory"))? {
            let entry = entry.map_err(|e| map_io_error(path, e, "list directory"))?;
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.path().is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn copy_file(&self, from: &Path, to: &Path) -> GrafterResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| map_io_error(from, e, "copy file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove_dir_all(&self, path: &Path) -> GrafterResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> GrafterError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn read_dir_is_sorted_and_flags_directories() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("b_dir")).unwrap();
        std::fs::write(tmp.path().join("a.js"), "x").unwrap();

        let entries = LocalFilesystem.read_dir(tmp.path()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.js");
        assert!(!entries[0].is_dir);
        assert!(entries[1].is_dir);
    }

    #[test]
    fn copy_preserves_content() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("FNFoo.js");
        let to = tmp.path().join("copy.js");
        std::fs::write(&from, "export default 1;\n").unwrap();

        LocalFilesystem.copy_file(&from, &to).unwrap();

        assert_eq!(std::fs::read_to_string(to).unwrap(), "export default 1;\n");
    }

    #[test]
    fn missing_file_maps_to_filesystem_error() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFilesystem
            .read_to_string(&tmp.path().join("nope.js"))
            .unwrap_err();

        assert!(matches!(
            err,
            GrafterError::Application(ApplicationError::FilesystemError { .. })
        ));
    }
}
