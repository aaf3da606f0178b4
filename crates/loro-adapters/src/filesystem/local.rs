//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use loro_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{LoroError, LoroResult},
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
    fn read_to_string(&self, path: &Path) -> LoroResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> LoroResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> LoroResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> LoroError {
    if e.kind() == io::ErrorKind::NotFound {
        return ApplicationError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into();
    }

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
    fn write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.txt");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, "hello").unwrap();
        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .read_to_string(&dir.path().join("missing.json"))
            .unwrap_err();
        assert!(matches!(
            err,
            LoroError::Application(ApplicationError::FileNotFound { .. })
        ));
    }

    #[test]
    fn writing_into_missing_directory_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.txt");
        let fs = LocalFilesystem::new();

        assert!(fs.write_file(&path, "x").is_err());
        fs.create_dir_all(path.parent().unwrap()).unwrap();
        fs.write_file(&path, "x").unwrap();
    }
}
