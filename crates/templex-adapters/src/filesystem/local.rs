//! Local filesystem adapter using `std::fs`.

use std::io;
use std::path::{Path, PathBuf};

use templex_core::application::{ApplicationError, Filesystem};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> Result<(), ApplicationError> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<(), ApplicationError> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ApplicationError> {
        std::fs::read(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn read_to_string(&self, path: &Path) -> Result<String, ApplicationError> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), ApplicationError> {
        if !path.exists() {
            return Ok(());
        }
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }

    fn remove_file(&self, path: &Path) -> Result<(), ApplicationError> {
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }

    fn read_dir_sorted(&self, path: &Path) -> Result<Vec<PathBuf>, ApplicationError> {
        let mut entries: Vec<PathBuf> = std::fs::read_dir(path)
            .map_err(|e| map_io_error(path, e, "read directory"))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .collect();
        entries.sort();
        Ok(entries)
    }

    fn glob(&self, base: &Path, pattern: &str) -> Result<Vec<PathBuf>, ApplicationError> {
        let full_pattern = base.join(pattern);
        let mut matches: Vec<PathBuf> = glob::glob(&full_pattern.to_string_lossy())
            .map_err(|e| ApplicationError::FilesystemError {
                path: base.display().to_string(),
                reason: e.to_string(),
            })?
            .filter_map(Result::ok)
            .collect();
        matches.sort();
        Ok(matches)
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.display().to_string(),
        reason: format!("failed to {operation}: {e}"),
    }
}
