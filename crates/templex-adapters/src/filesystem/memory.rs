//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use templex_core::application::{ApplicationError, Filesystem};

#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, Vec<u8>>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn peek(&self, path: &Path) -> Option<Vec<u8>> {
        self.inner.read().ok()?.files.get(path).cloned()
    }

    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner.read().unwrap().files.keys().cloned().collect()
    }
}

fn lock_err() -> ApplicationError {
    ApplicationError::FilesystemError {
        path: String::new(),
        reason: "in-memory filesystem lock poisoned".to_string(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> Result<(), ApplicationError> {
        let mut inner = self.inner.write().map_err(|_| lock_err())?;
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<(), ApplicationError> {
        let mut inner = self.inner.write().map_err(|_| lock_err())?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                inner.directories.insert(parent.to_path_buf());
            }
        }
        inner.files.insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ApplicationError> {
        let inner = self.inner.read().map_err(|_| lock_err())?;
        inner
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| ApplicationError::FilesystemError {
                path: path.display().to_string(),
                reason: "file not found".to_string(),
            })
    }

    fn read_to_string(&self, path: &Path) -> Result<String, ApplicationError> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).map_err(|e| ApplicationError::FilesystemError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap();
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.read().unwrap().directories.contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), ApplicationError> {
        let mut inner = self.inner.write().map_err(|_| lock_err())?;
        inner.directories.retain(|p| !p.starts_with(path));
        inner.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), ApplicationError> {
        let mut inner = self.inner.write().map_err(|_| lock_err())?;
        inner.files.remove(path);
        Ok(())
    }

    fn read_dir_sorted(&self, path: &Path) -> Result<Vec<PathBuf>, ApplicationError> {
        let inner = self.inner.read().map_err(|_| lock_err())?;
        let mut children: Vec<PathBuf> = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .filter(|p| p.parent() == Some(path))
            .cloned()
            .collect();
        children.sort();
        children.dedup();
        Ok(children)
    }

    fn glob(&self, base: &Path, pattern: &str) -> Result<Vec<PathBuf>, ApplicationError> {
        let full_pattern = base.join(pattern).to_string_lossy().to_string();
        let matcher = glob::Pattern::new(&full_pattern).map_err(|e| {
            ApplicationError::FilesystemError {
                path: base.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        let inner = self.inner.read().map_err(|_| lock_err())?;
        let mut matches: Vec<PathBuf> = inner
            .files
            .keys()
            .chain(inner.directories.iter())
            .filter(|p| matcher.matches_path(p))
            .cloned()
            .collect();
        matches.sort();
        Ok(matches)
    }
}
