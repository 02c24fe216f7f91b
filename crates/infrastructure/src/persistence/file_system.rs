//! Real file system implementation.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use larder_application::ports::{FileSystem, FileSystemError};

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn classify(path: &Path, error: std::io::Error) -> FileSystemError {
    match error.kind() {
        ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
        ErrorKind::PermissionDenied => FileSystemError::PermissionDenied(path.to_path_buf()),
        _ => FileSystemError::Io(error),
    }
}

impl FileSystem for TokioFileSystem {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FileSystemError> {
        fs::read(path).await.map_err(|e| classify(path, e))
    }

    async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, contents).await.map_err(|e| classify(path, e))
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok()
    }

    async fn remove_file(&self, path: &Path) -> Result<(), FileSystemError> {
        fs::remove_file(path).await.map_err(|e| classify(path, e))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("file.json");
        let fs = TokioFileSystem::new();

        fs.write_file(&path, b"{}").await.unwrap();

        assert!(fs.exists(&path).await);
        assert_eq!(fs.read_file(&path).await.unwrap(), b"{}");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        let error = TokioFileSystem::new().read_file(&path).await.unwrap_err();
        assert!(matches!(error, FileSystemError::NotFound(p) if p == path));
    }
}
