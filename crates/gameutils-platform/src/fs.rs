//! Filesystem abstraction and native implementation.
//!
//! Provides a platform-agnostic [`FileSystem`] trait for the handful of file
//! operations gameutils needs (reading descriptors and config, writing
//! archives) and a native implementation backed by [`tokio::fs`].

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Platform-agnostic filesystem operations.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Read a file's entire contents as a UTF-8 string.
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Write bytes to a file, creating parent directories if needed.
    ///
    /// Overwrites the file if it already exists.
    async fn write_bytes(&self, path: &Path, content: &[u8]) -> std::io::Result<()>;

    /// Check whether a path exists (file or directory).
    async fn exists(&self, path: &Path) -> bool;

    /// Get the user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Native filesystem implementation using [`tokio::fs`].
#[cfg(feature = "native")]
pub struct NativeFileSystem;

#[cfg(feature = "native")]
#[async_trait]
impl FileSystem for NativeFileSystem {
    async fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        tokio::fs::read_to_string(path).await
    }

    async fn write_bytes(&self, path: &Path, content: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, content).await
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }
}

#[cfg(all(test, feature = "native"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.json");
        let fs = NativeFileSystem;

        fs.write_bytes(&path, b"{\"name\":\"cat\"}").await.unwrap();
        let contents = fs.read_to_string(&path).await.unwrap();
        assert_eq!(contents, "{\"name\":\"cat\"}");
    }

    #[tokio::test]
    async fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("nested").join("cat.sprite3");
        let fs = NativeFileSystem;

        fs.write_bytes(&path, &[0x50, 0x4b]).await.unwrap();
        assert!(fs.exists(&path).await);
    }

    #[tokio::test]
    async fn test_exists_false_for_missing() {
        let dir = tempfile::tempdir().unwrap();
        let fs = NativeFileSystem;
        assert!(!fs.exists(&dir.path().join("missing.json")).await);
    }

    #[tokio::test]
    async fn test_read_nonexistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let fs = NativeFileSystem;
        assert!(fs.read_to_string(&dir.path().join("nope")).await.is_err());
    }
}
