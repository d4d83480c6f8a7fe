//! Tolerant filesystem helpers shared by the overlay operations
//!
//! Absence of a managed file is a valid prior state throughout this crate,
//! so deletion helpers swallow "not found" and nothing else: permission or
//! disk errors still propagate.

use std::io;
use std::path::Path;

use tokio::fs;

/// Check whether `path` currently exists.
pub async fn path_exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Delete `path`, treating "not found" as success.
pub async fn remove_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

/// Delete an optional side file, if one is configured at all.
pub async fn remove_optional(path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => remove_if_exists(path).await,
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_remove_if_exists_missing_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("not-there");

        assert!(remove_if_exists(&path).await.is_ok());
    }

    #[tokio::test]
    async fn test_remove_if_exists_deletes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file");
        std::fs::write(&path, "data").unwrap();

        remove_if_exists(&path).await.unwrap();

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_remove_optional_none_is_noop() {
        assert!(remove_optional(None).await.is_ok());
    }

    #[tokio::test]
    async fn test_path_exists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file");

        assert!(!path_exists(&path).await);
        std::fs::write(&path, "data").unwrap();
        assert!(path_exists(&path).await);
    }
}
