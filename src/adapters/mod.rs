// Adapters layer: concrete implementations for external systems.

use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Filesystem-backed [`Storage`] rooted at a base directory. Doubles as the
/// durability boundary for the fetch pipeline: whatever is listed here has
/// been fetched.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    async fn list_files(&self) -> Result<Vec<String>> {
        // A base directory that does not exist yet simply holds no records
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&self.base_path) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                let relative = entry
                    .path()
                    .strip_prefix(&self.base_path)
                    .unwrap_or_else(|_| entry.path());
                files.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("5551234567.json", b"{}").await.unwrap();
        let data = storage.read_file("5551234567.json").await.unwrap();
        assert_eq!(data, b"{}");
    }

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("nested").join("deep"));

        storage.write_file("record.json", b"{}").await.unwrap();
        assert!(temp_dir
            .path()
            .join("nested")
            .join("deep")
            .join("record.json")
            .exists());
    }

    #[tokio::test]
    async fn test_list_files_missing_base_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("does-not-exist"));

        let files = storage.list_files().await.unwrap();
        assert!(files.is_empty());
    }

    #[tokio::test]
    async fn test_list_files_walks_recursively() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("a.json", b"{}").await.unwrap();
        storage.write_file("sub/b.json", b"{}").await.unwrap();

        let mut files = storage.list_files().await.unwrap();
        files.sort();
        assert_eq!(files, vec!["a.json".to_string(), "sub/b.json".to_string()]);
    }
}
