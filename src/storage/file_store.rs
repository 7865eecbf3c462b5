use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::{KeyValueStore, Result, StorageError};

/// File-backed key-value store: one file per key inside `base_path`.
///
/// Keys are used directly as file names, so they must not contain path
/// separators. The two collection keys the flashcard layer uses are plain
/// identifiers, which is all this store is asked to hold.
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory (e.g. ~/.local/share/soanki).
    pub fn default_data_dir() -> io::Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("soanki"))
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no local data directory"))
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.key_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Read(err)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(StorageError::Write)?;
        fs::write(self.key_path(key), value)
            .await
            .map_err(StorageError::Write)
    }

    async fn get_all_keys(&self) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StorageError::Read(err)),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(StorageError::Read)? {
            if let Ok(name) = entry.file_name().into_string() {
                keys.push(name);
            }
        }
        Ok(keys)
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_dir_all(&self.base_path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Write(err)),
        }
    }
}
