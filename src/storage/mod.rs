//! Backing key-value store for the flashcard collections.
//!
//! The persistence layer only ever needs `get`/`set` on two fixed keys;
//! `get_all_keys` and `clear` exist for the debug tooling. Two stores are
//! provided: [`FileStore`] (one file per key under the data directory) and
//! [`MemoryStore`] (tests, ephemeral runs).

mod file_store;
mod memory;

use std::io;

use async_trait::async_trait;
use thiserror::Error;

pub use file_store::FileStore;
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage read failed: {0}")]
    Read(#[source] io::Error),

    #[error("storage write failed: {0}")]
    Write(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// An asynchronous string key-value map.
///
/// Implementations must treat an unknown key as absent, not as an error.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Return the raw value stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Enumerate every key currently present. Debug tooling only.
    async fn get_all_keys(&self) -> Result<Vec<String>>;

    /// Remove every key and value. Debug tooling only.
    async fn clear(&self) -> Result<()>;
}
