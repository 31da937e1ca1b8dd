//! Durable key-value storage for the player record and tuning
//!
//! Backends:
//! - `MemoryStore`: process-local map (tests, throwaway sessions)
//! - `FileStore`: one JSON file per key, written via tmp + rename (native)
//! - `LocalStore`: browser LocalStorage (wasm32)
//!
//! Values are opaque strings; callers own the encoding.

mod file;
mod memory;

#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use file::FileStore;
pub use memory::MemoryStore;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStore;

use thiserror::Error;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("invalid key: {0:?}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// A string-keyed store whose writes are durable once `set` returns.
///
/// `set` fully overwrites any previous value for the key.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// Check if a value exists under `key`
    fn contains(&self, key: &str) -> bool {
        matches!(self.get(key), Ok(Some(_)))
    }
}

/// Reject keys that cannot double as file names
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
