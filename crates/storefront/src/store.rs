//! Durable key-value store for cart and favorite collections.
//!
//! One JSON file per key under a configured data directory, mirroring the
//! string-keyed persistent storage the cart survives restarts in. There is no
//! cross-process locking: two processes sharing a data directory are
//! last-writer-wins, the same stance the store takes on concurrent tabs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Store keys used by the cart state container.
pub mod store_keys {
    /// JSON array of `CartLineItem`.
    pub const CART: &str = "cart";
    /// JSON array of `FavoriteItem`.
    pub const FAVORITES: &str = "favorites";
}

/// Errors that can occur writing to the durable store.
///
/// Reads never fail: missing or corrupt data degrades to an empty collection.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A directory-backed store of JSON collections.
#[derive(Debug, Clone)]
pub struct DurableStore {
    dir: PathBuf,
}

impl DurableStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Load the collection stored under `key`.
    ///
    /// A missing value yields an empty collection. A value that fails to
    /// parse as a JSON array of `T` also yields an empty collection, and the
    /// stale entry is removed from the store so the next read starts clean.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let path = self.path_for(key);
        let Ok(raw) = fs::read_to_string(&path) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(key, error = %e, "discarding corrupt store entry");
                let _ = fs::remove_file(&path);
                Vec::new()
            }
        }
    }

    /// Serialize `items` to JSON and write it under `key`, overwriting any
    /// prior value.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string(items)?;
        fs::write(self.path_for(key), json)?;
        Ok(())
    }

    /// Filesystem path backing `key`.
    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// The directory backing this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
