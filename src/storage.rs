//! Storage layer for rb
//!
//! Every aggregate is persisted as one JSON blob under its own key, with the
//! key mapping to a file in the data directory:
//!
//! ```text
//! <data dir>/
//!   config.toml    # optional configuration
//!   tasks.json     # task list
//!   streak.json    # single streak record
//!   areas.json     # areas with nested projects
//!   moods.json     # mood journal entries
//! ```
//!
//! Reads and writes swallow their own failures rather than propagating them:
//! a failed read surfaces as `None` so callers fall back to seed data, and a
//! failed write leaves the in-memory state authoritative for the session.
//! Both are logged at warn level. Writes go through a temp file + rename so
//! a crashed write never clobbers the previous blob.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::Result;

/// Key for the task list blob
pub const TASKS_KEY: &str = "tasks";

/// Key for the streak record blob
pub const STREAK_KEY: &str = "streak";

/// Key for the areas blob
pub const AREAS_KEY: &str = "areas";

/// Key for the mood journal blob
pub const MOODS_KEY: &str = "moods";

const CONFIG_FILE: &str = "config.toml";
const FALLBACK_DIR: &str = ".rb";

/// Storage manager for rb state
#[derive(Debug, Clone)]
pub struct Storage {
    /// Directory holding all persisted blobs
    data_dir: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at the given directory
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Resolve the data directory: an explicit override wins, then the
    /// platform data dir, then `./.rb`
    pub fn resolve(override_dir: Option<PathBuf>) -> Self {
        Self::new(override_dir.unwrap_or_else(default_data_dir))
    }

    /// Path to the data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the configuration file inside the data directory
    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// Path of the blob stored under `key`
    pub fn item_file(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }

    /// Read and deserialize the blob stored under `key`.
    ///
    /// Returns `None` when the key has never been written or when the read
    /// fails for any reason; failures are logged, never propagated.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.item_file(key);
        if !path.exists() {
            return None;
        }
        match self.read_json(&path) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "failed to read stored item");
                None
            }
        }
    }

    /// Serialize and store `value` under `key`.
    ///
    /// Failures are logged and swallowed; callers keep their in-memory state
    /// as the source of truth either way.
    pub fn set_item<T: Serialize>(&self, key: &str, value: &T) {
        let path = self.item_file(key);
        if let Err(err) = self.write_json(&path, value) {
            warn!(key, error = %err, "failed to persist item");
        }
    }

    /// Read JSON data from a file
    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let data: T = serde_json::from_str(&content)?;
        Ok(data)
    }

    /// Write JSON data atomically (write to temp, then rename)
    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.write_atomic(path, json.as_bytes())
    }

    /// Write data atomically using temp file + rename, so readers never see
    /// partial writes and the previous blob survives a failed write.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");

        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "rb")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Serialize, serde::Deserialize, PartialEq, Debug)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn storage() -> (TempDir, Storage) {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().to_path_buf());
        (temp, storage)
    }

    #[test]
    fn item_paths_live_in_data_dir() {
        let (temp, storage) = storage();
        assert_eq!(storage.item_file(TASKS_KEY), temp.path().join("tasks.json"));
        assert_eq!(storage.config_file(), temp.path().join("config.toml"));
    }

    #[test]
    fn set_then_get_round_trips() {
        let (_temp, storage) = storage();
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };

        storage.set_item("test", &data);
        let read_back: Option<TestData> = storage.get_item("test");

        assert_eq!(read_back, Some(data));
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (_temp, storage) = storage();
        let read: Option<TestData> = storage.get_item("nothing");
        assert!(read.is_none());
    }

    #[test]
    fn corrupt_blob_reads_as_none() {
        let (_temp, storage) = storage();
        fs::create_dir_all(storage.data_dir()).unwrap();
        fs::write(storage.item_file("test"), "{not json").unwrap();

        let read: Option<TestData> = storage.get_item("test");
        assert!(read.is_none());
    }

    #[test]
    fn set_creates_missing_data_dir() {
        let temp = TempDir::new().unwrap();
        let storage = Storage::new(temp.path().join("nested").join("dir"));

        storage.set_item("test", &TestData { name: "x".to_string(), value: 1 });

        assert!(storage.item_file("test").exists());
    }

    #[test]
    fn overwrite_replaces_previous_blob() {
        let (_temp, storage) = storage();
        storage.set_item("test", &TestData { name: "a".to_string(), value: 1 });
        storage.set_item("test", &TestData { name: "b".to_string(), value: 2 });

        let read: Option<TestData> = storage.get_item("test");
        assert_eq!(read, Some(TestData { name: "b".to_string(), value: 2 }));
    }
}
