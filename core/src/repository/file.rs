use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::config::default_data_dir;
use crate::repository::traits::KeyValueStore;

const DEFAULT_FILE_NAME: &str = "store.json";
const TEMP_FILE_NAME: &str = "store.json.tmp";

/// Key-value store backed by a single JSON object on disk. Every operation
/// re-reads the file; writes go to a sibling temp file that is renamed over
/// the store, so a crash mid-write leaves the previous contents intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    file_path: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("Could not create data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        let store = FileStore { file_path: path };
        if !store.file_path.exists() {
            store.write_map(&Map::new())?;
            tracing::info!(path = %store.file_path.display(), "created store");
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_map(&self) -> Result<Map<String, Value>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let map = serde_json::from_reader(reader)
            .with_context(|| format!("Store file {} is not a JSON object", self.file_path.display()))?;
        Ok(map)
    }

    fn temp_path(&self) -> PathBuf {
        self.file_path.with_file_name(TEMP_FILE_NAME)
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        let temp_path = self.temp_path();
        let file = File::create(&temp_path)
            .with_context(|| format!("Could not create {}", temp_path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, map)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);

        fs::rename(&temp_path, &self.file_path)
            .with_context(|| format!("Could not replace {}", self.file_path.display()))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn put_value(&self, key: &str, value: Value) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value);
        self.write_map(&map)
    }

    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_map()?.remove(key))
    }

    fn delete(&self, key: &str) -> Result<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<BTreeSet<String>> {
        Ok(self.read_map()?.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_creates_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert!(store.path().exists());
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = FileStore::new(Some(dir.path().to_path_buf())).unwrap();
            store.put("setting/hourly_rate", &20u32).unwrap();
            store.put_value("entry/2025-01-05", json!({"date": "2025-01-05"})).unwrap();
        }
        let store = FileStore::new(Some(dir.path().to_path_buf())).unwrap();
        assert_eq!(store.get::<u32>("setting/hourly_rate").unwrap(), Some(20));
        assert_eq!(store.keys().unwrap().len(), 2);

        store.delete("entry/2025-01-05").unwrap();
        store.delete("entry/2025-01-05").unwrap();
        assert!(!store.exists("entry/2025-01-05").unwrap());
    }

    #[test]
    fn test_interrupted_write_keeps_previous_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(Some(dir.path().to_path_buf())).unwrap();
        store.put("setting/hourly_rate", &20u32).unwrap();
        assert!(!store.temp_path().exists());

        // A write that died before its rename leaves a partial temp file behind.
        fs::write(store.temp_path(), "{\"setting/hourly_rate\": 3").unwrap();
        assert_eq!(store.get::<u32>("setting/hourly_rate").unwrap(), Some(20));

        store.put("setting/hourly_rate", &25u32).unwrap();
        assert_eq!(store.get::<u32>("setting/hourly_rate").unwrap(), Some(25));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(Some(dir.path().to_path_buf())).unwrap();
        fs::write(store.path(), "[1, 2, 3]").unwrap();
        assert!(store.keys().is_err());
    }
}
