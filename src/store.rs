use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::fs;

use crate::error::{storage_error, Error};

pub const DESTINATIONS_KEY: &str = "destinations";

/// A local key-value store holding serialized snapshots.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, Error>;
    async fn set(&self, key: &str, value: String) -> Result<(), Error>;
}

/// Keeps every key in a single JSON object on disk. Writes replace the
/// whole file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, Error> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    #[tracing::instrument(skip(self), fields(path = ?self.path))]
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.read_all().await?.remove(key))
    }

    #[tracing::instrument(skip(self, value), fields(path = ?self.path))]
    async fn set(&self, key: &str, value: String) -> Result<(), Error> {
        let mut entries = self.read_all().await?;
        entries.insert(key.into(), value);

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(&entries)?).await?;
        fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        let entries = self.entries.lock().map_err(storage_error)?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), Error> {
        let mut entries = self.entries.lock().map_err(storage_error)?;
        entries.insert(key.into(), value);
        Ok(())
    }
}

#[test]
fn file_store_persists_across_instances() {
    use tokio_test::block_on;

    let path = std::env::temp_dir().join(format!("waypoints-store-{}.json", std::process::id()));
    let _ = std::fs::remove_file(&path);

    let store = FileStore::new(&path);
    assert_eq!(block_on(store.get(DESTINATIONS_KEY)).unwrap(), None);

    block_on(store.set(DESTINATIONS_KEY, "[]".into())).unwrap();
    block_on(store.set("other", "1".into())).unwrap();
    block_on(store.set(DESTINATIONS_KEY, "[1]".into())).unwrap();

    let reopened = FileStore::new(&path);
    assert_eq!(
        block_on(reopened.get(DESTINATIONS_KEY)).unwrap(),
        Some("[1]".into())
    );
    assert_eq!(block_on(reopened.get("other")).unwrap(), Some("1".into()));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn memory_store_overwrites_entries() {
    use tokio_test::block_on;

    let store = MemoryStore::default();
    block_on(store.set(DESTINATIONS_KEY, "[]".into())).unwrap();
    block_on(store.set(DESTINATIONS_KEY, "[2]".into())).unwrap();

    assert_eq!(
        block_on(store.get(DESTINATIONS_KEY)).unwrap(),
        Some("[2]".into())
    );
}
