//! File-backed key-value namespace
//!
//! The whole namespace is one JSON object file (`{"NOTES": "[...]"}`). Every
//! write goes to a temp file that is synced to disk and then renamed over the
//! target, so a crash leaves either the old or the new namespace in place.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::db::{KeyValueStore, StorageError};

type Namespace = BTreeMap<String, String>;

pub struct FileStore {
    path: PathBuf,
    // serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_namespace(&self) -> Result<Namespace, StorageError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Namespace::new()),
            Err(e) => return Err(e.into()),
        };
        if contents.trim().is_empty() {
            return Ok(Namespace::new());
        }
        Ok(serde_json::from_str(&contents)?)
    }

    async fn write_namespace(&self, namespace: &Namespace) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let serialized = serde_json::to_string_pretty(namespace)?;
        replace_file(&self.path, &self.temp_path(), serialized.as_bytes()).await?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "storage".to_string());
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()))
    }
}

/// Write `contents` to `temp_path`, sync it and rename it over `target`.
///
/// On any failure the temp file is removed before the error is returned.
async fn replace_file(target: &Path, temp_path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let result = match write_synced(temp_path, contents).await {
        Ok(()) => fs::rename(temp_path, target).await,
        Err(e) => Err(e),
    };

    if result.is_err() {
        match fs::remove_file(temp_path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::error!(
                "Failed to remove temp file {}: {}",
                temp_path.display(),
                e
            ),
        }
    }
    result
}

async fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path).await?;
    file.write_all(contents).await?;
    file.sync_all().await
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_namespace().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut namespace = self.read_namespace().await?;
        namespace.insert(key.to_string(), value);
        self.write_namespace(&namespace).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut namespace = self.read_namespace().await?;
        if namespace.remove(key).is_none() {
            return Ok(());
        }
        self.write_namespace(&namespace).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        self.write_namespace(&Namespace::new()).await
    }
}
