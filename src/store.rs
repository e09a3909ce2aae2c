use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::document::Document;

/// Load/save access to the persisted [`Document`].
///
/// Every request loads the whole document and every mutation saves it back.
/// Implementations do no locking across the two calls, so two concurrent
/// writers can overwrite each other's changes.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load(&self) -> Result<Document>;

    async fn save(&self, document: &Document) -> Result<()>;
}

/// Run one read-modify-write cycle against `store`.
///
/// `op` receives the freshly loaded document. When it returns `Some`, the
/// document is written back and the value is returned; `None` means the
/// target did not exist and nothing is written.
pub async fn mutate<T, F>(store: &dyn DocumentStore, op: F) -> Result<Option<T>>
where
    F: FnOnce(&mut Document) -> Option<T> + Send,
    T: Send,
{
    let mut document = store.load().await?;
    let Some(outcome) = op(&mut document) else {
        return Ok(None);
    };
    store.save(&document).await?;
    Ok(Some(outcome))
}

/// The production backend: one pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the file as `{}` unless it already exists.
    ///
    /// An existing file is never touched, even when its contents are invalid.
    pub async fn ensure_exists(&self) -> Result<()> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .with_context(|| format!("Failed to check data file {}", self.path.display()))?;

        if exists {
            tracing::debug!("Using existing data file {}", self.path.display());
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        tokio::fs::write(&self.path, b"{}")
            .await
            .with_context(|| format!("Failed to initialize data file {}", self.path.display()))?;

        tracing::info!("Initialized empty data file {}", self.path.display());
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> Result<Document> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .with_context(|| format!("Failed to read data file {}", self.path.display()))?;

        serde_json::from_slice(&bytes)
            .with_context(|| format!("Data file {} is not a valid document", self.path.display()))
    }

    async fn save(&self, document: &Document) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(document)
            .context("Failed to serialize document")?;

        // Rewrites in place: a crash mid-write leaves a truncated file.
        tokio::fs::write(&self.path, bytes)
            .await
            .with_context(|| format!("Failed to write data file {}", self.path.display()))?;

        tracing::debug!("Saved data file {}", self.path.display());
        Ok(())
    }
}

/// Keeps the document in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<Document>,
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Document> {
        Ok(self.document.lock().await.clone())
    }

    async fn save(&self, document: &Document) -> Result<()> {
        *self.document.lock().await = document.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Record;
    use serde_json::json;

    fn body(value: serde_json::Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_ensure_exists_creates_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));

        store.ensure_exists().await.unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "{}");
        assert_eq!(store.load().await.unwrap(), Document::default());
    }

    #[tokio::test]
    async fn test_ensure_exists_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("data.json"));

        store.ensure_exists().await.unwrap();

        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_ensure_exists_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let original = r#"{"tasks":[{"id":"1","title":"keep me"}]}"#;
        std::fs::write(&path, original).unwrap();

        JsonFileStore::new(&path).ensure_exists().await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn test_save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));
        store.ensure_exists().await.unwrap();

        let mut document = store.load().await.unwrap();
        let created = document.create("tasks", body(json!({"title": "buy milk"})));
        store.save(&document).await.unwrap();

        let reopened = JsonFileStore::new(store.path());
        let loaded = reopened.load().await.unwrap();
        let id = created["id"].as_str().unwrap();
        assert_eq!(loaded.get("tasks", id), Some(&created));
    }

    #[tokio::test]
    async fn test_save_writes_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("data.json"));

        let mut document = Document::default();
        document.create("tasks", body(json!({"title": "a"})));
        store.save(&document).await.unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert!(contents.starts_with("{\n  \"tasks\": ["));
    }

    #[tokio::test]
    async fn test_load_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{\"tasks\": [").unwrap();

        let result = JsonFileStore::new(&path).load().await;

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a valid document"));
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();

        let result = JsonFileStore::new(dir.path().join("absent.json")).load().await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_mutate_saves_only_on_success() {
        let store = MemoryStore::default();

        let created = mutate(&store, |doc| Some(doc.create("tasks", Record::new())))
            .await
            .unwrap()
            .unwrap();
        let id = created["id"].as_str().unwrap().to_string();
        assert_eq!(store.load().await.unwrap().list("tasks").len(), 1);

        let missing = mutate(&store, |doc| doc.replace("tasks", "nope", Record::new()))
            .await
            .unwrap();
        assert!(missing.is_none());

        let deleted = mutate(&store, |doc| doc.delete("tasks", &id).then_some(()))
            .await
            .unwrap();
        assert_eq!(deleted, Some(()));
        assert!(store.load().await.unwrap().list("tasks").is_empty());
    }

    #[tokio::test]
    async fn test_mutate_leaves_file_untouched_on_miss() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        std::fs::write(&path, "{\"tasks\":[]}").unwrap();
        let store = JsonFileStore::new(&path);

        let outcome = mutate(&store, |doc| doc.replace("tasks", "nope", Record::new()))
            .await
            .unwrap();

        assert!(outcome.is_none());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"tasks\":[]}");
    }

    #[tokio::test]
    async fn test_interleaved_writers_lose_an_update() {
        let store = MemoryStore::default();

        let mut first = store.load().await.unwrap();
        let mut second = store.load().await.unwrap();
        first.create("tasks", body(json!({"writer": "first"})));
        second.create("tasks", body(json!({"writer": "second"})));
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        let records = store.load().await.unwrap().list("tasks").to_vec();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["writer"], json!("second"));
    }
}
