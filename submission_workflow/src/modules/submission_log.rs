use log::{debug, info};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use crate::modules::{
    error::WorkflowError,
    local_store::LocalStore,
    submission_client::result::SubmissionResult,
};

pub const DEFAULT_STORAGE_KEY: &str = "malama_submissions";

// One entry of the persisted blob: {id, status, submittedAt, message, data}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSubmission {
    #[serde(flatten)]
    pub result: SubmissionResult,
    // The record as it was submitted
    pub data: serde_json::Value,
}

// Append-only log of past submissions kept under a single store key.
// All reads and writes go through the lock, so a read-modify-write of the
// blob cannot interleave with another one.
pub struct SubmissionLog {
    store: RwLock<LocalStore>,
    key: String,
}

impl SubmissionLog {
    pub fn new(store: LocalStore, key: impl Into<String>) -> Self {
        Self {
            store: RwLock::new(store),
            key: key.into(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(LocalStore::in_memory(), DEFAULT_STORAGE_KEY)
    }

    // Append a new entry, writing the full list back
    pub async fn append(&self, result: &SubmissionResult, data: serde_json::Value) -> Result<(), WorkflowError> {
        // Hold the write lock across the whole read-modify-write
        let mut store = self.store.write().await;

        let mut entries = read_entries(&store, &self.key)?;
        if entries.iter().any(|e| e.result.id() == result.id()) {
            return Err(WorkflowError::StorageError(format!("Duplicate submission id {}", result.id())));
        }
        entries.push(StoredSubmission { result: result.clone(), data });

        let json = serde_json::to_string(&entries)
            .map_err(|e| WorkflowError::JsonSerializationError(e.to_string()))?;
        store.set_item(&self.key, json)?;

        info!("Submission {} stored ({} total)", result.id(), entries.len());
        Ok(())
    }

    // Linear scan for the entry with `id`
    pub async fn find_by_id(&self, id: &str) -> Result<StoredSubmission, WorkflowError> {
        let store = self.store.read().await;
        let found = read_entries(&store, &self.key)?
            .into_iter()
            .find(|e| e.result.id() == id);

        match found {
            Some(entry) => Ok(entry),
            None => {
                debug!("Submission {} not in log", id);
                Err(WorkflowError::NotFoundError(id.to_string()))
            }
        }
    }

    pub async fn list(&self) -> Result<Vec<StoredSubmission>, WorkflowError> {
        let store = self.store.read().await;
        read_entries(&store, &self.key)
    }

    pub async fn len(&self) -> Result<usize, WorkflowError> {
        Ok(self.list().await?.len())
    }
}

// A missing key is an empty log
fn read_entries(store: &LocalStore, key: &str) -> Result<Vec<StoredSubmission>, WorkflowError> {
    match store.get_item(key) {
        Some(json) => serde_json::from_str(json)
            .map_err(|e| WorkflowError::JsonDeserializationError(e.to_string())),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::submission_client::result::SubmissionStatus;
    use serde_json::json;
    use tempfile::tempdir;

    fn result(id: &str) -> SubmissionResult {
        SubmissionResult::new(
            id.to_string(),
            SubmissionStatus::Submitted,
            "2026-10-16T08:30:00.000Z".to_string(),
            "received".to_string(),
        )
    }

    #[tokio::test]
    async fn find_by_id_returns_appended_entry() {
        let log = SubmissionLog::in_memory();
        log.append(&result("a"), json!({ "projectName": "A" })).await.unwrap();
        log.append(&result("b"), json!({ "projectName": "B" })).await.unwrap();

        let found = log.find_by_id("b").await.unwrap();
        assert_eq!(found.result.id(), "b");
        assert_eq!(found.result.status(), SubmissionStatus::Submitted);
        assert_eq!(found.result.submitted_at(), "2026-10-16T08:30:00.000Z");
        assert_eq!(found.data["projectName"], "B");
        assert_eq!(log.len().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let log = SubmissionLog::in_memory();
        log.append(&result("a"), json!({})).await.unwrap();

        let err = log.find_by_id("missing").await.unwrap_err();
        assert_eq!(err, WorkflowError::NotFoundError("missing".to_string()));
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let log = SubmissionLog::in_memory();
        log.append(&result("a"), json!({})).await.unwrap();

        let err = log.append(&result("a"), json!({})).await.unwrap_err();
        assert!(matches!(err, WorkflowError::StorageError(_)));
        assert_eq!(log.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn blob_is_a_json_array_under_the_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local_storage.json");

        let log = SubmissionLog::new(LocalStore::open(&path).unwrap(), DEFAULT_STORAGE_KEY);
        log.append(&result("a"), json!({ "termsAccepted": true })).await.unwrap();

        let store = LocalStore::open(&path).unwrap();
        let blob: serde_json::Value =
            serde_json::from_str(store.get_item(DEFAULT_STORAGE_KEY).unwrap()).unwrap();
        assert_eq!(blob[0]["id"], "a");
        assert_eq!(blob[0]["status"], "submitted");
        assert_eq!(blob[0]["submittedAt"], "2026-10-16T08:30:00.000Z");
        assert_eq!(blob[0]["message"], "received");
        assert_eq!(blob[0]["data"]["termsAccepted"], true);

        // A fresh log over the same file sees the entry
        let reopened = SubmissionLog::new(store, DEFAULT_STORAGE_KEY);
        assert_eq!(reopened.find_by_id("a").await.unwrap().result.id(), "a");
    }
}
