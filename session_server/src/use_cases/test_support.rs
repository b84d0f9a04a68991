use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::entities::{STORE_ID_FIELD, SessionDocument};
use crate::domain::errors::StoreError;
use crate::domain::ports::SessionStore;

pub(crate) type DocumentTable = Arc<Mutex<Vec<SessionDocument>>>;

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub insert: bool,
    pub list: bool,
}

// Fake store that records inserted documents for inspection.
#[derive(Clone)]
pub(crate) struct RecordingStore {
    documents: DocumentTable,
    failures: FailureFlags,
    // When set, list_all leaks the id field so callers' stripping is exercised.
    leak_ids: bool,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            documents: Arc::new(Mutex::new(Vec::new())),
            failures: FailureFlags::default(),
            leak_ids: false,
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn leaking_ids(mut self) -> Self {
        self.leak_ids = true;
        self
    }

    pub(crate) fn stored(&self) -> Vec<SessionDocument> {
        let guard = self.documents.lock().expect("documents mutex poisoned");
        guard.clone()
    }
}

#[async_trait]
impl SessionStore for RecordingStore {
    async fn insert(&self, document: SessionDocument) -> Result<String, StoreError> {
        if self.failures.insert {
            return Err(StoreError::Unavailable("insert failed".to_string()));
        }

        let mut guard = self.documents.lock().expect("documents mutex poisoned");
        guard.push(document);
        Ok(format!("doc-{}", guard.len()))
    }

    async fn list_all(&self) -> Result<Vec<SessionDocument>, StoreError> {
        if self.failures.list {
            return Err(StoreError::Unavailable("list failed".to_string()));
        }

        let guard = self.documents.lock().expect("documents mutex poisoned");
        Ok(guard
            .iter()
            .enumerate()
            .map(|(index, document)| {
                let mut document = document.clone();
                if self.leak_ids {
                    let id = format!("doc-{}", index + 1);
                    document.insert(STORE_ID_FIELD.to_string(), id.into());
                }
                document
            })
            .collect())
    }
}
