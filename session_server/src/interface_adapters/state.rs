use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::{STORE_ID_FIELD, SessionDocument};
use crate::domain::errors::StoreError;
use crate::domain::ports::SessionStore;
use crate::domain::schema::SchemaVersion;

#[derive(Clone)]
pub struct AppState {
    // Any store implementation can be injected here.
    pub store: Arc<dyn SessionStore>,
    // Field set served by this deployment.
    pub schema: SchemaVersion,
}

impl AppState {
    pub fn new(store: Arc<dyn SessionStore>, schema: SchemaVersion) -> Self {
        Self { store, schema }
    }

    // State backed by a fresh in-process store.
    pub fn in_memory(schema: SchemaVersion) -> Self {
        Self::new(Arc::new(InMemorySessionStore::default()), schema)
    }
}

// In-process session store for local runs and tests. Keeps insertion order
// and tags each document with a generated id, like a document database would.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    documents: Arc<Mutex<Vec<SessionDocument>>>,
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, mut document: SessionDocument) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        document.insert(STORE_ID_FIELD.to_string(), id.clone().into());

        let mut documents = self.documents.lock().await;
        documents.push(document);
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<SessionDocument>, StoreError> {
        let documents = self.documents.lock().await;
        Ok(documents
            .iter()
            .map(|document| {
                let mut document = document.clone();
                document.remove(STORE_ID_FIELD);
                document
            })
            .collect())
    }
}
