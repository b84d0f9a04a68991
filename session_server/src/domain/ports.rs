use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::SessionDocument;
use crate::domain::errors::StoreError;

// Port for the document collection holding session records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    // Store the document as given and return the store-generated id.
    async fn insert(&self, document: SessionDocument) -> Result<String, StoreError>;

    // Every stored document, without the store's own id field.
    async fn list_all(&self) -> Result<Vec<SessionDocument>, StoreError>;

    // Release the underlying connection at shutdown.
    async fn close(&self) {}
}

// Lets handlers inject `Arc<dyn SessionStore>` into generic use cases.
#[async_trait]
impl<T> SessionStore for Arc<T>
where
    T: SessionStore + ?Sized,
{
    async fn insert(&self, document: SessionDocument) -> Result<String, StoreError> {
        (**self).insert(document).await
    }

    async fn list_all(&self) -> Result<Vec<SessionDocument>, StoreError> {
        (**self).list_all().await
    }

    async fn close(&self) {
        (**self).close().await
    }
}
