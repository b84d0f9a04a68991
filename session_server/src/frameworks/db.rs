use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document};
use mongodb::{Client, Collection};
use serde_json::Value;

use crate::domain::entities::{STORE_ID_FIELD, SessionDocument};
use crate::domain::errors::StoreError;
use crate::domain::ports::SessionStore;

// MongoDB-backed session store: one client, one collection for the process.
#[derive(Clone)]
pub struct MongoSessionStore {
    client: Client,
    collection: Collection<Document>,
}

impl MongoSessionStore {
    // Build a client for the connection string and resolve the collection.
    // The driver connects lazily, so an unreachable server surfaces on first use.
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(uri).await?;
        let collection = client.database(database).collection::<Document>(collection);
        Ok(Self { client, collection })
    }
}

#[async_trait]
impl SessionStore for MongoSessionStore {
    async fn insert(&self, document: SessionDocument) -> Result<String, StoreError> {
        let document = to_bson_document(&document)?;
        let result = self
            .collection
            .insert_one(document)
            .await
            .map_err(unavailable)?;
        Ok(render_id(&result.inserted_id))
    }

    async fn list_all(&self) -> Result<Vec<SessionDocument>, StoreError> {
        let mut projection = Document::new();
        projection.insert(STORE_ID_FIELD, 0);

        let cursor = self
            .collection
            .find(Document::new())
            .projection(projection)
            .await
            .map_err(unavailable)?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(unavailable)?;

        documents.into_iter().map(to_session_document).collect()
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}

fn unavailable(err: mongodb::error::Error) -> StoreError {
    StoreError::Unavailable(err.to_string())
}

fn to_bson_document(document: &SessionDocument) -> Result<Document, StoreError> {
    bson::to_document(document).map_err(|err| StoreError::Encode(err.to_string()))
}

// Relaxed extended JSON keeps plain numbers and strings as clients sent them.
fn to_session_document(document: Document) -> Result<SessionDocument, StoreError> {
    match Bson::Document(document).into_relaxed_extjson() {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Decode(format!("expected a document, got {other}"))),
    }
}

fn render_id(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(value) => value.clone(),
        other => other.to_string(),
    }
}
