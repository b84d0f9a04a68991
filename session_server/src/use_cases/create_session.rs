use serde_json::Value;

use crate::domain::entities::SessionRecord;
use crate::domain::errors::SessionError;
use crate::domain::ports::SessionStore;
use crate::domain::schema::SchemaVersion;

// Result of a successful create; the id is for logging only.
#[derive(Debug)]
pub struct CreateSessionResult {
    pub id: String,
}

// Create-session use case with injected dependencies.
pub struct CreateSessionUseCase<S> {
    pub store: S,
    pub schema: SchemaVersion,
}

impl<S> CreateSessionUseCase<S>
where
    S: SessionStore,
{
    pub async fn execute(&self, payload: Value) -> Result<CreateSessionResult, SessionError> {
        // Only a non-empty JSON object counts as session data.
        let object = match payload {
            Value::Object(object) if !object.is_empty() => object,
            _ => return Err(SessionError::InvalidRequest),
        };

        let record = SessionRecord::from_object(object).map_err(|err| {
            tracing::debug!(error = %err, "session payload rejected");
            SessionError::InvalidRequest
        })?;

        let document = self.schema.project(&record);
        tracing::debug!(?document, schema = %self.schema, "inserting session");

        let id = self.store.insert(document).await?;

        Ok(CreateSessionResult { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::StoreError;
    use crate::use_cases::test_support::{FailureFlags, RecordingStore};
    use serde_json::json;

    fn build_use_case(
        store: RecordingStore,
        schema: SchemaVersion,
    ) -> CreateSessionUseCase<RecordingStore> {
        CreateSessionUseCase { store, schema }
    }

    #[tokio::test]
    async fn when_payload_is_valid_then_document_with_schema_fields_is_stored() {
        let store = RecordingStore::new();
        let use_case = build_use_case(store.clone(), SchemaVersion::V2);

        let result = use_case
            .execute(json!({
                "ssid": "abc",
                "building": "Library",
                "floor": 2,
                "date": "2024-01-01",
                "startTime": "10:00",
                "endTime": "11:00"
            }))
            .await
            .expect("expected create to succeed");

        assert_eq!(result.id, "doc-1");
        let stored = store.stored();
        assert_eq!(stored.len(), 1);
        let document = &stored[0];
        assert_eq!(document.len(), 10);
        assert_eq!(document["ssid"], json!("abc"));
        assert_eq!(document["floor"], json!(2));
        assert_eq!(document["course"], Value::Null);
        assert_eq!(document["notes"], Value::Null);
    }

    #[tokio::test]
    async fn when_schema_is_v1_then_extra_fields_are_not_stored() {
        let store = RecordingStore::new();
        let use_case = build_use_case(store.clone(), SchemaVersion::V1);

        use_case
            .execute(json!({"ssid": "abc", "course": "COP3502", "groupSize": 4}))
            .await
            .expect("expected create to succeed");

        let document = &store.stored()[0];
        assert_eq!(document.len(), 6);
        assert!(!document.contains_key("course"));
        assert!(!document.contains_key("groupSize"));
    }

    #[tokio::test]
    async fn when_payload_is_empty_object_then_returns_invalid_request() {
        let store = RecordingStore::new();
        let use_case = build_use_case(store.clone(), SchemaVersion::V2);

        let result = use_case.execute(json!({})).await;

        assert!(matches!(result, Err(SessionError::InvalidRequest)));
        assert!(store.stored().is_empty());
    }

    #[tokio::test]
    async fn when_payload_is_not_an_object_then_returns_invalid_request() {
        let store = RecordingStore::new();
        let use_case = build_use_case(store.clone(), SchemaVersion::V2);

        for payload in [json!(null), json!([1, 2]), json!("ssid"), json!(42), json!(true)] {
            let result = use_case.execute(payload).await;
            assert!(matches!(result, Err(SessionError::InvalidRequest)));
        }
        assert!(store.stored().is_empty());
    }

    #[tokio::test]
    async fn when_field_has_wrong_type_then_returns_invalid_request() {
        let store = RecordingStore::new();
        let use_case = build_use_case(store.clone(), SchemaVersion::V2);

        let result = use_case
            .execute(json!({"ssid": "abc", "building": ["Library"]}))
            .await;

        assert!(matches!(result, Err(SessionError::InvalidRequest)));
        assert!(store.stored().is_empty());
    }

    #[tokio::test]
    async fn when_same_payload_is_sent_twice_then_two_documents_are_stored() {
        let store = RecordingStore::new();
        let use_case = build_use_case(store.clone(), SchemaVersion::V2);
        let payload = json!({"ssid": "abc", "building": "Marston"});

        let first = use_case.execute(payload.clone()).await.unwrap();
        let second = use_case.execute(payload).await.unwrap();

        assert_ne!(first.id, second.id);
        let stored = store.stored();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0], stored[1]);
    }

    #[tokio::test]
    async fn when_store_insert_fails_then_returns_store_unavailable() {
        let store = RecordingStore::new().with_failures(FailureFlags {
            insert: true,
            ..FailureFlags::default()
        });
        let use_case = build_use_case(store, SchemaVersion::V2);

        let result = use_case.execute(json!({"ssid": "abc"})).await;

        assert!(matches!(
            result,
            Err(SessionError::StoreUnavailable(StoreError::Unavailable(_)))
        ));
    }
}
