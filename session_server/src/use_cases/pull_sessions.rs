use crate::domain::entities::{STORE_ID_FIELD, SessionDocument};
use crate::domain::errors::SessionError;
use crate::domain::ports::SessionStore;

// List-sessions use case with injected dependencies.
pub struct PullSessionsUseCase<S> {
    pub store: S,
}

impl<S> PullSessionsUseCase<S>
where
    S: SessionStore,
{
    pub async fn execute(&self) -> Result<Vec<SessionDocument>, SessionError> {
        let mut documents = self.store.list_all().await?;

        // Store ids never reach clients, whatever the adapter returned.
        for document in &mut documents {
            document.remove(STORE_ID_FIELD);
        }

        Ok(documents)
    }
}
