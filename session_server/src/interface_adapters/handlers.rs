use crate::domain::errors::SessionError;
use crate::interface_adapters::protocol::{
    CreateSessionResponse, ErrorResponse, INVALID_DATA_MESSAGE, PullSessionsResponse,
    SESSION_CREATED_MESSAGE, SESSIONS_PULLED_MESSAGE, parse_body,
};
use crate::interface_adapters::state::AppState;
use crate::use_cases::{CreateSessionUseCase, PullSessionsUseCase};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{error, info};

// Handler for storing a submitted study session.
#[tracing::instrument(name = "create_session", skip_all, fields(schema = %state.schema))]
pub async fn create_session(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CreateSessionResponse>, Response> {
    // The body is parsed by hand so every malformed payload gets the same 400.
    let payload =
        parse_body(&body).ok_or_else(|| map_session_error(SessionError::InvalidRequest))?;

    let use_case = CreateSessionUseCase {
        store: state.store.clone(),
        schema: state.schema,
    };

    let result = use_case.execute(payload).await.map_err(map_session_error)?;
    info!(id = %result.id, "session created");

    Ok(Json(CreateSessionResponse {
        message: SESSION_CREATED_MESSAGE,
    }))
}

// Handler for listing every stored study session.
#[tracing::instrument(name = "pull_session", skip_all)]
pub async fn pull_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PullSessionsResponse>, Response> {
    let use_case = PullSessionsUseCase {
        store: state.store.clone(),
    };

    let data = use_case.execute().await.map_err(map_session_error)?;
    tracing::debug!(count = data.len(), "sessions pulled");

    Ok(Json(PullSessionsResponse {
        message: SESSIONS_PULLED_MESSAGE,
        data,
    }))
}

// Maps domain errors to HTTP responses. Store failures stay opaque to clients.
fn map_session_error(err: SessionError) -> Response {
    match err {
        SessionError::InvalidRequest => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: INVALID_DATA_MESSAGE,
            }),
        )
            .into_response(),
        SessionError::StoreUnavailable(err) => {
            error!(error = %err, "session store failure");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
