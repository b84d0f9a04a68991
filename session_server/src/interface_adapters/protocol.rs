use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::SessionDocument;

pub const SESSION_CREATED_MESSAGE: &str = "Session created successfully";
pub const SESSIONS_PULLED_MESSAGE: &str = "Sessions pulled successfully";
pub const INVALID_DATA_MESSAGE: &str = "Invalid data";

// Response payload for a created session.
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub message: &'static str,
}

// Response payload listing every stored session.
#[derive(Debug, Serialize)]
pub struct PullSessionsResponse {
    pub message: &'static str,
    pub data: Vec<SessionDocument>,
}

// Error envelope for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

// Parse a raw request body as JSON. Empty and malformed bodies yield None.
pub fn parse_body(body: &[u8]) -> Option<Value> {
    serde_json::from_slice(body).ok()
}
