// Use cases layer: the create and list workflows, generic over the store port.

pub mod create_session;
pub mod pull_sessions;
#[cfg(test)]
pub(crate) mod test_support;

pub use create_session::{CreateSessionResult, CreateSessionUseCase};
pub use pull_sessions::PullSessionsUseCase;
