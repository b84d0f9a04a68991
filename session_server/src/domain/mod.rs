// Domain layer: session record shape, schema versions and the store port.

pub mod entities;
pub mod errors;
pub mod ports;
pub mod schema;

pub use entities::{Scalar, SessionDocument, SessionRecord};
pub use errors::{SessionError, StoreError};
pub use ports::SessionStore;
pub use schema::SchemaVersion;
