// Frameworks layer: configuration, the MongoDB adapter and process bootstrap.

pub mod config;
pub mod db;
pub mod server;
