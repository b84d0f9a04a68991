// Interface adapters: HTTP protocol, handlers, routing and shared state.

pub mod handlers;
pub mod protocol;
pub mod routes;
pub mod state;
