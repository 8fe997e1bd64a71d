//! parkdesk HTTP server
//!
//! Serves the chat endpoint that drives the report flow. The server is
//! stateless: every request carries the conversation state blob and
//! every response hands it back.

pub mod http;
pub mod state;

pub use http::create_router;
pub use state::AppState;
