//! SpeechGate HTTP presentation layer
//!
//! Routes, handlers, error mapping and middleware for the SpeechGate API.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod tasks;

pub use error::{ApiError, ErrorResponse, set_expose_internal_errors};
pub use middleware::{REQUEST_ID_HEADER, RequestIdLayer, ValidatedJson, ValidationError};
pub use routes::create_router;
pub use shutdown::{Shutdown, serve_with_shutdown};
pub use state::AppState;
pub use tasks::spawn_artifact_cleanup_task;
