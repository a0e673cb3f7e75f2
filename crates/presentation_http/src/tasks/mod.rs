//! Background tasks for the HTTP presentation layer

mod artifact_cleanup;

pub use artifact_cleanup::spawn_artifact_cleanup_task;
