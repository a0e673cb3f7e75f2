//! Artifact retention task
//!
//! Periodically deletes generated audio older than the retention period.

use std::sync::Arc;
use std::time::Duration;

use application::SpeechService;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// Spawn a background task that purges expired artifacts.
///
/// The first purge runs one `interval` after startup. Abort the returned
/// handle on shutdown.
pub fn spawn_artifact_cleanup_task(
    speech_service: Arc<SpeechService>,
    retention: Duration,
    interval: Duration,
) -> JoinHandle<()> {
    info!(
        retention_secs = retention.as_secs(),
        interval_secs = interval.as_secs(),
        "Starting artifact cleanup task"
    );

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.tick().await;

        loop {
            ticker.tick().await;
            debug!("Running artifact cleanup");

            match speech_service.purge_expired(retention).await {
                Ok(0) => debug!("No expired artifacts"),
                Ok(removed) => info!(removed, "Removed expired artifacts"),
                Err(e) => error!(error = %e, "Artifact cleanup failed"),
            }
        }
    })
}
