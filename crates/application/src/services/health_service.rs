//! Readiness checks
//!
//! Probes the synthesis provider, the recognition provider and the artifact
//! store concurrently, each under its own timeout. Recognition is optional:
//! without an OpenAI key SpeechGate still serves synthesis.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use crate::ports::{ArtifactStore, SpeechPort};

/// Time each probe may take before it counts as failed
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Something SpeechGate depends on to serve requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    Synthesis,
    Recognition,
    Storage,
}

impl Dependency {
    pub const ALL: [Self; 3] = [Self::Synthesis, Self::Recognition, Self::Storage];

    /// Key used in readiness reports
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Synthesis => "synthesis",
            Self::Recognition => "recognition",
            Self::Storage => "storage",
        }
    }

    /// Whether a failure makes the service unready
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Recognition)
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of probing one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHealth {
    pub healthy: bool,
    /// Provider or backend that was probed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    /// A probe that succeeded
    #[must_use]
    pub fn up(info: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            healthy: true,
            info: Some(info.into()),
            response_time_ms: Some(millis(elapsed)),
            error: None,
        }
    }

    /// A probe that failed or never answered
    #[must_use]
    pub fn down(error: impl Into<String>, elapsed: Option<Duration>) -> Self {
        Self {
            healthy: false,
            info: None,
            response_time_ms: elapsed.map(millis),
            error: Some(error.into()),
        }
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Result of probing every dependency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// True when every required dependency is healthy
    pub healthy: bool,
    /// Keyed by [`Dependency::name`]
    pub services: HashMap<String, ServiceHealth>,
    pub checked_at: DateTime<Utc>,
}

impl HealthReport {
    #[must_use]
    pub fn from_checks(checks: impl IntoIterator<Item = (Dependency, ServiceHealth)>) -> Self {
        let mut healthy = true;
        let mut services = HashMap::new();
        for (dependency, health) in checks {
            if dependency.is_required() && !health.healthy {
                healthy = false;
            }
            services.insert(dependency.name().to_string(), health);
        }

        Self {
            healthy,
            services,
            checked_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn status_of(&self, dependency: Dependency) -> Option<&ServiceHealth> {
        self.services.get(dependency.name())
    }
}

/// Probes dependencies for `/ready`
pub struct HealthService {
    speech: Arc<dyn SpeechPort>,
    store: Arc<dyn ArtifactStore>,
    check_timeout: Duration,
}

impl fmt::Debug for HealthService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthService")
            .field("check_timeout", &self.check_timeout)
            .finish_non_exhaustive()
    }
}

impl HealthService {
    #[must_use]
    pub fn new(speech: Arc<dyn SpeechPort>, store: Arc<dyn ArtifactStore>) -> Self {
        Self {
            speech,
            store,
            check_timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_check_timeout(mut self, check_timeout: Duration) -> Self {
        self.check_timeout = check_timeout;
        self
    }

    /// Probe every dependency concurrently
    #[instrument(skip(self))]
    pub async fn check_all(&self) -> HealthReport {
        let (synthesis, recognition, storage) = tokio::join!(
            self.check(Dependency::Synthesis),
            self.check(Dependency::Recognition),
            self.check(Dependency::Storage),
        );

        HealthReport::from_checks([
            (Dependency::Synthesis, synthesis),
            (Dependency::Recognition, recognition),
            (Dependency::Storage, storage),
        ])
    }

    /// Probe a single dependency
    pub async fn check(&self, dependency: Dependency) -> ServiceHealth {
        match dependency {
            Dependency::Synthesis => {
                let provider = self.speech.synthesis_provider();
                self.probe(dependency, provider, self.speech.is_synthesis_available())
                    .await
            },
            Dependency::Recognition => {
                self.probe(
                    dependency,
                    "whisper".to_string(),
                    self.speech.is_recognition_available(),
                )
                .await
            },
            Dependency::Storage => {
                self.probe(
                    dependency,
                    "artifact store".to_string(),
                    self.store.is_available(),
                )
                .await
            },
        }
    }

    async fn probe(
        &self,
        dependency: Dependency,
        info: String,
        available: impl Future<Output = bool> + Send,
    ) -> ServiceHealth {
        let start = Instant::now();

        let Ok(available) = timeout(self.check_timeout, available).await else {
            warn!(%dependency, timeout = ?self.check_timeout, "Health check timed out");
            return ServiceHealth::down(
                format!("{dependency} check timed out after {:?}", self.check_timeout),
                None,
            );
        };

        let elapsed = start.elapsed();
        if available {
            debug!(%dependency, ?elapsed, "Dependency healthy");
            ServiceHealth::up(info, elapsed)
        } else if dependency.is_required() {
            warn!(%dependency, ?elapsed, "Dependency unavailable");
            ServiceHealth::down(format!("{dependency} unavailable"), Some(elapsed))
        } else {
            debug!(%dependency, "Optional dependency unavailable");
            ServiceHealth::down(format!("{dependency} unavailable"), Some(elapsed))
        }
    }
}
