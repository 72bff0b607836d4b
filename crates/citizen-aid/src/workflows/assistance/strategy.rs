use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::backend::{BackendError, GenerativeBackend};
use crate::config::ResolutionMode;

/// Chooses between the generative and the deterministic strategy for each agent call.
///
/// A generative attempt is bounded by `timeout`; a timeout, transport failure, non-2xx
/// response, or unparsable reply degrades to the deterministic value for that call only.
/// There is no retry.
#[derive(Clone)]
pub struct StrategySelector {
    backend: Option<Arc<dyn GenerativeBackend>>,
    timeout: Duration,
}

/// Value produced by an agent together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub value: T,
    pub strategy: ResolutionMode,
}

impl<T> Resolved<T> {
    pub(crate) fn deterministic(value: T) -> Self {
        Self {
            value,
            strategy: ResolutionMode::Deterministic,
        }
    }
}

impl StrategySelector {
    pub fn deterministic() -> Self {
        Self {
            backend: None,
            timeout: Duration::ZERO,
        }
    }

    pub fn generative(backend: Arc<dyn GenerativeBackend>, timeout: Duration) -> Self {
        Self {
            backend: Some(backend),
            timeout,
        }
    }

    pub fn mode(&self) -> ResolutionMode {
        match self.backend {
            Some(_) => ResolutionMode::Generative,
            None => ResolutionMode::Deterministic,
        }
    }

    pub(crate) async fn resolve<T, B, P, F>(
        &self,
        agent: &'static str,
        build_prompt: B,
        parse: P,
        fallback: F,
    ) -> Resolved<T>
    where
        B: FnOnce() -> String,
        P: FnOnce(&str) -> Result<T, BackendError>,
        F: FnOnce() -> T,
    {
        let Some(backend) = &self.backend else {
            return Resolved::deterministic(fallback());
        };

        let prompt = build_prompt();
        let attempt = match tokio::time::timeout(self.timeout, backend.generate(&prompt)).await {
            Ok(Ok(raw)) => parse(&raw),
            Ok(Err(err)) => Err(err),
            Err(_) => Err(BackendError::Timeout(self.timeout)),
        };

        match attempt {
            Ok(value) => {
                debug!(agent, backend = backend.name(), "resolved by generative strategy");
                Resolved {
                    value,
                    strategy: ResolutionMode::Generative,
                }
            }
            Err(err) => {
                warn!(
                    agent,
                    backend = backend.name(),
                    error = %err,
                    "generative strategy failed, using deterministic fallback"
                );
                Resolved::deterministic(fallback())
            }
        }
    }
}

impl fmt::Debug for StrategySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrategySelector")
            .field("mode", &self.mode())
            .field("backend", &self.backend.as_ref().map(|backend| backend.name()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self::deterministic()
    }
}
