use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::to_bytes;
use axum::response::Response;
use serde_json::Value;

use crate::catalog::SchemeCatalog;
use crate::workflows::assistance::attributes::UserAttributes;
use crate::workflows::assistance::backend::{BackendError, GenerativeBackend};
use crate::workflows::assistance::orchestrator::AssistanceOrchestrator;
use crate::workflows::assistance::strategy::StrategySelector;

pub(super) const EDUCATION_GRANT: &str = "Ehsaas Education Grant";

pub(super) fn catalog() -> Arc<SchemeCatalog> {
    Arc::new(SchemeCatalog::standard())
}

pub(super) fn deterministic_orchestrator() -> AssistanceOrchestrator {
    AssistanceOrchestrator::deterministic(catalog())
}

pub(super) fn generative(backend: Arc<dyn GenerativeBackend>) -> StrategySelector {
    StrategySelector::generative(backend, Duration::from_millis(200))
}

pub(super) fn income_and_children(income: u32, children: u32) -> UserAttributes {
    UserAttributes::default()
        .with_monthly_income(income)
        .with_children(children)
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("body is json")
}

/// Replies with the same text to every prompt.
pub(super) struct CannedBackend {
    reply: String,
    calls: AtomicUsize,
}

impl CannedBackend {
    pub(super) fn new(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
        })
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeBackend for CannedBackend {
    fn name(&self) -> &str {
        "canned"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Answers each agent's prompt with a fixed reply chosen by the prompt's wording.
pub(super) struct PerAgentBackend {
    pub(super) classification: String,
    pub(super) eligibility: String,
    pub(super) explanation: String,
}

#[async_trait]
impl GenerativeBackend for PerAgentBackend {
    fn name(&self) -> &str {
        "per-agent"
    }

    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        if prompt.contains("Analyze this citizen's issue") {
            Ok(self.classification.clone())
        } else if prompt.contains("eligibility officer") {
            Ok(self.eligibility.clone())
        } else if prompt.contains("Explain the assessment") {
            Ok(self.explanation.clone())
        } else {
            Err(BackendError::Malformed("unexpected prompt".to_string()))
        }
    }
}

pub(super) struct FailingBackend;

#[async_trait]
impl GenerativeBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, BackendError> {
        Err(BackendError::Status {
            status: 503,
            body: "model overloaded".to_string(),
        })
    }
}

/// Never answers within any reasonable timeout.
pub(super) struct HangingBackend;

#[async_trait]
impl GenerativeBackend for HangingBackend {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, BackendError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok("{}".to_string())
    }
}

/// Panics on every prompt, taking down the whole run.
pub(super) struct PanickingBackend;

#[async_trait]
impl GenerativeBackend for PanickingBackend {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn generate(&self, _prompt: &str) -> Result<String, BackendError> {
        panic!("backend crashed while generating");
    }
}

/// Panics only while judging one scheme; every other prompt fails softly.
pub(super) struct SchemeFaultBackend {
    pub(super) scheme: &'static str,
}

#[async_trait]
impl GenerativeBackend for SchemeFaultBackend {
    fn name(&self) -> &str {
        "scheme-fault"
    }

    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let marker = format!("\"name\": \"{}\"", self.scheme);
        if prompt.contains("eligibility officer") && prompt.contains(&marker) {
            panic!("backend crashed on {}", self.scheme);
        }
        Err(BackendError::Malformed("no reply".to_string()))
    }
}
