use citizen_aid::catalog::{CatalogError, SchemeCatalog};
use citizen_aid::config::{AssistantConfig, ResolutionMode};
use citizen_aid::workflows::assistance::{
    AssistanceOrchestrator, HttpGenerativeBackend, StrategySelector,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) mode: ResolutionMode,
}

pub(crate) fn load_catalog(config: &AssistantConfig) -> Result<SchemeCatalog, CatalogError> {
    match &config.catalog_path {
        Some(path) => {
            let catalog = SchemeCatalog::from_path(path)?;
            info!(
                path = %path.display(),
                schemes = catalog.schemes().len(),
                "loaded scheme catalog"
            );
            Ok(catalog)
        }
        None => Ok(SchemeCatalog::standard()),
    }
}

/// Generative when requested and the client builds; otherwise the rule-based strategies.
pub(crate) fn strategy_for(config: &AssistantConfig) -> StrategySelector {
    let backend = match (&config.backend, config.requested_mode()) {
        (Some(backend), ResolutionMode::Generative) => backend,
        _ => return StrategySelector::deterministic(),
    };

    match HttpGenerativeBackend::new(backend) {
        Ok(client) => StrategySelector::generative(Arc::new(client), backend.timeout),
        Err(err) => {
            warn!(error = %err, "generative backend unavailable, running deterministic");
            StrategySelector::deterministic()
        }
    }
}

pub(crate) fn build_orchestrator(
    config: &AssistantConfig,
) -> Result<AssistanceOrchestrator, CatalogError> {
    let catalog = load_catalog(config)?;
    Ok(AssistanceOrchestrator::new(
        Arc::new(catalog),
        strategy_for(config),
    ))
}

/// Rejects an empty or whitespace-only issue before it reaches the pipeline.
pub(crate) fn parse_issue(raw: &str) -> Result<String, String> {
    let issue = raw.trim();
    if issue.is_empty() {
        return Err("issue text must not be empty".to_string());
    }
    Ok(issue.to_string())
}

pub(crate) fn deterministic_orchestrator() -> AssistanceOrchestrator {
    AssistanceOrchestrator::deterministic(Arc::new(SchemeCatalog::standard()))
}
