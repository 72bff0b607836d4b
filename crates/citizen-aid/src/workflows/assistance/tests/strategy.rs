use std::sync::Arc;
use std::time::{Duration, Instant};

use super::common::*;
use crate::config::ResolutionMode;
use crate::workflows::assistance::backend::{parse_reply, BackendError};
use crate::workflows::assistance::strategy::StrategySelector;

#[derive(Debug, PartialEq, serde::Deserialize)]
struct Echo {
    value: u32,
}

fn parse_echo(raw: &str) -> Result<u32, BackendError> {
    parse_reply::<Echo>(raw).map(|echo| echo.value)
}

#[tokio::test]
async fn deterministic_selector_never_builds_prompt() {
    let selector = StrategySelector::deterministic();
    assert_eq!(selector.mode(), ResolutionMode::Deterministic);

    let resolved = selector
        .resolve(
            "test",
            || panic!("prompt must not be built without a backend"),
            parse_echo,
            || 7,
        )
        .await;

    assert_eq!(resolved.value, 7);
    assert_eq!(resolved.strategy, ResolutionMode::Deterministic);
}

#[tokio::test]
async fn parsed_reply_wins() {
    let backend = CannedBackend::new("The answer is {\"value\": 42}.");
    let selector = generative(backend.clone());
    assert_eq!(selector.mode(), ResolutionMode::Generative);

    let resolved = selector
        .resolve("test", || "prompt".to_string(), parse_echo, || 7)
        .await;

    assert_eq!(resolved.value, 42);
    assert_eq!(resolved.strategy, ResolutionMode::Generative);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn unparsable_reply_falls_back_without_retry() {
    let backend = CannedBackend::new("I am not sure what you mean");
    let selector = generative(backend.clone());

    let resolved = selector
        .resolve("test", || "prompt".to_string(), parse_echo, || 7)
        .await;

    assert_eq!(resolved.value, 7);
    assert_eq!(resolved.strategy, ResolutionMode::Deterministic);
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn backend_error_falls_back() {
    let selector = generative(Arc::new(FailingBackend));
    let resolved = selector
        .resolve("test", || "prompt".to_string(), parse_echo, || 7)
        .await;
    assert_eq!(resolved.value, 7);
    assert_eq!(resolved.strategy, ResolutionMode::Deterministic);
}

#[tokio::test]
async fn hanging_backend_is_cut_off_by_timeout() {
    let selector = StrategySelector::generative(Arc::new(HangingBackend), Duration::from_millis(50));
    let started = Instant::now();

    let resolved = selector
        .resolve("test", || "prompt".to_string(), parse_echo, || 7)
        .await;

    assert_eq!(resolved.value, 7);
    assert_eq!(resolved.strategy, ResolutionMode::Deterministic);
    assert!(started.elapsed() < Duration::from_secs(5));
}
