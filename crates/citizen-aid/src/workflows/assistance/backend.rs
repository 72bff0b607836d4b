use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::config::BackendConfig;

/// Failure of a single generative call. Always recoverable: the caller falls back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("generative backend unreachable: {0}")]
    Transport(String),
    #[error("generative backend timed out after {0:?}")]
    Timeout(Duration),
    #[error("generative backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("generative backend returned a malformed payload: {0}")]
    Malformed(String),
}

/// Text-in, text-out model endpoint used by the generative strategies.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, BackendError>;
}

/// OpenAI-compatible chat-completions client.
pub struct HttpGenerativeBackend {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpGenerativeBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| BackendError::Transport(err.to_string()))?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            timeout: config.timeout,
            client,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.timeout)
        } else {
            BackendError::Transport(err.to_string())
        }
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": 0.2,
        })
    }
}

#[async_trait]
impl GenerativeBackend for HttpGenerativeBackend {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, BackendError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&self.request_body(prompt));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|err| BackendError::Malformed(err.to_string()))?;

        completion_text(&payload)
    }
}

pub(crate) fn completion_text(payload: &Value) -> Result<String, BackendError> {
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(str::to_string)
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| BackendError::Malformed("no message content in response".to_string()))
}

/// Slice of a model reply that holds the JSON object, tolerating prose and code fences.
pub(crate) fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parses the JSON object embedded in a model reply.
pub(crate) fn parse_reply<T>(raw: &str) -> Result<T, BackendError>
where
    T: serde::de::DeserializeOwned,
{
    let body = extract_json_object(raw)
        .ok_or_else(|| BackendError::Malformed("reply contains no JSON object".to_string()))?;
    serde_json::from_str(body).map_err(|err| BackendError::Malformed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_wrapped_in_code_fences() {
        let reply = "Here you go:\n```json\n{\"issue_type\": \"housing\"}\n```";
        assert_eq!(
            extract_json_object(reply),
            Some("{\"issue_type\": \"housing\"}")
        );
        assert_eq!(extract_json_object("no structure here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn completion_text_requires_message_content() {
        let payload = json!({ "choices": [{ "message": { "content": "hello" } }] });
        assert_eq!(completion_text(&payload), Ok("hello".to_string()));

        let empty = json!({ "choices": [] });
        assert!(matches!(
            completion_text(&empty),
            Err(BackendError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_transport_failure() {
        let backend = HttpGenerativeBackend::new(&BackendConfig {
            endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            model: "test-model".to_string(),
            api_key: None,
            timeout: Duration::from_millis(500),
        })
        .expect("client builds");

        let result = backend.generate("ping").await;
        assert!(
            matches!(
                result,
                Err(BackendError::Transport(_)) | Err(BackendError::Timeout(_))
            ),
            "unexpected result {result:?}"
        );
    }
}
