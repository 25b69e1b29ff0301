use super::InferenceBackend;
use crate::config::InferenceConfig;
use async_trait::async_trait;
use doctalk_core::{DoctalkError, DoctalkResult, Fragment};
use serde::Serialize;
use std::time::Duration;

/// HTTP inference backend.
///
/// POSTs the prompt and the context fragment texts to the configured
/// endpoint and reads the reply from the `response` field of the JSON
/// payload.
pub struct HttpInferenceClient {
    config: InferenceConfig,
    http: reqwest::Client,
}

impl HttpInferenceClient {
    /// Builds the backend with a request timeout from the config.
    pub fn new(config: InferenceConfig) -> DoctalkResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DoctalkError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }
}

#[async_trait]
impl InferenceBackend for HttpInferenceClient {
    async fn complete(&self, prompt: &str, context: &[Fragment]) -> DoctalkResult<String> {
        let body = InferenceRequest {
            prompt,
            context: context.iter().map(|f| f.text.as_str()).collect(),
        };

        let resp = self
            .http
            .post(&self.config.endpoint_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| DoctalkError::Inference(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let error_body = resp
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(DoctalkError::Inference(format!(
                "inference API error {status}: {error_body}"
            )));
        }

        let resp_body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| DoctalkError::Inference(e.to_string()))?;

        match resp_body.get("response").and_then(|v| v.as_str()) {
            Some(text) => Ok(text.to_string()),
            None => Err(DoctalkError::Inference(
                "missing `response` field in inference payload".to_string(),
            )),
        }
    }
}

// --- Wire types ---

#[derive(Serialize)]
struct InferenceRequest<'a> {
    prompt: &'a str,
    context: Vec<&'a str>,
}
